pub mod admin;
pub mod health;
pub mod tax;

pub use admin::{cache_stats, clear_cache, test_service};
pub use health::health_check;
pub use tax::get_tax_rate;

use crate::api::ErrorResponse;
use axum::{Json, http::StatusCode};

/// Map a core error to the HTTP status and body returned to the caller
pub(crate) fn error_response(err: &shared::Error) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err {
        shared::Error::Validation(_) => StatusCode::BAD_REQUEST,
        shared::Error::InvalidResponse { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        shared::Error::RemoteUnavailable(_) | shared::Error::MalformedResponse(_) => {
            StatusCode::BAD_GATEWAY
        }
        shared::Error::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
        shared::Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorResponse::new(err.to_string())))
}
