use crate::api::{AddressRequest, ErrorResponse, TaxRateResponse};
use crate::handlers::error_response;
use crate::state::AppState;
use crate::validation::JurisdictionFactory;
use axum::{Json, extract::State, http::StatusCode};
use tracing::{info, warn};

/// POST /tax/rate
///
/// Resolve the jurisdiction of a checkout address and return its rate,
/// served from the rate cache when already known.
pub async fn get_tax_rate(
    State(state): State<AppState>,
    Json(req): Json<AddressRequest>,
) -> Result<Json<TaxRateResponse>, (StatusCode, Json<ErrorResponse>)> {
    let key = JurisdictionFactory::from_address(&req).map_err(|e| {
        warn!("Rejected tax rate request: {}", e);
        error_response(&shared::Error::from(e))
    })?;

    info!("TAX_RATE: jurisdiction={}", key);

    let rate = state
        .rate_cache
        .get_rate(&key, state.lookup.as_ref())
        .await
        .map_err(|e| error_response(&e))?;

    Ok(Json(TaxRateResponse::new(&key, rate)))
}
