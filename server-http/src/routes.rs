use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::normalize_path::NormalizePath;
use tower_http::trace::TraceLayer;

/// The application service: the router behind trailing-slash normalization.
/// Normalization has to wrap the whole router to run before route matching.
pub type App = NormalizePath<Router>;

/// Build and configure the application router
pub fn build_router(state: AppState) -> App {
    let router = Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Checkout rate lookup
        .route("/tax/rate", post(handlers::get_tax_rate))
        // Operator routes
        .route("/admin/test", post(handlers::test_service))
        .route(
            "/admin/cache",
            get(handlers::cache_stats).delete(handlers::clear_cache),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    NormalizePath::trim_trailing_slash(router)
}
