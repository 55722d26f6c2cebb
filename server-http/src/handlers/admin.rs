use crate::api::{
    CacheStatsResponse, ClearCacheResponse, TestRateRequest, TestRateResponse, format_percent,
};
use crate::state::AppState;
use crate::validation::JurisdictionFactory;
use axum::{Json, extract::State};
use taxrate::domain::JurisdictionKey;
use tracing::{error, info};

/// POST /admin/test
///
/// Ask the rate service directly, bypassing the cache, so operators can check the
/// license key and connectivity. Failures are reported in the body, never as an
/// error status.
pub async fn test_service(
    State(state): State<AppState>,
    Json(req): Json<TestRateRequest>,
) -> Json<TestRateResponse> {
    let key = match JurisdictionFactory::from_test_request(&req) {
        Ok(key) => key,
        Err(e) => {
            return Json(TestRateResponse {
                result: e.to_string(),
            });
        }
    };

    info!("TEST_SERVICE: jurisdiction={}", key);

    let result = match state.lookup.fetch_rate(&key).await {
        Ok(rate) => {
            let label = match &key {
                JurisdictionKey::Usa { .. } => "zip",
                JurisdictionKey::Canada { .. } => "province",
            };
            format!("Rate for {} {}: {}", label, key.code(), format_percent(rate))
        }
        Err(e) => {
            error!("Rate service error: {}", e);
            e.to_string()
        }
    };

    Json(TestRateResponse { result })
}

/// GET /admin/cache
pub async fn cache_stats(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    Json(CacheStatsResponse {
        entries: state.rate_cache.entry_count().await,
    })
}

/// DELETE /admin/cache
pub async fn clear_cache(State(state): State<AppState>) -> Json<ClearCacheResponse> {
    info!("CLEAR_CACHE");
    state.rate_cache.clear().await;
    Json(ClearCacheResponse { cleared: true })
}
