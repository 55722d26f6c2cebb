use rust_decimal::Decimal;
use serde::Serialize;
use taxrate::domain::JurisdictionKey;

#[derive(Serialize)]
pub struct HealthResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct TaxRateResponse {
    pub jurisdiction: String,
    /// Fractional rate as returned by the rate service
    pub rate: Decimal,
    /// Rate formatted for display, e.g. "8.00 %"
    pub percent: String,
}

impl TaxRateResponse {
    pub fn new(key: &JurisdictionKey, rate: Decimal) -> Self {
        Self {
            jurisdiction: key.cache_index(),
            rate,
            percent: format_percent(rate),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TestRateResponse {
    pub result: String,
}

#[derive(Debug, Serialize)]
pub struct CacheStatsResponse {
    pub entries: u64,
}

#[derive(Debug, Serialize)]
pub struct ClearCacheResponse {
    pub cleared: bool,
}

// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Render a fractional rate as a percentage with two decimals.
/// Scaling by 100 happens only here, never in the cache or the lookup.
pub fn format_percent(rate: Decimal) -> String {
    let percent = (rate * Decimal::ONE_HUNDRED).round_dp(2);
    format!("{percent:.2} %")
}
