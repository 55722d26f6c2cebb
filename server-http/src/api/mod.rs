mod requests;
mod responses;

pub use requests::{AddressRequest, TestRateRequest};
pub use responses::{
    CacheStatsResponse, ClearCacheResponse, ErrorResponse, HealthResponse, TaxRateResponse,
    TestRateResponse, format_percent,
};
