//! Rate lookup over the provider's JSON/HTTP API.
//!
//! Every answer carries a service status next to the result:
//!
//! ```json
//! {"status": {"code": 200, "description": "Found"}, "result": {"rate": "0.08"}}
//! ```
//!
//! Status codes 200-299 mean success; 300-399 no data, 400-499 bad input and
//! 500+ a provider-side failure. Anything outside 200-299 is handed back verbatim.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{Error, Result};
use std::time::Duration;
use taxrate::domain::JurisdictionKey;
use taxrate::ports::RateLookupService;
use tracing::debug;

const LICENSE_HEADER: &str = "X-License-Key";

#[derive(Clone, Debug)]
pub struct LookupConfig {
    pub base_url: String,
    pub license_key: Option<String>,
    pub timeout: Duration,
}

impl LookupConfig {
    pub fn new(
        base_url: impl Into<String>,
        license_key: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            license_key,
            timeout,
        }
    }
}

impl From<&shared::config::Config> for LookupConfig {
    fn from(config: &shared::config::Config) -> Self {
        Self::new(
            config.lookup_url.clone(),
            config.license_key.clone(),
            config.lookup_timeout,
        )
    }
}

#[derive(Debug, Deserialize)]
struct ServiceResponse {
    status: ServiceStatus,
    #[serde(default)]
    result: Option<ServiceResult>,
}

#[derive(Debug, Deserialize)]
struct ServiceStatus {
    code: i32,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ServiceResult {
    rate: Decimal,
}

/// Client for the remote rate service.
/// The license key travels with the config, there is no ambient credential.
#[derive(Debug, Clone)]
pub struct HttpRateLookup {
    client: Client,
    base_url: String,
    license_key: Option<String>,
}

impl HttpRateLookup {
    pub fn new(config: LookupConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self::with_client(client, config))
    }

    /// Create a lookup around an existing HTTP client
    pub fn with_client(client: Client, config: LookupConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            license_key: config.license_key.filter(|key| !key.trim().is_empty()),
        }
    }

    fn endpoint(&self, key: &JurisdictionKey) -> (String, [(&'static str, String); 1]) {
        match key {
            JurisdictionKey::Usa { zip } => (
                format!("{}/taxrate/usa", self.base_url),
                [("zip", zip.to_string())],
            ),
            JurisdictionKey::Canada { province } => (
                format!("{}/taxrate/canada", self.base_url),
                [("province", province.to_string())],
            ),
        }
    }
}

#[async_trait]
impl RateLookupService for HttpRateLookup {
    async fn fetch_rate(&self, key: &JurisdictionKey) -> Result<Decimal> {
        let license_key = self.license_key.as_deref().ok_or(Error::NotConfigured)?;
        let (url, query) = self.endpoint(key);

        debug!("Requesting rate for '{}' from {}", key, url);

        let response = self
            .client
            .get(&url)
            .header(LICENSE_HEADER, license_key)
            .query(&query)
            .send()
            .await
            .map_err(|e| Error::RemoteUnavailable(e.to_string()))?;

        // 401/403 mean the service refused the license key
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::InvalidResponse {
                code: i32::from(status.as_u16()),
                description: "license key rejected".to_string(),
            });
        }

        let response = response
            .error_for_status()
            .map_err(|e| Error::RemoteUnavailable(e.to_string()))?;

        let body = response
            .text()
            .await
            .map_err(|e| Error::RemoteUnavailable(e.to_string()))?;

        parse_response(&body)
    }
}

fn parse_response(body: &str) -> Result<Decimal> {
    let response: ServiceResponse =
        serde_json::from_str(body).map_err(|e| Error::MalformedResponse(e.to_string()))?;

    let ServiceStatus { code, description } = response.status;
    if !(200..300).contains(&code) {
        return Err(Error::InvalidResponse { code, description });
    }

    response
        .result
        .map(|result| result.rate)
        .ok_or_else(|| Error::MalformedResponse(format!("status {code} without a result")))
}
