use serde::Deserialize;

/// Address fields that decide the tax jurisdiction at checkout
#[derive(Debug, Default, Deserialize)]
pub struct AddressRequest {
    /// Two-letter ISO country code
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    /// Two-letter province abbreviation
    #[serde(default)]
    pub province: Option<String>,
}

/// Operator request to test the rate service for a zip or a province
#[derive(Debug, Default, Deserialize)]
pub struct TestRateRequest {
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
}
