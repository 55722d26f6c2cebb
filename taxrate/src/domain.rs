use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::config::CacheBackend;
use shared::{Error, Result};
use std::fmt;
use std::time::Duration;

/// Countries the rate service can answer for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Country {
    Usa,
    Canada,
}

impl TryFrom<&str> for Country {
    type Error = Error;

    /// Accepts a two-letter ISO code in any case
    fn try_from(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "us" => Ok(Country::Usa),
            "ca" => Ok(Country::Canada),
            _ => Err(Error::Validation(
                "Tax can be calculated only for USA zip or Canada province".to_string(),
            )),
        }
    }
}

/// A zip or province code: trimmed, ASCII upper-cased and never empty
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct JurisdictionCode(String);

impl JurisdictionCode {
    fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_ascii_uppercase()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JurisdictionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A tax jurisdiction: a USA zip code or a Canadian province code.
///
/// Built through [`JurisdictionKey::usa`] and [`JurisdictionKey::canada`]; the held
/// [`JurisdictionCode`] can only come out of normalization.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum JurisdictionKey {
    Usa { zip: JurisdictionCode },
    Canada { province: JurisdictionCode },
}

impl JurisdictionKey {
    const USA_PREFIX: &str = "usa";
    const CANADA_PREFIX: &str = "ca";

    pub fn usa(zip: &str) -> Result<Self> {
        let zip = JurisdictionCode::parse(zip)
            .ok_or_else(|| Error::Validation("Zip is not provided".into()))?;
        Ok(JurisdictionKey::Usa { zip })
    }

    pub fn canada(province: &str) -> Result<Self> {
        let province = JurisdictionCode::parse(province)
            .ok_or_else(|| Error::Validation("Province is not set".into()))?;
        Ok(JurisdictionKey::Canada { province })
    }

    pub fn country(&self) -> Country {
        match self {
            JurisdictionKey::Usa { .. } => Country::Usa,
            JurisdictionKey::Canada { .. } => Country::Canada,
        }
    }

    /// The zip or province code
    pub fn code(&self) -> &str {
        match self {
            JurisdictionKey::Usa { zip } => zip.as_str(),
            JurisdictionKey::Canada { province } => province.as_str(),
        }
    }

    /// Index under which the rate for this jurisdiction is cached.
    /// The country prefix keeps USA and Canada codes in disjoint namespaces.
    pub fn cache_index(&self) -> String {
        match self {
            JurisdictionKey::Usa { zip } => format!("{}:{}", Self::USA_PREFIX, zip),
            JurisdictionKey::Canada { province } => {
                format!("{}:{}", Self::CANADA_PREFIX, province)
            }
        }
    }
}

impl fmt::Display for JurisdictionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cache_index())
    }
}

/// A rate that was successfully fetched from the rate service.
/// `rate` is the fractional rate (0.08 for 8%).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateEntry {
    pub key: JurisdictionKey,
    pub rate: Decimal,
    pub fetched_at: DateTime<Utc>,
}

impl RateEntry {
    pub fn new(key: JurisdictionKey, rate: Decimal) -> Self {
        Self {
            key,
            rate,
            fetched_at: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct StoreConfig {
    pub backend: CacheBackend,
    pub ttl: Option<Duration>,    // moka only, None = keep forever
    pub max_entries: Option<u64>, // moka only
}

impl StoreConfig {
    pub fn new(backend: CacheBackend, ttl: Option<Duration>, max_entries: Option<u64>) -> Self {
        Self {
            backend,
            ttl,
            max_entries,
        }
    }
}
