use std::time::Duration;
use tracing::warn;

/// Storage backend holding cached rates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CacheBackend {
    /// Plain concurrent map, entries live until cleared
    #[default]
    DashMap,
    /// Moka cache, honours `cache_ttl` and `cache_max_entries`
    Moka,
}

impl CacheBackend {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "dashmap" | "" => Some(CacheBackend::DashMap),
            "moka" => Some(CacheBackend::Moka),
            _ => None,
        }
    }
}

pub struct Config {
    pub host: String,
    pub http_port: u16,
    pub license_key: Option<String>,
    pub lookup_url: String,
    pub lookup_timeout: Duration,
    pub cache_backend: CacheBackend,
    pub cache_ttl: Option<Duration>,
    pub cache_max_entries: Option<u64>,
}

impl Config {
    const DEFAULT_HOST: &str = "0.0.0.0";
    const DEFAULT_HTTP_PORT: u16 = 8080;
    const DEFAULT_LOOKUP_URL: &str = "http://localhost:9090";
    const DEFAULT_LOOKUP_TIMEOUT_MS: u64 = 5000;

    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build a config from any variable source, `from_env` passes the process environment
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let license_key = var("TAXRATE_LICENSE_KEY").filter(|key| !key.trim().is_empty());
        if license_key.is_none() {
            warn!("TAXRATE_LICENSE_KEY not set, rate lookups will fail until it is configured");
        }

        let cache_backend = match var("TAXRATE_CACHE_BACKEND") {
            Some(raw) => CacheBackend::parse(&raw).unwrap_or_else(|| {
                warn!("Unknown TAXRATE_CACHE_BACKEND '{}', using dashmap", raw);
                CacheBackend::DashMap
            }),
            None => CacheBackend::DashMap,
        };

        Self {
            host: var("TAXRATE_HOST").unwrap_or_else(|| Self::DEFAULT_HOST.to_string()),
            http_port: var("TAXRATE_HTTP_PORT")
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(Self::DEFAULT_HTTP_PORT),
            license_key,
            lookup_url: var("TAXRATE_LOOKUP_URL")
                .unwrap_or_else(|| Self::DEFAULT_LOOKUP_URL.to_string()),
            lookup_timeout: Duration::from_millis(
                var("TAXRATE_LOOKUP_TIMEOUT_MS")
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(Self::DEFAULT_LOOKUP_TIMEOUT_MS),
            ),
            cache_backend,
            cache_ttl: var("TAXRATE_CACHE_TTL_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            cache_max_entries: var("TAXRATE_CACHE_MAX_ENTRIES")
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|max| *max > 0),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = config_from(&[]);

        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.license_key, None);
        assert_eq!(config.lookup_url, "http://localhost:9090");
        assert_eq!(config.lookup_timeout, Duration::from_millis(5000));
        assert_eq!(config.cache_backend, CacheBackend::DashMap);
        assert_eq!(config.cache_ttl, None);
        assert_eq!(config.cache_max_entries, None);
    }

    #[test]
    fn test_reads_all_variables() {
        let config = config_from(&[
            ("TAXRATE_HOST", "127.0.0.1"),
            ("TAXRATE_HTTP_PORT", "9000"),
            ("TAXRATE_LICENSE_KEY", "abc-123"),
            ("TAXRATE_LOOKUP_URL", "https://rates.example.com"),
            ("TAXRATE_LOOKUP_TIMEOUT_MS", "250"),
            ("TAXRATE_CACHE_BACKEND", "Moka"),
            ("TAXRATE_CACHE_TTL_SECS", "3600"),
            ("TAXRATE_CACHE_MAX_ENTRIES", "1000"),
        ]);

        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
        assert_eq!(config.license_key.as_deref(), Some("abc-123"));
        assert_eq!(config.lookup_url, "https://rates.example.com");
        assert_eq!(config.lookup_timeout, Duration::from_millis(250));
        assert_eq!(config.cache_backend, CacheBackend::Moka);
        assert_eq!(config.cache_ttl, Some(Duration::from_secs(3600)));
        assert_eq!(config.cache_max_entries, Some(1000));
    }

    #[test]
    fn test_invalid_values_fall_back_to_defaults() {
        let config = config_from(&[
            ("TAXRATE_HTTP_PORT", "not-a-port"),
            ("TAXRATE_LICENSE_KEY", "   "),
            ("TAXRATE_CACHE_BACKEND", "redis"),
            ("TAXRATE_CACHE_TTL_SECS", "0"),
        ]);

        assert_eq!(config.http_port, 8080);
        assert_eq!(config.license_key, None);
        assert_eq!(config.cache_backend, CacheBackend::DashMap);
        assert_eq!(config.cache_ttl, None);
    }
}
