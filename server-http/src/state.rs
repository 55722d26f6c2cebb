use rate_lookup::{HttpRateLookup, LookupConfig};
use shared::config::Config;
use std::sync::Arc;
use storage_engine::UnifiedStorageFactory;
use taxrate::domain::StoreConfig;
use taxrate::ports::{RateLookupService, StorageFactory};
use taxrate::RateCache;

/// Server state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub rate_cache: RateCache,
    pub lookup: Arc<dyn RateLookupService>,
}

impl AppState {
    pub fn new(rate_cache: RateCache, lookup: Arc<dyn RateLookupService>) -> Self {
        Self { rate_cache, lookup }
    }

    /// Wire the configured store backend and the HTTP rate lookup
    pub fn from_config(config: &Config) -> shared::Result<Self> {
        let store_config = StoreConfig::new(
            config.cache_backend,
            config.cache_ttl,
            config.cache_max_entries,
        );
        let store = UnifiedStorageFactory.create_from_config(&store_config);

        let lookup = HttpRateLookup::new(LookupConfig::from(config))?;
        tracing::info!("Rate lookup configured against {}", config.lookup_url);

        Ok(Self::new(RateCache::new(store), Arc::new(lookup)))
    }
}
