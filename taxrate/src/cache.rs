use crate::domain::{JurisdictionKey, RateEntry};
use crate::ports::{RateLookupService, RateStore};
use rust_decimal::Decimal;
use shared::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Read-through cache of tax rates.
///
/// A hit is served from the store without touching the rate service. A miss calls the
/// rate service and stores the rate only once the call has succeeded, so failures are
/// never cached and are retried by the next caller. Concurrent misses on the same key
/// may each reach the rate service.
#[derive(Clone)]
pub struct RateCache {
    store: Arc<dyn RateStore>,
}

impl RateCache {
    pub fn new(store: Arc<dyn RateStore>) -> Self {
        Self { store }
    }

    /// Return the rate for `key`, calling `lookup` only on a cache miss.
    ///
    /// `key` is expected to be validated already. Errors from `lookup` are returned
    /// unchanged and nothing is stored for them.
    pub async fn get_rate(
        &self,
        key: &JurisdictionKey,
        lookup: &dyn RateLookupService,
    ) -> Result<Decimal> {
        let index = key.cache_index();

        if let Some(entry) = self.store.get(&index).await {
            debug!("Rate cache hit for '{}'", index);
            return Ok(entry.rate);
        }

        debug!("Rate cache miss for '{}', calling rate service", index);

        // No store lock is held across the remote call
        let rate = match lookup.fetch_rate(key).await {
            Ok(rate) => rate,
            Err(e) => {
                warn!("Rate lookup for '{}' failed: {}", index, e);
                return Err(e);
            }
        };

        self.store
            .insert(index.clone(), RateEntry::new(key.clone(), rate))
            .await;
        info!("Cached rate {} for '{}'", rate, index);

        Ok(rate)
    }

    /// Peek at the stored entry without calling the rate service
    pub async fn cached(&self, key: &JurisdictionKey) -> Option<RateEntry> {
        self.store.get(&key.cache_index()).await
    }

    pub async fn clear(&self) {
        self.store.clear().await;
        info!("Rate cache cleared");
    }

    pub async fn entry_count(&self) -> u64 {
        self.store.entry_count().await
    }
}

impl std::fmt::Debug for RateCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateCache").finish_non_exhaustive()
    }
}
