mod dashmap_store;
mod moka_cache;

pub use dashmap_store::DashMapRateStore;
pub use moka_cache::MokaRateStore;

use shared::config::CacheBackend;
use std::sync::Arc;
use taxrate::domain::StoreConfig;
use taxrate::ports::{RateStore, StorageFactory};
use tracing::info;

/// Builds the configured rate store backend
#[derive(Clone, Copy, Debug, Default)]
pub struct UnifiedStorageFactory;

impl StorageFactory for UnifiedStorageFactory {
    fn create_from_config(&self, config: &StoreConfig) -> Arc<dyn RateStore> {
        match config.backend {
            CacheBackend::DashMap => {
                info!("Using dashmap rate store (entries kept until cleared)");
                Arc::new(DashMapRateStore::new())
            }
            CacheBackend::Moka => {
                info!(
                    "Using moka rate store (ttl: {:?}, max entries: {:?})",
                    config.ttl, config.max_entries
                );
                Arc::new(MokaRateStore::new(config.max_entries, config.ttl))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use shared::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use taxrate::RateCache;
    use taxrate::domain::{JurisdictionKey, RateEntry};
    use taxrate::ports::RateLookupService;

    fn backends() -> [StoreConfig; 2] {
        [
            StoreConfig::default(),
            StoreConfig::new(CacheBackend::Moka, None, None),
        ]
    }

    /// 8% for zip 10001 after a short delay, 404 for anything else
    #[derive(Default)]
    struct SlowLookup {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl RateLookupService for SlowLookup {
        async fn fetch_rate(&self, key: &JurisdictionKey) -> shared::Result<Decimal> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            match key.cache_index().as_str() {
                "usa:10001" => Ok(Decimal::new(8, 2)),
                _ => Err(Error::InvalidResponse {
                    code: 404,
                    description: "not found".to_string(),
                }),
            }
        }
    }

    async fn race(
        cache: &RateCache,
        lookup: &Arc<SlowLookup>,
        key: &JurisdictionKey,
    ) -> Vec<shared::Result<Decimal>> {
        let callers = (0..8).map(|_| {
            let cache = cache.clone();
            let lookup = lookup.clone();
            let key = key.clone();
            tokio::spawn(async move { cache.get_rate(&key, lookup.as_ref()).await })
        });

        futures::future::join_all(callers)
            .await
            .into_iter()
            .map(|joined| joined.unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_cache_counts_stored_rates_on_every_backend() {
        for config in backends() {
            let cache = RateCache::new(UnifiedStorageFactory.create_from_config(&config));
            let lookup = SlowLookup::default();
            let key = JurisdictionKey::usa("10001").unwrap();

            cache.get_rate(&key, &lookup).await.unwrap();
            assert_eq!(cache.entry_count().await, 1, "{:?}", config.backend);

            cache.clear().await;
            assert_eq!(cache.entry_count().await, 0, "{:?}", config.backend);
        }
    }

    #[tokio::test]
    async fn test_concurrent_misses_on_every_backend() {
        for config in backends() {
            let cache = RateCache::new(UnifiedStorageFactory.create_from_config(&config));
            let lookup = Arc::new(SlowLookup::default());
            let key = JurisdictionKey::usa("10001").unwrap();

            for result in race(&cache, &lookup, &key).await {
                assert_eq!(result.unwrap(), Decimal::new(8, 2));
            }
            let calls = lookup.calls.load(Ordering::SeqCst);
            assert!((1..=8).contains(&calls), "unexpected upstream calls: {calls}");
            assert_eq!(cache.entry_count().await, 1, "{:?}", config.backend);

            cache.get_rate(&key, lookup.as_ref()).await.unwrap();
            assert_eq!(lookup.calls.load(Ordering::SeqCst), calls);
        }
    }

    #[tokio::test]
    async fn test_concurrent_failures_on_every_backend() {
        for config in backends() {
            let cache = RateCache::new(UnifiedStorageFactory.create_from_config(&config));
            let lookup = Arc::new(SlowLookup::default());
            let key = JurisdictionKey::usa("99999").unwrap();

            for result in race(&cache, &lookup, &key).await {
                assert!(matches!(result, Err(Error::InvalidResponse { code: 404, .. })));
            }
            assert_eq!(lookup.calls.load(Ordering::SeqCst), 8);
            assert_eq!(cache.entry_count().await, 0, "{:?}", config.backend);
            assert!(cache.cached(&key).await.is_none());
        }
    }

    #[tokio::test]
    async fn test_factory_builds_working_stores() {
        let configs = [
            StoreConfig::default(),
            StoreConfig::new(CacheBackend::Moka, Some(Duration::from_secs(60)), Some(10)),
        ];

        for config in configs {
            let store = UnifiedStorageFactory.create_from_config(&config);
            let key = JurisdictionKey::usa("10001").unwrap();
            store
                .insert(key.cache_index(), RateEntry::new(key.clone(), Decimal::new(8, 2)))
                .await;

            let entry = store.get(&key.cache_index()).await.unwrap();
            assert_eq!(entry.rate, Decimal::new(8, 2));
        }
    }
}
