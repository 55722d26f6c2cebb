use async_trait::async_trait;
use moka::future::Cache;
use std::fmt::Debug;
use std::time::Duration;
use taxrate::domain::RateEntry;
use taxrate::ports::RateStore;

/// Moka-based rate store with optional size bound and TTL.
/// Expired entries read as misses, so the next request fetches a fresh rate.
pub struct MokaRateStore {
    cache: Cache<String, RateEntry>,
}

impl MokaRateStore {
    pub fn new(max_entries: Option<u64>, ttl: Option<Duration>) -> Self {
        let mut builder = Cache::builder().name("tax-rates");

        if let Some(capacity) = max_entries {
            builder = builder.max_capacity(capacity);
        }

        if let Some(ttl) = ttl {
            builder = builder.time_to_live(ttl);
        }

        Self {
            cache: builder.build(),
        }
    }

    /// Create a new unbounded Moka store, entries never expire
    pub fn new_unbounded() -> Self {
        Self::new(None, None)
    }
}

#[async_trait]
impl RateStore for MokaRateStore {
    async fn get(&self, index: &str) -> Option<RateEntry> {
        self.cache.get(index).await
    }

    async fn insert(&self, index: String, entry: RateEntry) {
        self.cache.insert(index, entry).await;
    }

    async fn clear(&self) {
        // invalidate_all is lazy and leaves the count stale, drop keys one by one instead
        let indexes: Vec<_> = self.cache.iter().map(|(index, _)| index).collect();
        for index in indexes {
            self.cache.invalidate(index.as_str()).await;
        }
        self.cache.run_pending_tasks().await;
    }

    // Moka only refreshes its count during maintenance, so flush pending writes first
    async fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }
}

impl Debug for MokaRateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaRateStore")
            .field("entry_count", &self.cache.entry_count())
            .field("weighted_size", &self.cache.weighted_size())
            .finish()
    }
}
