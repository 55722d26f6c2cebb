use async_trait::async_trait;
use dashmap::DashMap;
use std::fmt::Debug;
use taxrate::domain::RateEntry;
use taxrate::ports::RateStore;

/// Sharded concurrent map of rates with no expiry.
/// Entries stay until the store is cleared or the process exits.
#[derive(Default)]
pub struct DashMapRateStore {
    entries: DashMap<String, RateEntry>,
}

impl DashMapRateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RateStore for DashMapRateStore {
    async fn get(&self, index: &str) -> Option<RateEntry> {
        // Clone out so no shard guard outlives this call
        self.entries.get(index).map(|entry| entry.value().clone())
    }

    async fn insert(&self, index: String, entry: RateEntry) {
        self.entries.insert(index, entry);
    }

    async fn clear(&self) {
        self.entries.clear();
    }

    async fn entry_count(&self) -> u64 {
        self.entries.len() as u64
    }
}

impl Debug for DashMapRateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashMapRateStore")
            .field("entry_count", &self.entries.len())
            .finish()
    }
}
