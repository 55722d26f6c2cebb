#![deny(clippy::all)]

use crate::domain::{JurisdictionKey, RateEntry, StoreConfig};
use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::Result;
use std::sync::Arc;

// Ports are the pluggable extension points for rate sources and rate storage

/// Port for the remote rate service.
/// Implementations adapt whatever protocol the provider speaks and own any timeout.
#[async_trait]
pub trait RateLookupService: Send + Sync + 'static {
    /// Fetch the fractional tax rate for a jurisdiction
    async fn fetch_rate(&self, key: &JurisdictionKey) -> Result<Decimal>;
}

/// Port for the in-memory store behind the rate cache.
/// Must be safe to share between request tasks; reads must not block each other.
#[async_trait]
pub trait RateStore: Send + Sync + 'static {
    async fn get(&self, index: &str) -> Option<RateEntry>;
    async fn insert(&self, index: String, entry: RateEntry);
    async fn clear(&self);
    async fn entry_count(&self) -> u64;
}

/// Port for creating rate storage from configuration
pub trait StorageFactory: Send + Sync + 'static {
    fn create_from_config(&self, config: &StoreConfig) -> Arc<dyn RateStore>;
}
