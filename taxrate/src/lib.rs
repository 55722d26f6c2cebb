pub mod cache;
pub mod domain;
pub mod ports;

pub use cache::RateCache;
pub use domain::{Country, JurisdictionCode, JurisdictionKey, RateEntry, StoreConfig};
pub use ports::{RateLookupService, RateStore, StorageFactory};
