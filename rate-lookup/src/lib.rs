mod http_lookup;

pub use http_lookup::{HttpRateLookup, LookupConfig};
