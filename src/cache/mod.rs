//! Cache Module
//!
//! Provides bounded in-memory caching with TTL expiration and LRU eviction.

mod entry;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use shared::SharedCache;
pub use stats::{CacheStats, StatsSnapshot};
pub use store::BoundedTtlCache;
