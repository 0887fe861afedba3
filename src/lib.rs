//! Bounded TTL Cache - An in-memory key/value cache
//!
//! Combines least-recently-used capacity eviction with per-entry TTL
//! expiration, plus a cache-aside wrapper for async fetch functions.

pub mod aside;
pub mod cache;
pub mod config;
pub mod demo;
pub mod error;

pub use aside::{CacheObserver, CachedFetch, NoopObserver, TracingObserver};
pub use cache::{BoundedTtlCache, SharedCache, StatsSnapshot};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
