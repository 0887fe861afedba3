//! Cache-Aside Module
//!
//! Wraps an arbitrary async fetch function so lookups go through a cache first.

mod cached_fetch;
mod observer;

pub use cached_fetch::CachedFetch;
pub use observer::{CacheObserver, NoopObserver, TracingObserver};
