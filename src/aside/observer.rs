//! Hit/miss observers for the cache-aside wrapper.

use std::fmt::Debug;

use tracing::{debug, info};

/// Receives cache-aside lookup outcomes.
pub trait CacheObserver<K: ?Sized>: Send + Sync {
    fn on_hit(&self, key: &K);
    fn on_miss(&self, key: &K);
}

/// Logs hits at debug level and misses at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl<K: Debug + ?Sized> CacheObserver<K> for TracingObserver {
    fn on_hit(&self, key: &K) {
        debug!("Cache HIT for key: {:?}", key);
    }

    fn on_miss(&self, key: &K) {
        info!("Cache MISS for key: {:?}", key);
    }
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl<K: ?Sized> CacheObserver<K> for NoopObserver {
    fn on_hit(&self, _key: &K) {}

    fn on_miss(&self, _key: &K) {}
}
