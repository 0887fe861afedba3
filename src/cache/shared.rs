//! Shared Cache Handle
//!
//! Thread-safe handle serializing every operation behind one mutex.

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::cache::{BoundedTtlCache, StatsSnapshot};
use crate::config::CacheConfig;
use crate::error::Result;

/// Cloneable handle to a [`BoundedTtlCache`] shared between threads or tasks.
///
/// `get` reorders and may reap, so reads need exclusive access too. The lock
/// is held for the whole body of each call and never across an await point.
pub struct SharedCache<K, V> {
    inner: Arc<Mutex<BoundedTtlCache<K, V>>>,
}

impl<K, V> Clone for SharedCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K: Hash + Eq, V> SharedCache<K, V> {
    /// Creates a shared cache with the given capacity and default TTL.
    pub fn new(max_size: usize, default_ttl: Duration) -> Result<Self> {
        BoundedTtlCache::new(max_size, default_ttl).map(Self::from_cache)
    }

    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        BoundedTtlCache::from_config(config).map(Self::from_cache)
    }

    /// Wraps an existing cache.
    pub fn from_cache(cache: BoundedTtlCache<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.inner.lock().get(key)
    }

    pub fn set(&self, key: K, value: V) {
        self.inner.lock().set(key, value);
    }

    pub fn set_with_ttl(&self, key: K, value: V, ttl: Duration) {
        self.inner.lock().set_with_ttl(key, value, ttl);
    }

    pub fn delete<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().delete(key)
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.inner.lock().stats()
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Runs `f` with the lock held, for multi-step updates that must not interleave.
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut BoundedTtlCache<K, V>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl<K: Hash + Eq + Clone, V> SharedCache<K, V> {
    pub fn purge_expired(&self) -> usize {
        self.inner.lock().purge_expired()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clones_share_state() {
        let cache: SharedCache<String, u32> = SharedCache::new(10, Duration::from_secs(60)).unwrap();
        let other = cache.clone();

        cache.set("a".to_string(), 1);

        assert_eq!(other.get("a"), Some(1));
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn test_with_lock_is_atomic_read_modify_write() {
        let cache: SharedCache<&'static str, u64> =
            SharedCache::new(4, Duration::from_secs(60)).unwrap();
        cache.set("counter", 0);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        cache.with_lock(|inner| {
                            let current = inner.get("counter").unwrap_or(0);
                            inner.set("counter", current + 1);
                        });
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.get("counter"), Some(800));
    }

    #[test]
    fn test_concurrent_writers_respect_capacity() {
        let cache: SharedCache<String, usize> =
            SharedCache::new(16, Duration::from_secs(60)).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..200 {
                        cache.set(format!("t{}-k{}", t, i % 40), i);
                        cache.get(&format!("t{}-k{}", (t + 1) % 4, i % 40));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let stats = cache.stats();
        assert!(stats.size <= 16);
        assert_eq!(stats.total, 800);
    }

    #[test]
    fn test_purge_expired_through_handle() {
        let cache: SharedCache<String, u32> = SharedCache::new(10, Duration::from_secs(60)).unwrap();
        cache.set_with_ttl("gone".to_string(), 1, Duration::ZERO);
        cache.set("kept".to_string(), 2);

        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.contains("kept"));
        assert!(!cache.is_empty());
    }
}
