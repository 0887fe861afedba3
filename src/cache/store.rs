//! Cache Store Module
//!
//! Main cache engine combining access-ordered storage with LRU eviction and
//! lazy TTL expiration.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::time::{Duration, Instant};

use lru::LruCache;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, StatsSnapshot};
use crate::config::CacheConfig;
use crate::error::Result;

// == Bounded TTL Cache ==
/// Bounded cache with LRU eviction and per-entry TTL.
///
/// Entries and their access order live in a single `LruCache`, so a key can
/// never be tracked in one without the other. The inner cache is unbounded;
/// capacity is enforced here so eviction can be counted and logged.
pub struct BoundedTtlCache<K, V> {
    /// Entries ordered from least to most recently used
    entries: LruCache<K, CacheEntry<V>>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_size: usize,
    /// TTL for entries stored without an explicit one
    default_ttl: Duration,
}

impl<K: Hash + Eq, V> BoundedTtlCache<K, V> {
    // == Constructor ==
    /// Creates a new cache with specified capacity and default TTL.
    ///
    /// # Errors
    /// Fails with `InvalidCapacity` when `max_size` is 0 and with `InvalidTtl`
    /// when `default_ttl` is zero.
    pub fn new(max_size: usize, default_ttl: Duration) -> Result<Self> {
        Self::from_config(&CacheConfig {
            max_size,
            default_ttl,
        })
    }

    /// Creates a new cache from a validated configuration.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            entries: LruCache::unbounded(),
            stats: CacheStats::new(),
            max_size: config.max_size,
            default_ttl: config.default_ttl,
        })
    }

    // == Get ==
    /// Retrieves a value by key, marking it most recently used.
    ///
    /// Absent and expired keys both count as a miss and return None. An expired
    /// entry is removed as a side effect.
    pub fn get<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        let now = Instant::now();
        let expired = match self.entries.peek(key) {
            Some(entry) => entry.is_expired_at(now),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.entries.pop(key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            debug!("Reaped expired entry on read, {} entries remain", self.entries.len());
            return None;
        }

        self.stats.record_hit();
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Set ==
    /// Stores a key-value pair with the default TTL.
    pub fn set(&mut self, key: K, value: V) {
        let ttl = self.default_ttl;
        self.set_with_ttl(key, value, ttl);
    }

    /// Stores a key-value pair expiring `ttl` from now.
    ///
    /// If the key already exists, the value is overwritten, the TTL is reset and
    /// the key becomes most recently used without changing the size. If the key
    /// is new and the cache is full, the least recently used entry is evicted
    /// whether or not it has expired. A zero TTL stores an entry that the next
    /// read will reap.
    pub fn set_with_ttl(&mut self, key: K, value: V, ttl: Duration) {
        if !self.entries.contains(&key) && self.entries.len() >= self.max_size {
            if self.entries.pop_lru().is_some() {
                self.stats.record_eviction();
                debug!("Evicted least recently used entry at capacity {}", self.max_size);
            }
        }

        self.entries.put(key, CacheEntry::new(value, ttl, Instant::now()));
    }

    // == Delete ==
    /// Removes an entry by key. Missing keys are ignored.
    ///
    /// Returns true if an entry was removed.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.pop(key).is_some()
    }

    // == Clear ==
    /// Removes every entry and resets all statistics.
    pub fn clear(&mut self) {
        let removed = self.entries.len();
        self.entries.clear();
        self.stats = CacheStats::new();
        debug!("Cleared cache, dropped {} entries", removed);
    }

    // == Stats ==
    /// Returns a snapshot of the current cache statistics.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot(self.entries.len(), self.max_size)
    }

    // == Peek ==
    /// Returns a live value without touching LRU order or statistics.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = Instant::now();
        self.entries
            .peek(key)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| &entry.value)
    }

    /// Returns true if the key is stored and not expired.
    ///
    /// Does not touch LRU order or statistics.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.peek(key).is_some()
    }

    /// Returns how long a live entry has left, or None if absent or expired.
    ///
    /// Entries whose expiry overflowed report `Duration::MAX`.
    pub fn ttl_remaining<Q>(&self, key: &Q) -> Option<Duration>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = Instant::now();
        self.entries
            .peek(key)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| entry.ttl_remaining_at(now).unwrap_or(Duration::MAX))
    }

    // == Length ==
    /// Returns the number of stored entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }
}

impl<K: Hash + Eq + Clone, V> BoundedTtlCache<K, V> {
    // == Purge Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Only runs when called; the cache never sweeps on its own.
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = Instant::now();
        let expired_keys: Vec<K> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();
        for key in &expired_keys {
            self.entries.pop(key);
        }

        self.stats.record_expirations(count);
        if count > 0 {
            debug!("Purged {} expired entries", count);
        }
        count
    }
}

impl<K: Hash + Eq, V> fmt::Debug for BoundedTtlCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedTtlCache")
            .field("len", &self.entries.len())
            .field("max_size", &self.max_size)
            .field("default_ttl", &self.default_ttl)
            .field("stats", &self.stats)
            .finish()
    }
}
