//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and evictions.

use std::fmt;

use serde::Serialize;

// == Cache Stats ==
/// Cumulative counters, reset only by `clear`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key absent or expired)
    pub misses: u64,
    /// Number of entries evicted due to capacity pressure
    pub evictions: u64,
    /// Number of expired entries reaped on access or by purge
    pub expirations: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of `get` calls observed.
    pub fn total(&self) -> u64 {
        self.hits + self.misses
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate as a percentage.
    ///
    /// Returns hits / (hits + misses) * 100, or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64 * 100.0
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }

    /// Builds a point-in-time snapshot for the given occupancy.
    pub fn snapshot(&self, size: usize, max_size: usize) -> StatsSnapshot {
        StatsSnapshot {
            hits: self.hits,
            misses: self.misses,
            total: self.total(),
            hit_rate: self.hit_rate(),
            evictions: self.evictions,
            expirations: self.expirations,
            size,
            max_size,
        }
    }
}

// == Stats Snapshot ==
/// Point-in-time view of the cache returned by `stats()`.
///
/// `size` counts physically stored entries, so it may include expired entries
/// that have not been read since their TTL elapsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub total: u64,
    /// Percentage in `0.0..=100.0`
    pub hit_rate: f64,
    pub evictions: u64,
    pub expirations: u64,
    pub size: usize,
    pub max_size: usize,
}

impl StatsSnapshot {
    /// Hit rate formatted with two decimals, e.g. `"66.67%"`.
    pub fn hit_rate_display(&self) -> String {
        format!("{:.2}%", self.hit_rate)
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={} misses={} total={} hit_rate={} size={}/{} evictions={} expirations={}",
            self.hits,
            self.misses,
            self.total,
            self.hit_rate_display(),
            self.size,
            self.max_size,
            self.evictions,
            self.expirations
        )
    }
}
