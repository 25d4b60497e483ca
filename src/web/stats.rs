//! Page Cache Statistics Module
//!
//! Tracks page cache performance metrics: hits, misses, and the derived hit
//! rate. Process-local; not persisted in the backing store.

use serde::Serialize;

// == Fetch Stats ==
/// Tracks page cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FetchStats {
    /// Number of calls served from the cache
    pub hits: u64,
    /// Number of calls that required a network fetch
    pub misses: u64,
}

impl FetchStats {
    // == Constructor ==
    /// Creates a new FetchStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }
}
