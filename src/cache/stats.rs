//! Cache Statistics Module
//!
//! Counters for lookups and evictions over the life of a store.

use serde::Serialize;

// == Cache Stats ==
/// Lookup and eviction counters for one cache store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// GET lookups that found the key
    pub hits: u64,
    /// GET lookups that printed NULL
    pub misses: u64,
    /// Entries removed by the LRU policy, including writes dropped at bound zero
    pub evictions: u64,
    /// Entries held when the snapshot was taken
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    // == Recording ==
    /// Counts one GET, as a hit when the key was present.
    pub fn record_lookup(&mut self, hit: bool) {
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Hit Rate ==
    /// Fraction of GET lookups that were hits; 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        match self.hits + self.misses {
            0 => 0.0,
            lookups => self.hits as f64 / lookups as f64,
        }
    }
}
