//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for cache eviction.

use std::collections::BTreeMap;

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Every touch draws a fresh stamp from a monotonically increasing logical
/// clock. Keys are indexed by stamp in a BTreeMap where:
/// - First = Least recently used (smallest stamp)
/// - Last = Most recently used
///
/// Stamps are unique, so there are no ties between candidates.
#[derive(Debug, Default)]
pub struct LruTracker {
    /// Next stamp to hand out
    clock: u64,
    /// Keys ordered by the stamp of their last touch
    order: BTreeMap<u64, String>,
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self {
            clock: 0,
            order: BTreeMap::new(),
        }
    }

    // == Touch ==
    /// Marks a key as most recently used and returns its new stamp.
    ///
    /// `previous` is the stamp the key was last touched with, if it is
    /// already tracked; that slot is released first.
    pub fn touch(&mut self, key: &str, previous: Option<u64>) -> u64 {
        if let Some(stamp) = previous {
            self.order.remove(&stamp);
        }

        let stamp = self.clock;
        self.clock += 1;
        self.order.insert(stamp, key.to_string());
        stamp
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<String> {
        self.order.pop_first().map(|(_, key)| key)
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if no keys are tracked.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
