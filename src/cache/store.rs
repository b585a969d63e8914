//! Cache Store Module
//!
//! Main cache engine combining ordered key storage with LRU tracking and a
//! capacity bound.

use std::collections::BTreeMap;

use tracing::debug;

use crate::cache::{validate, CacheEntry, CacheStats, LruTracker};
use crate::config::{BoundPolicy, Config};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Main cache storage with LRU eviction and a capacity bound.
///
/// Entries are kept in key order so that dumps need no sorting.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage, ordered by key
    entries: BTreeMap<String, CacheEntry>,
    /// LRU access tracker
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    bound: usize,
    /// Whether lowering the bound evicts immediately
    policy: BoundPolicy,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore with the given bound and lazy bound policy.
    pub fn new(bound: usize) -> Self {
        Self::with_policy(bound, BoundPolicy::Lazy)
    }

    /// Creates a new CacheStore with an explicit bound policy.
    pub fn with_policy(bound: usize, policy: BoundPolicy) -> Self {
        Self {
            entries: BTreeMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            bound,
            policy,
        }
    }

    /// Creates a new CacheStore from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::with_policy(config.default_bound, config.bound_policy)
    }

    // == Set Bound ==
    /// Changes the capacity bound.
    ///
    /// Negative bounds are rejected with `InvalidBound` and leave the store
    /// untouched. Under `BoundPolicy::Lazy` a smaller bound evicts nothing
    /// until the next `set`; under `BoundPolicy::Eager` surplus entries are
    /// evicted right away.
    pub fn set_bound(&mut self, bound: i64) -> Result<()> {
        if bound < 0 {
            return Err(CacheError::InvalidBound(bound));
        }

        self.bound = usize::try_from(bound).unwrap_or(usize::MAX);
        if self.policy == BoundPolicy::Eager {
            self.evict_down_to(self.bound);
        }

        Ok(())
    }

    // == Set ==
    /// Stores a key-value pair.
    ///
    /// Eviction runs before the write: if the store is at its bound, least
    /// recently used entries are evicted until one slot is free. This applies
    /// to overwrites as well as new keys, so an overwrite at capacity may
    /// evict the key being written, which is then inserted afresh. The written
    /// entry becomes the most recently used. With a bound of zero the write
    /// is dropped as soon as it arrives.
    ///
    /// Fails with `InvalidEntry` if the key or value is empty or longer than
    /// `MAX_ENTRY_CHARS`; nothing is mutated in that case.
    pub fn set(&mut self, key: String, value: String) -> Result<()> {
        validate(&key, &value)?;

        if self.bound == 0 {
            self.evict_down_to(0);
            self.stats.record_eviction();
            debug!(key = %key, "bound is zero, dropping write");
            return Ok(());
        }

        self.evict_down_to(self.bound - 1);
        match self.entries.get_mut(&key) {
            Some(entry) => {
                entry.value = value;
                entry.recency = self.lru.touch(&key, Some(entry.recency));
            }
            None => {
                let recency = self.lru.touch(&key, None);
                self.entries.insert(key, CacheEntry::new(value, recency));
            }
        }

        Ok(())
    }

    // == Get ==
    /// Retrieves a value by key and marks the entry as most recently used.
    ///
    /// Returns None if the key is absent.
    pub fn get(&mut self, key: &str) -> Option<&str> {
        let entry = self.entries.get_mut(key);
        self.stats.record_lookup(entry.is_some());

        let entry = entry?;
        entry.recency = self.lru.touch(key, Some(entry.recency));
        Some(entry.value.as_str())
    }

    // == Peek ==
    /// Retrieves a value by key without touching its recency.
    pub fn peek(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|entry| entry.value.as_str())
    }

    // == Dump ==
    /// Iterates over all entries in ascending key order.
    pub fn dump(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries
            .iter()
            .map(|(key, entry)| (key.as_str(), entry.value.as_str()))
    }

    // == Stats ==
    /// Returns a snapshot of the counters with the current entry count.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            total_entries: self.entries.len(),
            ..self.stats.clone()
        }
    }

    // == Accessors ==
    /// Returns the current capacity bound.
    pub fn bound(&self) -> usize {
        self.bound
    }

    /// Returns how surplus entries are handled when the bound is lowered.
    pub fn policy(&self) -> BoundPolicy {
        self.policy
    }

    /// Returns true if `key` is stored. Does not touch recency.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Eviction ==
    /// Evicts least recently used entries until at most `limit` remain.
    fn evict_down_to(&mut self, limit: usize) {
        while self.entries.len() > limit {
            let Some(key) = self.lru.evict_oldest() else {
                break;
            };
            self.entries.remove(&key);
            self.stats.record_eviction();
            debug!(key = %key, bound = self.bound, "evicted least recently used entry");
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn set(store: &mut CacheStore, key: &str, value: &str) {
        store.set(key.to_string(), value.to_string()).unwrap();
    }

    fn dumped(store: &CacheStore) -> Vec<(String, String)> {
        store
            .dump()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_store_new() {
        let store = CacheStore::new(100);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.bound(), 100);
        assert_eq!(store.policy(), BoundPolicy::Lazy);
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = CacheStore::new(100);

        set(&mut store, "key1", "value1");

        assert_eq!(store.get("key1"), Some("value1"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = CacheStore::new(100);
        assert_eq!(store.get("nonexistent"), None);
        assert_eq!(store.peek("nonexistent"), None);
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = CacheStore::new(100);

        set(&mut store, "key1", "value1");
        set(&mut store, "key1", "value2");

        assert_eq!(store.get("key1"), Some("value2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_overwrite_refreshes_recency() {
        let mut store = CacheStore::new(3);

        set(&mut store, "a", "1");
        set(&mut store, "b", "2");
        set(&mut store, "c", "3");
        // overwriting a makes b the oldest
        set(&mut store, "a", "4");
        set(&mut store, "d", "5");

        assert!(store.contains("a"));
        assert!(!store.contains("b"));
        assert!(store.contains("c"));
        assert_eq!(store.peek("a"), Some("4"));
    }

    #[test]
    fn test_store_overwrite_at_capacity_evicts_first() {
        let mut store = CacheStore::new(2);

        set(&mut store, "a", "1");
        set(&mut store, "b", "2");
        set(&mut store, "b", "3");

        // a is the least recently used entry when the store is full
        assert_eq!(store.len(), 1);
        assert!(!store.contains("a"));
        assert_eq!(store.peek("b"), Some("3"));
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_overwrite_at_capacity_may_evict_itself() {
        let mut store = CacheStore::new(2);

        set(&mut store, "a", "1");
        set(&mut store, "b", "2");
        set(&mut store, "a", "3");

        // a was oldest, so it is evicted and written again as a new entry
        assert_eq!(
            dumped(&store),
            vec![
                ("a".to_string(), "3".to_string()),
                ("b".to_string(), "2".to_string())
            ]
        );
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_overwrite_below_capacity_evicts_nothing() {
        let mut store = CacheStore::new(3);

        set(&mut store, "a", "1");
        set(&mut store, "b", "2");
        set(&mut store, "b", "3");

        assert_eq!(store.len(), 2);
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_store_lru_eviction() {
        let mut store = CacheStore::new(3);

        set(&mut store, "key1", "value1");
        set(&mut store, "key2", "value2");
        set(&mut store, "key3", "value3");

        // Cache is full, adding key4 should evict key1 (oldest)
        set(&mut store, "key4", "value4");

        assert_eq!(store.len(), 3);
        assert_eq!(store.get("key1"), None);
        assert!(store.get("key2").is_some());
        assert!(store.get("key3").is_some());
        assert!(store.get("key4").is_some());
    }

    #[test]
    fn test_store_lru_touch_on_get() {
        let mut store = CacheStore::new(3);

        set(&mut store, "key1", "value1");
        set(&mut store, "key2", "value2");
        set(&mut store, "key3", "value3");

        // Access key1 to make it most recently used
        store.get("key1");

        // Adding key4 should evict key2 (now oldest)
        set(&mut store, "key4", "value4");

        assert!(store.contains("key1"));
        assert!(!store.contains("key2"));
    }

    #[test]
    fn test_store_peek_does_not_touch() {
        let mut store = CacheStore::new(2);

        set(&mut store, "a", "2");
        set(&mut store, "b", "4");
        assert_eq!(store.get("b"), Some("4"));
        assert_eq!(store.peek("a"), Some("2"));
        set(&mut store, "c", "5");

        assert_eq!(store.get("a"), None);
        assert_eq!(
            dumped(&store),
            vec![
                ("b".to_string(), "4".to_string()),
                ("c".to_string(), "5".to_string())
            ]
        );
    }

    #[test]
    fn test_store_dump_sorted() {
        let mut store = CacheStore::new(10);

        set(&mut store, "pear", "3");
        set(&mut store, "apple", "1");
        set(&mut store, "fig", "2");

        let keys: Vec<String> = dumped(&store).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["apple", "fig", "pear"]);
    }

    #[test]
    fn test_store_dump_empty() {
        let store = CacheStore::new(10);
        assert_eq!(store.dump().count(), 0);
    }

    #[test]
    fn test_store_negative_bound_rejected() {
        let mut store = CacheStore::new(5);
        set(&mut store, "a", "1");

        let result = store.set_bound(-1);
        assert!(matches!(result, Err(CacheError::InvalidBound(-1))));
        assert_eq!(store.bound(), 5);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_zero_bound() {
        let mut store = CacheStore::new(2);
        store.set_bound(0).unwrap();

        set(&mut store, "a", "1");

        assert!(store.is_empty());
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_lazy_bound_lowering() {
        let mut store = CacheStore::new(3);

        set(&mut store, "a", "1");
        set(&mut store, "b", "2");
        set(&mut store, "c", "3");
        store.set_bound(1).unwrap();

        // nothing is evicted until the next insertion
        assert_eq!(store.len(), 3);

        store.get("a");
        set(&mut store, "d", "4");

        assert_eq!(store.len(), 1);
        assert!(store.contains("d"));
    }

    #[test]
    fn test_store_lazy_bound_enforced_on_overwrite() {
        let mut store = CacheStore::new(3);

        set(&mut store, "a", "1");
        set(&mut store, "b", "2");
        set(&mut store, "c", "3");
        store.set_bound(2).unwrap();
        set(&mut store, "c", "9");

        // room for one write is made before overwriting c
        assert_eq!(store.len(), 1);
        assert!(!store.contains("a"));
        assert!(!store.contains("b"));
        assert_eq!(store.peek("c"), Some("9"));
    }

    #[test]
    fn test_store_eager_bound_lowering() {
        let mut store = CacheStore::with_policy(3, BoundPolicy::Eager);

        set(&mut store, "a", "1");
        set(&mut store, "b", "2");
        set(&mut store, "c", "3");
        store.get("a");
        store.set_bound(2).unwrap();

        assert_eq!(store.len(), 2);
        assert!(store.contains("a"));
        assert!(!store.contains("b"));
        assert!(store.contains("c"));
    }

    #[test]
    fn test_store_invalid_entry_does_not_mutate() {
        let mut store = CacheStore::new(1);
        set(&mut store, "a", "1");

        let result = store.set("toolongkey11".to_string(), "v".to_string());

        assert!(matches!(result, Err(CacheError::InvalidEntry(_))));
        assert!(store.contains("a"));
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_store_stats() {
        let mut store = CacheStore::new(100);

        set(&mut store, "key1", "value1");
        store.get("key1"); // hit
        store.get("nonexistent"); // miss
        store.peek("key1");

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_store_from_config() {
        let config = Config {
            default_bound: 4,
            bound_policy: BoundPolicy::Eager,
            strict: false,
        };
        let store = CacheStore::from_config(&config);

        assert_eq!(store.bound(), 4);
        assert_eq!(store.policy(), BoundPolicy::Eager);
    }
}
