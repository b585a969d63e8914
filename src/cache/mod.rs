//! Cache Module
//!
//! Provides a bounded in-memory key/value cache with LRU eviction.

mod entry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::{validate, CacheEntry};
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum length of keys and values, in characters
pub const MAX_ENTRY_CHARS: usize = 10;
