//! Boundcache - a bounded key/value cache with LRU eviction
//!
//! Stores short string keys and values, evicts the least recently used entry
//! when the bound is reached, and is driven by a line-oriented command stream.

pub mod cache;
pub mod command;
pub mod config;
pub mod error;

pub use cache::CacheStore;
pub use command::{Command, Interpreter, RunSummary};
pub use config::{BoundPolicy, Config};
pub use error::{CacheError, Result};
