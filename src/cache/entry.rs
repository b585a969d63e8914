//! Cache Entry Module
//!
//! Defines the structure for individual cache entries and their size limits.

use crate::cache::MAX_ENTRY_CHARS;
use crate::error::{CacheError, Result};

// == Cache Entry ==
/// Represents a single stored value with its recency stamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// The stored value
    pub value: String,
    /// Logical clock stamp of the last recency-updating access
    pub recency: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry stamped with `recency`.
    pub fn new(value: String, recency: u64) -> Self {
        Self { value, recency }
    }
}

// == Validation ==
/// Checks that a key and value are both 1 to `MAX_ENTRY_CHARS` characters long.
///
/// Length is counted in characters, not bytes.
pub fn validate(key: &str, value: &str) -> Result<()> {
    check_field("key", key)?;
    check_field("value", value)
}

fn check_field(field: &str, text: &str) -> Result<()> {
    if text.is_empty() {
        return Err(CacheError::InvalidEntry(format!("{field} must not be empty")));
    }

    let chars = text.chars().count();
    if chars > MAX_ENTRY_CHARS {
        return Err(CacheError::InvalidEntry(format!(
            "{field} '{text}' is {chars} characters, maximum is {MAX_ENTRY_CHARS}"
        )));
    }

    Ok(())
}
