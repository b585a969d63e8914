//! Error types for the cache and command interpreter
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache and its command interpreter.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Negative capacity bound
    #[error("Invalid bound: {0} (bound must be non-negative)")]
    InvalidBound(i64),

    /// Key or value empty or longer than the entry limit
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    /// Wrong argument count or unparsable numeric argument
    #[error("Malformed command: {0}")]
    MalformedCommand(String),

    /// Failure reading commands or writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CacheError {
    // == Recoverability ==
    /// Returns true if the interpreter may skip the offending command and go on.
    ///
    /// `MalformedCommand` is recoverable here; strict mode upgrades it to fatal
    /// at the interpreter level.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CacheError::InvalidEntry(_) | CacheError::MalformedCommand(_)
        )
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
