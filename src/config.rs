//! Configuration Module
//!
//! Handles loading run configuration from environment variables.

use std::env;
use std::str::FromStr;

use serde::Serialize;

// == Bound Policy ==
/// What happens to surplus entries when the bound is lowered below the
/// current size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundPolicy {
    /// Surplus entries stay until the next insertion evicts them
    #[default]
    Lazy,
    /// Surplus entries are evicted as soon as the bound is lowered
    Eager,
}

impl FromStr for BoundPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lazy" => Ok(BoundPolicy::Lazy),
            "eager" => Ok(BoundPolicy::Eager),
            other => Err(format!("unknown bound policy: {other} (expected lazy or eager)")),
        }
    }
}

/// Run configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Capacity bound in force before the first BOUND command
    pub default_bound: usize,
    /// Eviction behaviour when the bound shrinks
    pub bound_policy: BoundPolicy,
    /// Treat malformed commands as fatal instead of skipping them
    pub strict: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `LRU_DEFAULT_BOUND` - Initial bound (default: 10)
    /// - `LRU_BOUND_POLICY` - `lazy` or `eager` (default: lazy)
    /// - `LRU_STRICT` - `true`/`1` to abort on malformed commands (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_bound: env::var("LRU_DEFAULT_BOUND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_bound),
            bound_policy: env::var("LRU_BOUND_POLICY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.bound_policy),
            strict: env::var("LRU_STRICT")
                .ok()
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.strict),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_bound: 10,
            bound_policy: BoundPolicy::Lazy,
            strict: false,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
