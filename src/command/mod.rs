//! Command Module
//!
//! Parses the text command stream and applies it to the cache.

mod interpreter;
mod parser;

pub use interpreter::{Interpreter, RunSummary};
pub use parser::Command;

/// Printed by GET and PEEK when the key is absent
pub const NULL_VALUE: &str = "NULL";
