//! Command Parser
//!
//! Turns one input line into a typed [`Command`].

use tracing::debug;

use crate::error::{CacheError, Result};

// == Command ==
/// A single validated cache operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `BOUND n`
    Bound(i64),
    /// `SET key value`
    Set { key: String, value: String },
    /// `GET key`
    Get(String),
    /// `PEEK key`
    Peek(String),
    /// `DUMP`
    Dump,
}

impl Command {
    // == Parse ==
    /// Parses a command line of the form `OPNAME arg1 [arg2]`.
    ///
    /// Returns `Ok(None)` for blank lines and unrecognized operation names;
    /// those are skipped rather than treated as errors. Wrong argument counts
    /// and a non-integer `BOUND` argument fail with `MalformedCommand`.
    /// Integer `BOUND` arguments outside the `i64` range saturate, so any
    /// negative bound still reaches the store and is rejected there.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let mut tokens = line.split_ascii_whitespace();
        let Some(op) = tokens.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = tokens.collect();

        let arity = match op {
            "BOUND" | "GET" | "PEEK" => 1,
            "SET" => 2,
            "DUMP" => 0,
            _ => {
                debug!(op = %op, "ignoring unrecognized operation");
                return Ok(None);
            }
        };

        if args.len() != arity {
            return Err(CacheError::MalformedCommand(format!(
                "{op} takes {arity} argument(s), got {}: '{}'",
                args.len(),
                line.trim()
            )));
        }

        let command = match op {
            "BOUND" => Command::Bound(parse_bound(args[0])?),
            "SET" => Command::Set {
                key: args[0].to_string(),
                value: args[1].to_string(),
            },
            "GET" => Command::Get(args[0].to_string()),
            "PEEK" => Command::Peek(args[0].to_string()),
            _ => Command::Dump,
        };

        Ok(Some(command))
    }
}

// == Bound Argument ==
/// Parses a `BOUND` argument, saturating integers too large for `i64`.
fn parse_bound(arg: &str) -> Result<i64> {
    if let Ok(bound) = arg.parse::<i64>() {
        return Ok(bound);
    }

    let (negative, digits) = match arg.as_bytes().first() {
        Some(b'-') => (true, &arg[1..]),
        Some(b'+') => (false, &arg[1..]),
        _ => (false, arg),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CacheError::MalformedCommand(format!(
            "BOUND argument '{arg}' is not an integer"
        )));
    }

    Ok(if negative { i64::MIN } else { i64::MAX })
}
