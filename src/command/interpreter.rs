//! Command Interpreter
//!
//! Applies parsed commands to a [`CacheStore`] and writes their output lines.

use std::io::{BufRead, BufWriter, Write};

use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, debug_span, info, warn};

use crate::cache::CacheStore;
use crate::command::{Command, NULL_VALUE};
use crate::config::Config;
use crate::error::{CacheError, Result};

// == Run Summary ==
/// Counts of how the lines of a command stream were handled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Commands applied to the store
    pub commands: u64,
    /// Lines skipped because the operation name was not recognized
    pub ignored: u64,
    /// Commands refused with a recoverable error
    pub rejected: u64,
}

// == Interpreter ==
/// Drives a cache store from text commands.
///
/// The interpreter owns its store for the whole run. Output is written one
/// line per GET/PEEK and one line per entry for DUMP.
#[derive(Debug)]
pub struct Interpreter {
    store: CacheStore,
    /// Malformed commands abort the run instead of being skipped
    strict: bool,
    summary: RunSummary,
}

impl Interpreter {
    // == Constructor ==
    /// Creates an interpreter around `store` that skips malformed commands.
    pub fn new(store: CacheStore) -> Self {
        Self {
            store,
            strict: false,
            summary: RunSummary::default(),
        }
    }

    /// Sets whether malformed commands are fatal.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Creates an interpreter and its store from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(CacheStore::from_config(config)).with_strict(config.strict)
    }

    // == Accessors ==
    /// Returns the store driven by this interpreter.
    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    /// Returns the line counts accumulated so far.
    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    // == Report ==
    /// Builds the statistics report printed by `--stats`.
    pub fn report(&self, summary: &RunSummary) -> Value {
        let stats = self.store.stats();
        json!({
            "bound": self.store.bound(),
            "bound_policy": self.store.policy(),
            "hit_rate": stats.hit_rate(),
            "cache": stats,
            "run": summary,
        })
    }

    // == Execute ==
    /// Applies one command and writes its output, if any.
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<()> {
        match command {
            Command::Bound(bound) => self.store.set_bound(bound)?,
            Command::Set { key, value } => self.store.set(key, value)?,
            Command::Get(key) => {
                let value = self.store.get(&key).unwrap_or(NULL_VALUE);
                writeln!(out, "{value}")?;
            }
            Command::Peek(key) => {
                let value = self.store.peek(&key).unwrap_or(NULL_VALUE);
                writeln!(out, "{value}")?;
            }
            Command::Dump => {
                for (key, value) in self.store.dump() {
                    writeln!(out, "{key} {value}")?;
                }
            }
        }
        Ok(())
    }

    // == Execute Line ==
    /// Parses and applies one command line.
    ///
    /// Unrecognized operations are ignored. Invalid entries, and malformed
    /// commands outside strict mode, are logged and skipped. Any other error
    /// is returned and should end the run.
    pub fn execute_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<()> {
        let outcome = match Command::parse(line) {
            Ok(Some(command)) => self.execute(command, out).map(|()| true),
            Ok(None) => Ok(false),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(true) => self.summary.commands += 1,
            Ok(false) => self.summary.ignored += 1,
            Err(e) if self.skippable(&e) => {
                warn!(error = %e, "skipping command");
                self.summary.rejected += 1;
            }
            Err(e) => return Err(e),
        }

        Ok(())
    }

    fn skippable(&self, error: &CacheError) -> bool {
        match error {
            CacheError::MalformedCommand(_) => !self.strict,
            other => other.is_recoverable(),
        }
    }

    // == Run ==
    /// Processes a whole command stream.
    ///
    /// The first non-blank line is the command count; it is not used as a
    /// limit and the input is read to the end. If that line is not an
    /// integer it is processed as a command. Blank lines are skipped.
    ///
    /// Output is buffered and flushed before returning, including when a
    /// fatal error stops the run early.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: W) -> Result<RunSummary> {
        let mut out = BufWriter::new(out);
        let mut header_seen = false;

        for (index, line) in input.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if !header_seen {
                header_seen = true;
                match line.parse::<u64>() {
                    Ok(count) => {
                        debug!(count = count, "read command count header");
                        continue;
                    }
                    Err(_) => warn!(
                        line = %line,
                        "missing command count header, treating first line as a command"
                    ),
                }
            }

            let _span = debug_span!("line", number = index + 1).entered();
            if let Err(e) = self.execute_line(line, &mut out) {
                out.flush()?;
                return Err(e);
            }
        }

        out.flush()?;
        info!(
            commands = self.summary.commands,
            ignored = self.summary.ignored,
            rejected = self.summary.rejected,
            entries = self.store.len(),
            "command stream finished"
        );
        Ok(self.summary.clone())
    }
}
