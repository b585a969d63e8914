//! Boundcache - a bounded key/value cache with LRU eviction
//!
//! Reads a command stream from a file or stdin and writes GET/PEEK/DUMP
//! results to stdout.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use boundcache::{BoundPolicy, Config, Interpreter};

#[derive(Parser)]
#[command(name = "boundcache", about = "Run a command stream against a bounded LRU cache")]
struct Cli {
    /// Command file to read. Reads stdin when omitted.
    input: Option<PathBuf>,

    /// Print cache and run statistics as JSON to stderr when done.
    #[arg(long)]
    stats: bool,

    /// Abort on malformed commands instead of skipping them.
    #[arg(long)]
    strict: bool,

    /// Eviction on bound lowering: lazy or eager.
    #[arg(long)]
    bound_policy: Option<BoundPolicy>,
}

/// Main entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber (stderr, so stdout carries only results)
/// 2. Load configuration from environment variables, then apply CLI overrides
/// 3. Run the command stream through a fresh interpreter
/// 4. Optionally report statistics
///
/// A fatal command (negative BOUND, strict-mode malformed command, I/O
/// failure) ends the run with a non-zero exit status.
fn main() -> Result<()> {
    // Defaults to "warn", can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "boundcache=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if cli.strict {
        config.strict = true;
    }
    if let Some(policy) = cli.bound_policy {
        config.bound_policy = policy;
    }
    info!(
        "Configuration loaded: default_bound={}, bound_policy={:?}, strict={}",
        config.default_bound, config.bound_policy, config.strict
    );

    let mut interpreter = Interpreter::from_config(&config);
    let stdout = io::stdout().lock();

    let summary = match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            interpreter.run(BufReader::new(file), stdout)
        }
        None => interpreter.run(io::stdin().lock(), stdout),
    }
    .context("command stream aborted")?;

    if cli.stats {
        let report = interpreter.report(&summary);
        eprintln!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}
