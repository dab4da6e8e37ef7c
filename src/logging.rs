// src/logging.rs
// =============================================================================
// Sets up the tracing subscriber.
//
// Logs go to stderr so that stdout only ever carries the ranking (table or
// JSON). RUST_LOG, when set, replaces the level picked from the flags.
// =============================================================================

use anyhow::{anyhow, Result};
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

/// Level chosen by the command-line flags
pub fn level_for(cli: &Cli) -> Level {
    if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    }
}

/// Installs the global subscriber. Call once, before anything logs.
pub fn init(cli: &Cli) -> Result<()> {
    let level = level_for(cli);
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to set up logging: {}", e))
}
