//! cli
//!
//! Command-line interface layer for sdraft.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration and initialise logging
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap, merges them over
//! the loaded [`Config`](crate::core::config::Config) into an
//! [`engine::Context`], and dispatches.

pub mod args;
pub mod commands;

pub use args::Cli;

use crate::core::config::Config;
use crate::engine;
use anyhow::Result;
use log::LevelFilter;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.debug);

    let config = Config::load()?;
    if let Some(path) = config.loaded_from() {
        log::debug!("loaded config from {}", path.display());
    }

    // CLI flags take precedence over config.
    let ctx = engine::Context {
        store_dir: cli.store.clone().unwrap_or_else(|| config.store_dir()),
        pretty: config.pretty(),
        cache: config.cache(),
        debug: cli.debug,
        quiet: cli.quiet,
    };

    commands::dispatch(cli.command, &ctx)
}

/// `--debug` forces debug level; otherwise `RUST_LOG` applies, defaulting to warn.
fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    // A logger may already be installed when embedded.
    let _ = builder.try_init();
}
