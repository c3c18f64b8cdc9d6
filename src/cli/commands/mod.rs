//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Reads its input documents
//! 2. Calls into `core` or the `engine`
//! 3. Formats and displays output
//!
//! # Async Commands
//!
//! Branch store commands (baseline, open, commit) are async because the
//! store is. Their handlers build a `tokio` runtime and block on it.

mod branch;
mod files;
mod flatten;
mod rebuild;
mod status;
mod validate;

// Re-export command functions for testing and direct invocation
pub use branch::{baseline, commit, open};
pub use flatten::flatten;
pub use rebuild::rebuild;
pub use status::status;
pub use validate::validate;

use crate::cli::args::Command;
use crate::engine::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        // Offline commands
        Command::Validate { metadata } => validate(ctx, &metadata),
        Command::Rebuild { target, tree } => rebuild(ctx, &target, tree.as_deref()),
        Command::Flatten { tree, metadata } => flatten(ctx, &tree, &metadata),
        Command::Status { tree, target } => status(ctx, &tree, target.as_deref()),

        // Branch store commands
        Command::Baseline { branch } => baseline(ctx, &branch),
        Command::Open { branch } => open(ctx, &branch),
        Command::Commit { branch, tree } => commit(ctx, &branch, &tree),
    }
}
