//! engine
//!
//! Drives an editing session: Resolve -> Build -> (edit) -> Flatten -> Validate.
//!
//! # Architecture
//!
//! The engine is the only layer that touches a branch store. Everything
//! below it in `core` is a pure, synchronous tree transform; the engine adds
//! the one awaited fetch (baseline resolution) and persistence on commit.
//!
//! # Invariants
//!
//! - A personal draft's parent is always fetched with the cache bypassed
//! - Store failures propagate unchanged; nothing here retries
//! - Flattening and validation never fail
//!
//! # Example
//!
//! ```
//! use schemadraft::core::metadata::DatabaseMetadata;
//! use schemadraft::engine::EditSession;
//! use schemadraft::store::mock::MockBranchStore;
//! use schemadraft::store::Branch;
//!
//! # tokio_test::block_on(async {
//! let store = MockBranchStore::with_branches(vec![Branch::main("main", DatabaseMetadata::default())]);
//! let session = EditSession::open(&store, "main").await.unwrap();
//! let outcome = session.flatten();
//! assert!(outcome.violations.is_empty());
//! # });
//! ```

pub mod baseline;
pub mod session;

pub use baseline::resolve_baseline_metadata;
pub use session::{EditSession, FlattenOutcome, SessionError};

use std::path::PathBuf;

use crate::store::FileBranchStore;
use crate::ui::output::Verbosity;

/// Execution context for commands, built from config and CLI flags.
#[derive(Debug, Clone)]
pub struct Context {
    /// Directory of the branch store.
    pub store_dir: PathBuf,
    /// Pretty-print JSON output.
    pub pretty: bool,
    /// Allow cached branch reads.
    pub cache: bool,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from(crate::core::config::DEFAULT_STORE_DIR),
            pretty: true,
            cache: true,
            debug: false,
            quiet: false,
        }
    }
}

impl Context {
    /// The branch store this context points at.
    pub fn store(&self) -> FileBranchStore {
        let store = FileBranchStore::new(self.store_dir.clone());
        if self.cache {
            store
        } else {
            store.without_cache()
        }
    }

    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }
}
