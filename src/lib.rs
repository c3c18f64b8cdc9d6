//! schemadraft - Schema branch reconciliation
//!
//! Lets a user edit a database schema offline on a branch and keep that
//! edit session consistent as the branch's authoritative schema changes,
//! then flatten the session back into canonical metadata.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates)
//! - [`engine`] - Editing sessions: baseline resolution, build, flatten, commit
//! - [`store`] - Branch record storage behind an async trait
//! - [`core`] - Canonical metadata, the editable tree, and the pure transforms between them
//! - [`ui`] - Output helpers
//!
//! # Correctness Invariants
//!
//! 1. Rebuilding never aliases or mutates the caller's previous tree
//! 2. Editable ids are unique within their parent collection
//! 3. Dropped entities stay in the tree and never reach canonical output
//! 4. Unresolvable references are skipped, never raised as errors

pub mod cli;
pub mod core;
pub mod engine;
pub mod store;
pub mod ui;
