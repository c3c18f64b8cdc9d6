//! store
//!
//! Branch record storage.
//!
//! # Architecture
//!
//! The `BranchStore` trait is the only way the engine reaches branch
//! records. Commands construct a [`FileBranchStore`]; tests use
//! [`mock::MockBranchStore`].
//!
//! # Modules
//!
//! - `branch`: The `Branch` record and `BranchType`
//! - `traits`: Core `BranchStore` trait and `StoreError`
//! - [`file`]: JSON files on disk with a read cache
//! - [`mock`]: In-memory implementation for deterministic testing

mod branch;
pub mod file;
pub mod mock;
mod traits;

pub use branch::{Branch, BranchType};
pub use file::FileBranchStore;
pub use traits::*;
