//! store::traits
//!
//! The branch store contract.
//!
//! # Design
//!
//! The `BranchStore` trait is async because branch storage may sit behind
//! disk or network I/O. Failures are returned, never retried here.

use async_trait::async_trait;
use thiserror::Error;

use super::branch::Branch;

/// Errors from branch store operations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// No branch with the given name.
    #[error("branch not found: {0}")]
    NotFound(String),

    /// Reading or writing the backing storage failed.
    #[error("storage error: {0}")]
    Io(String),

    /// A stored record could not be decoded or encoded.
    #[error("invalid branch record '{name}': {message}")]
    InvalidRecord { name: String, message: String },

    /// The branch name cannot be used as a storage key.
    #[error("invalid branch name: '{0}'")]
    InvalidName(String),
}

/// Lookup and persistence of branch records.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow use across async tasks.
#[async_trait]
pub trait BranchStore: Send + Sync {
    /// Get the store name (e.g., "file", "mock").
    fn name(&self) -> &'static str;

    /// Fetch a branch by name.
    ///
    /// With `use_cache` false the store must bypass any cached copy.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no such branch exists
    /// - `Io` / `InvalidRecord` if the record cannot be read
    async fn fetch_by_name(&self, name: &str, use_cache: bool) -> Result<Branch, StoreError>;

    /// Create or replace a branch record.
    async fn save(&self, branch: &Branch) -> Result<(), StoreError>;
}
