//! store::mock
//!
//! Mock branch store for deterministic testing.
//!
//! # Design
//!
//! Branches live in memory. Every call is recorded, including its cache
//! flag, and a single operation can be configured to fail.
//!
//! # Example
//!
//! ```
//! use schemadraft::store::mock::{MockBranchStore, MockOperation};
//! use schemadraft::store::{Branch, BranchStore};
//! use schemadraft::core::metadata::DatabaseMetadata;
//!
//! # tokio_test::block_on(async {
//! let store = MockBranchStore::with_branches(vec![Branch::main("main", DatabaseMetadata::default())]);
//!
//! let branch = store.fetch_by_name("main", false).await.unwrap();
//! assert_eq!(branch.name, "main");
//! assert!(matches!(
//!     &store.operations()[0],
//!     MockOperation::FetchByName { use_cache: false, .. }
//! ));
//! # });
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::branch::Branch;
use super::traits::{BranchStore, StoreError};

/// Mock branch store for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone, Default)]
pub struct MockBranchStore {
    inner: Arc<Mutex<MockStoreInner>>,
}

#[derive(Debug, Default)]
struct MockStoreInner {
    branches: HashMap<String, Branch>,
    fail_on: Option<FailOn>,
    operations: Vec<MockOperation>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail fetch_by_name with the given error.
    FetchByName(StoreError),
    /// Fail save with the given error.
    Save(StoreError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    FetchByName { name: String, use_cache: bool },
    Save { name: String },
}

impl MockBranchStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock store with pre-existing branches.
    pub fn with_branches(branches: Vec<Branch>) -> Self {
        let store = Self::new();
        {
            let mut inner = store.lock();
            for branch in branches {
                inner.branches.insert(branch.name.clone(), branch);
            }
        }
        store
    }

    /// Configure the mock to fail on a specific operation.
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        self.lock().fail_on = Some(fail_on);
        self
    }

    pub fn clear_fail_on(&self) {
        self.lock().fail_on = None;
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.lock().operations.clone()
    }

    pub fn clear_operations(&self) {
        self.lock().operations.clear();
    }

    /// Get a branch by name without recording (for test verification).
    pub fn branch_sync(&self, name: &str) -> Option<Branch> {
        self.lock().branches.get(name).cloned()
    }

    /// Replace a branch without recording, as another writer would.
    pub fn put_sync(&self, branch: Branch) {
        self.lock().branches.insert(branch.name.clone(), branch);
    }

    fn lock(&self) -> MutexGuard<'_, MockStoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, op: MockOperation) {
        self.lock().operations.push(op);
    }

    /// Check if we should fail and return the error if so.
    fn check_fail(&self, expected: &str) -> Option<StoreError> {
        match &self.lock().fail_on {
            Some(FailOn::FetchByName(e)) if expected == "fetch_by_name" => Some(e.clone()),
            Some(FailOn::Save(e)) if expected == "save" => Some(e.clone()),
            _ => None,
        }
    }
}

#[async_trait]
impl BranchStore for MockBranchStore {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch_by_name(&self, name: &str, use_cache: bool) -> Result<Branch, StoreError> {
        self.record(MockOperation::FetchByName {
            name: name.to_string(),
            use_cache,
        });

        if let Some(e) = self.check_fail("fetch_by_name") {
            return Err(e);
        }

        self.lock()
            .branches
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    async fn save(&self, branch: &Branch) -> Result<(), StoreError> {
        self.record(MockOperation::Save {
            name: branch.name.clone(),
        });

        if let Some(e) = self.check_fail("save") {
            return Err(e);
        }

        self.put_sync(branch.clone());
        Ok(())
    }
}
