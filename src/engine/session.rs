//! engine::session
//!
//! An editing session over one branch.
//!
//! # Lifecycle
//!
//! ```text
//! open -> [edit tree] -> resync* -> flatten | commit
//! ```
//!
//! `open` builds the tree from the resolved baseline and rebuilds it against
//! the branch head, so entity statuses describe the head relative to the
//! baseline. `resync` re-fetches the branch (bypassing the cache) and
//! rebuilds the current tree; statuses and entities the user created
//! survive, while fields of matched entities follow the head. `flatten` never
//! fails; structural problems come back as validator messages.

use log::{debug, info};
use rand::Rng;
use thiserror::Error;

use super::baseline::resolve_baseline_metadata;
use crate::core::edit::{
    build_editable_schemas, merge_schema_edit_to_metadata_with, rebuild_editable_schemas,
    summarize_changes, ChangeSummary, Schema,
};
use crate::core::metadata::DatabaseMetadata;
use crate::core::validate::validate_database_metadata;
use crate::store::{Branch, BranchStore, StoreError};

/// Errors from session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of flattening a session's tree.
#[derive(Debug, Clone, PartialEq)]
pub struct FlattenOutcome {
    pub metadata: DatabaseMetadata,
    /// Validator messages for `metadata`; advisory only.
    pub violations: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct EditSession {
    branch: Branch,
    baseline: DatabaseMetadata,
    schemas: Vec<Schema>,
}

impl EditSession {
    /// Start a session on the named branch.
    pub async fn open(store: &dyn BranchStore, branch_name: &str) -> Result<Self, SessionError> {
        let branch = store.fetch_by_name(branch_name, true).await?;
        let baseline = resolve_baseline_metadata(&branch, store).await?;

        let original = build_editable_schemas(&baseline.schemas, &baseline.schema_configs);
        let head = branch.head();
        let schemas = rebuild_editable_schemas(&original, &head.schemas, &head.schema_configs);
        info!(
            "opened session on '{}' ({} schemas)",
            branch.name,
            schemas.len()
        );

        Ok(Self {
            branch,
            baseline,
            schemas,
        })
    }

    /// Pick up changes made to the branch since the session was opened.
    pub async fn resync(&mut self, store: &dyn BranchStore) -> Result<(), SessionError> {
        let branch = store.fetch_by_name(&self.branch.name, false).await?;
        let baseline = resolve_baseline_metadata(&branch, store).await?;

        let head = branch.head();
        self.schemas = rebuild_editable_schemas(&self.schemas, &head.schemas, &head.schema_configs);
        self.branch = branch;
        self.baseline = baseline;
        debug!("resynced session on '{}'", self.branch.name);
        Ok(())
    }

    /// Merge the tree into a copy of the branch head and validate the result.
    pub fn flatten(&self) -> FlattenOutcome {
        self.flatten_with(&mut rand::rng())
    }

    pub fn flatten_with<R: Rng + ?Sized>(&self, rng: &mut R) -> FlattenOutcome {
        let metadata = merge_schema_edit_to_metadata_with(&self.schemas, self.branch.head(), rng);
        let violations = validate_database_metadata(&metadata);
        FlattenOutcome {
            metadata,
            violations,
        }
    }

    /// Flatten and save the result as the new branch head.
    ///
    /// Violations do not prevent the save.
    pub async fn commit(&mut self, store: &dyn BranchStore) -> Result<FlattenOutcome, SessionError> {
        let outcome = self.flatten();
        let mut branch = self.branch.clone();
        branch.schema_metadata = Some(outcome.metadata.clone());
        store.save(&branch).await?;
        info!(
            "committed '{}' with {} violation(s)",
            branch.name,
            outcome.violations.len()
        );
        self.branch = branch;
        Ok(outcome)
    }

    /// Pending changes, with updates measured against the baseline.
    pub fn summary(&self) -> ChangeSummary {
        summarize_changes(&self.schemas, Some(self.baseline.schemas.as_slice()))
    }

    pub fn branch(&self) -> &Branch {
        &self.branch
    }

    pub fn baseline(&self) -> &DatabaseMetadata {
        &self.baseline
    }

    pub fn schemas(&self) -> &[Schema] {
        &self.schemas
    }

    pub fn schemas_mut(&mut self) -> &mut Vec<Schema> {
        &mut self.schemas
    }
}
