//! engine::baseline
//!
//! Resolve the metadata a branch's edits are diffed against.
//!
//! A personal draft with a parent takes its baseline from the parent, which
//! is fetched with the cache bypassed because the parent may have just
//! changed. Every other branch uses its own baseline. A missing baseline is
//! empty metadata.

use log::debug;

use crate::core::metadata::DatabaseMetadata;
use crate::store::{Branch, BranchStore, StoreError};

/// Baseline metadata for `branch`.
///
/// # Errors
///
/// Propagates the store error if the parent of a personal draft cannot be
/// fetched. No retry is attempted.
pub async fn resolve_baseline_metadata(
    branch: &Branch,
    store: &dyn BranchStore,
) -> Result<DatabaseMetadata, StoreError> {
    if branch.is_personal_draft() {
        if let Some(parent_name) = &branch.parent {
            debug!("resolving baseline of '{}' from parent '{}'", branch.name, parent_name);
            let parent = store.fetch_by_name(parent_name, false).await?;
            return Ok(parent.baseline_schema_metadata.unwrap_or_default());
        }
    }
    Ok(branch.baseline_schema_metadata.clone().unwrap_or_default())
}
