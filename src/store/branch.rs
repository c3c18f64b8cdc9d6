//! store::branch
//!
//! Branch records as persisted by a branch store.

use serde::{Deserialize, Serialize};

use crate::core::metadata::DatabaseMetadata;

/// Kind of branch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BranchType {
    /// A shared branch edited directly.
    #[default]
    MainBranch,
    /// A user's private draft, anchored to a parent branch.
    PersonalDraft,
}

impl std::fmt::Display for BranchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BranchType::MainBranch => write!(f, "MAIN_BRANCH"),
            BranchType::PersonalDraft => write!(f, "PERSONAL_DRAFT"),
        }
    }
}

/// A named editing session for a database's schema.
///
/// `schema_metadata` is the branch head; `baseline_schema_metadata` is what
/// the head is diffed against.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Branch {
    pub name: String,
    #[serde(rename = "type")]
    pub branch_type: BranchType,
    /// Name of the parent branch, for personal drafts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_metadata: Option<DatabaseMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_schema_metadata: Option<DatabaseMetadata>,
}

impl Branch {
    /// A main branch with the given head.
    pub fn main(name: impl Into<String>, head: DatabaseMetadata) -> Self {
        Self {
            name: name.into(),
            branch_type: BranchType::MainBranch,
            schema_metadata: Some(head),
            ..Default::default()
        }
    }

    /// A personal draft anchored to `parent`.
    pub fn draft(name: impl Into<String>, parent: impl Into<String>, head: DatabaseMetadata) -> Self {
        Self {
            name: name.into(),
            branch_type: BranchType::PersonalDraft,
            parent: Some(parent.into()),
            schema_metadata: Some(head),
            ..Default::default()
        }
    }

    pub fn with_baseline(mut self, baseline: DatabaseMetadata) -> Self {
        self.baseline_schema_metadata = Some(baseline);
        self
    }

    pub fn is_personal_draft(&self) -> bool {
        self.branch_type == BranchType::PersonalDraft
    }

    /// The branch head, or empty metadata.
    pub fn head(&self) -> DatabaseMetadata {
        self.schema_metadata.clone().unwrap_or_default()
    }
}
