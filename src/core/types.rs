//! core::types
//!
//! Strong types shared by the canonical and editable representations.
//!
//! # Types
//!
//! - [`EntityId`] - Session-local identity of an editable entity
//! - [`EntityStatus`] - Relation of an editable entity to the last-seen canonical snapshot
//!
//! # Identity
//!
//! Editable ids are unique within their immediate parent collection only
//! (schemas among schemas, tables within a schema, columns within a table).
//! New ids are allocated as one past the largest id already in the collection,
//! so allocation is deterministic for a given tree.
//!
//! # Examples
//!
//! ```
//! use schemadraft::core::types::{EntityId, EntityStatus};
//!
//! let ids = [EntityId::new(3), EntityId::new(7)];
//! assert_eq!(EntityId::next_after(ids.iter().copied()), EntityId::new(8));
//!
//! assert!(EntityStatus::Dropped.is_dropped());
//! assert_eq!(EntityStatus::default(), EntityStatus::Normal);
//! ```

use std::collections::HashSet;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Session-local identity of an editable schema, table or column.
///
/// Serialized as a bare integer. The default, 0, is never allocated.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// Wrap a raw id.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw integer value.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Allocate the id following every id in `existing`.
    ///
    /// An empty collection starts at 1. When the maximum is `u64::MAX` the
    /// smallest unused id is taken instead.
    pub fn next_after(existing: impl IntoIterator<Item = EntityId>) -> Self {
        let mut used: Vec<u64> = existing.into_iter().map(|id| id.0).collect();
        let max = used.iter().copied().max().unwrap_or(0);
        if let Some(next) = max.checked_add(1) {
            return Self(next);
        }

        used.sort_unstable();
        used.dedup();
        let mut candidate = 1;
        for raw in used {
            if raw > candidate {
                break;
            }
            if raw == candidate {
                candidate += 1;
            }
        }
        Self(candidate)
    }
}

impl From<u64> for EntityId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Change status of an editable entity.
///
/// - `Normal`: present in the last reconciled canonical snapshot
/// - `Created`: not (yet) present in canonical form
/// - `Dropped`: kept in the tree for display and undo, excluded when flattening
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityStatus {
    #[default]
    Normal,
    Created,
    Dropped,
}

impl EntityStatus {
    /// Check if the entity is marked as dropped.
    pub fn is_dropped(self) -> bool {
        matches!(self, EntityStatus::Dropped)
    }

    /// Check if the entity is marked as created.
    pub fn is_created(self) -> bool {
        matches!(self, EntityStatus::Created)
    }
}

impl std::fmt::Display for EntityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityStatus::Normal => write!(f, "normal"),
            EntityStatus::Created => write!(f, "created"),
            EntityStatus::Dropped => write!(f, "dropped"),
        }
    }
}

/// Remove duplicates from an ordered list, keeping the first occurrence.
pub fn dedup_preserving_order<T>(items: impl IntoIterator<Item = T>) -> Vec<T>
where
    T: Eq + Hash + Clone,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
