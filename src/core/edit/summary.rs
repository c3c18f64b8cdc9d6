//! core::edit::summary
//!
//! Pending changes recorded in an editable tree.
//!
//! Created and dropped entities are read from status tags. A created or
//! dropped schema or table is reported once; its children are implied.
//! Updated columns are only detectable against a canonical snapshot.

use std::fmt;

use serde::Serialize;

use super::flatten::transform_column_edit_to_metadata;
use super::{Schema, Table};
use crate::core::metadata::SchemaMetadata;
use crate::core::types::EntityStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    Create,
    Drop,
    Update,
}

impl ChangeAction {
    fn marker(self) -> char {
        match self {
            ChangeAction::Create => '+',
            ChangeAction::Drop => '-',
            ChangeAction::Update => '~',
        }
    }
}

/// A single pending change, addressed by dotted path (`schema.table.column`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    pub action: ChangeAction,
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSummary {
    pub changes: Vec<Change>,
}

impl ChangeSummary {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn count(&self, action: ChangeAction) -> usize {
        self.changes.iter().filter(|c| c.action == action).count()
    }

    fn push(&mut self, action: ChangeAction, path: String) {
        self.changes.push(Change { action, path });
    }
}

impl fmt::Display for ChangeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for change in &self.changes {
            writeln!(f, "{} {}", change.action.marker(), change.path)?;
        }
        Ok(())
    }
}

/// List the pending changes of an editable tree.
///
/// With a `snapshot`, columns marked `normal` whose fields differ from the
/// same-named canonical column are reported as updates.
pub fn summarize_changes(schemas: &[Schema], snapshot: Option<&[SchemaMetadata]>) -> ChangeSummary {
    let mut summary = ChangeSummary::default();

    for schema in schemas {
        match schema.status {
            EntityStatus::Created => summary.push(ChangeAction::Create, schema.name.clone()),
            EntityStatus::Dropped => summary.push(ChangeAction::Drop, schema.name.clone()),
            EntityStatus::Normal => {
                let canonical = snapshot.and_then(|s| s.iter().find(|m| m.name == schema.name));
                for table in &schema.tables {
                    summarize_table(&mut summary, schema, table, canonical);
                }
            }
        }
    }

    summary
}

fn summarize_table(
    summary: &mut ChangeSummary,
    schema: &Schema,
    table: &Table,
    canonical: Option<&SchemaMetadata>,
) {
    let path = format!("{}.{}", schema.name, table.name);
    match table.status {
        EntityStatus::Created => summary.push(ChangeAction::Create, path),
        EntityStatus::Dropped => summary.push(ChangeAction::Drop, path),
        EntityStatus::Normal => {
            let canonical = canonical.and_then(|s| s.table(&table.name));
            for column in &table.columns {
                let column_path = format!("{}.{}", path, column.name);
                match column.status {
                    EntityStatus::Created => summary.push(ChangeAction::Create, column_path),
                    EntityStatus::Dropped => summary.push(ChangeAction::Drop, column_path),
                    EntityStatus::Normal => {
                        let changed = canonical
                            .and_then(|t| t.column(&column.name))
                            .is_some_and(|meta| transform_column_edit_to_metadata(column) != *meta);
                        if changed {
                            summary.push(ChangeAction::Update, column_path);
                        }
                    }
                }
            }
        }
    }
}
