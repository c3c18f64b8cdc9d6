//! core::edit
//!
//! The editable tree: the id-addressed, status-tagged representation of a
//! schema used during an edit session.
//!
//! # Modules
//!
//! - [`rebuild`] - Canonical → editable (three-way refresh of an existing tree)
//! - [`flatten`] - Editable → canonical (apply creates/drops/updates, synthesize foreign keys)
//! - [`summary`] - Pending-change listing of a tree
//!
//! # Identity
//!
//! Canonical metadata is name-addressed; the editable tree is id-addressed.
//! Primary and foreign keys reference columns and tables by [`EntityId`], and
//! translation between the two happens only at the boundary, through the
//! per-collection lookups on [`Schema`] and [`Table`].
//!
//! # Example
//!
//! ```
//! use schemadraft::core::edit::convert_table_metadata_to_table;
//! use schemadraft::core::metadata::{ColumnMetadata, IndexMetadata, TableConfig, TableMetadata};
//! use schemadraft::core::types::{EntityId, EntityStatus};
//!
//! let meta = TableMetadata {
//!     name: "users".into(),
//!     columns: vec![
//!         ColumnMetadata { name: "id".into(), column_type: "int".into(), ..Default::default() },
//!         ColumnMetadata { name: "email".into(), column_type: "text".into(), ..Default::default() },
//!     ],
//!     indexes: vec![IndexMetadata::primary("users_pkey", vec!["id".into()])],
//!     ..Default::default()
//! };
//!
//! let table = convert_table_metadata_to_table(
//!     &meta,
//!     EntityId::new(1),
//!     EntityStatus::Normal,
//!     TableConfig::named("users"),
//! );
//! let id = table.column_id("id").unwrap();
//! assert_eq!(table.primary_key.column_id_list, vec![id]);
//! ```

pub mod flatten;
pub mod rebuild;
pub mod summary;

pub use flatten::{
    merge_schema_edit_to_metadata, merge_schema_edit_to_metadata_with,
    transform_column_edit_to_metadata, transform_schema_edit_to_metadata,
    transform_table_edit_to_metadata,
};
pub use rebuild::{build_editable_schemas, rebuild_editable_schemas};
pub use summary::{summarize_changes, Change, ChangeAction, ChangeSummary};

use serde::{Deserialize, Serialize};

use crate::core::metadata::{
    ColumnConfig, ColumnDefault, ColumnMetadata, IndexMetadata, SchemaConfig, SchemaMetadata,
    TableConfig, TableMetadata,
};
use crate::core::types::{dedup_preserving_order, EntityId, EntityStatus};

/// Editable schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Schema {
    pub id: EntityId,
    pub name: String,
    pub status: EntityStatus,
    pub tables: Vec<Table>,
    pub config: SchemaConfig,
}

impl Schema {
    /// Look up a table by name.
    pub fn table_by_name(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|table| table.name == name)
    }

    /// Look up a table by id.
    pub fn table_by_id(&self, id: EntityId) -> Option<&Table> {
        self.tables.iter().find(|table| table.id == id)
    }

    /// Allocate an id for a new table in this schema.
    pub fn next_table_id(&self) -> EntityId {
        EntityId::next_after(self.tables.iter().map(|table| table.id))
    }
}

/// Editable table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Table {
    pub id: EntityId,
    pub name: String,
    pub status: EntityStatus,
    pub comment: String,
    pub user_comment: String,
    pub classification: String,
    pub columns: Vec<Column>,
    pub primary_key: PrimaryKey,
    pub foreign_keys: Vec<ForeignKey>,
    pub config: TableConfig,
}

impl Table {
    /// Look up a column by name.
    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Look up a column by id.
    pub fn column_by_id(&self, id: EntityId) -> Option<&Column> {
        self.columns.iter().find(|column| column.id == id)
    }

    /// Translate a column name to its id.
    pub fn column_id(&self, name: &str) -> Option<EntityId> {
        self.column_by_name(name).map(|column| column.id)
    }

    /// Translate a column id to its name.
    pub fn column_name(&self, id: EntityId) -> Option<&str> {
        self.column_by_id(id).map(|column| column.name.as_str())
    }

    /// Translate column names to ids, dropping names that do not resolve.
    pub fn column_ids<'a>(&self, names: impl IntoIterator<Item = &'a String>) -> Vec<EntityId> {
        names
            .into_iter()
            .filter_map(|name| self.column_id(name))
            .collect()
    }

    /// Allocate an id for a new column in this table.
    pub fn next_column_id(&self) -> EntityId {
        EntityId::next_after(self.columns.iter().map(|column| column.id))
    }
}

/// Editable column.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Column {
    pub id: EntityId,
    pub name: String,
    pub status: EntityStatus,
    #[serde(rename = "type")]
    pub column_type: String,
    pub nullable: bool,
    pub has_default: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<ColumnDefault>,
    pub comment: String,
    pub user_comment: String,
    pub classification: String,
    pub config: ColumnConfig,
}

impl Column {
    /// Overwrite every scalar field from canonical metadata.
    ///
    /// Identity, status and config are left alone.
    pub fn assign_from_metadata(&mut self, meta: &ColumnMetadata) {
        self.column_type = meta.column_type.clone();
        self.nullable = meta.nullable;
        self.has_default = meta.has_default;
        self.default = meta.default.clone();
        self.comment = meta.comment.clone();
        self.user_comment = meta.user_comment.clone();
        self.classification = meta.classification.clone();
    }
}

/// Editable primary key. An empty id list means the table has none.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PrimaryKey {
    pub name: String,
    pub column_id_list: Vec<EntityId>,
}

impl PrimaryKey {
    pub fn is_empty(&self) -> bool {
        self.column_id_list.is_empty()
    }
}

/// Editable foreign key.
///
/// `column_id_list` refers to columns of the owning table (`table_id`);
/// `referenced_column_id_list` to columns of the referenced table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ForeignKey {
    pub name: String,
    pub table_id: EntityId,
    pub column_id_list: Vec<EntityId>,
    pub referenced_schema_id: EntityId,
    pub referenced_table_id: EntityId,
    pub referenced_column_id_list: Vec<EntityId>,
}

/// Look up an editable schema by name.
pub fn schema_by_name<'a>(schemas: &'a [Schema], name: &str) -> Option<&'a Schema> {
    schemas.iter().find(|schema| schema.name == name)
}

/// Look up an editable schema by id.
pub fn schema_by_id(schemas: &[Schema], id: EntityId) -> Option<&Schema> {
    schemas.iter().find(|schema| schema.id == id)
}

/// Allocate an id for a new schema in the tree.
pub fn next_schema_id(schemas: &[Schema]) -> EntityId {
    EntityId::next_after(schemas.iter().map(|schema| schema.id))
}

/// Build an editable primary key from a table's primary index.
///
/// Unresolvable column names are skipped and duplicate ids collapsed.
/// No primary index yields an empty key.
pub fn primary_key_from_index(index: Option<&IndexMetadata>, table: &Table) -> PrimaryKey {
    match index {
        Some(index) => PrimaryKey {
            name: index.name.clone(),
            column_id_list: dedup_preserving_order(table.column_ids(&index.expressions)),
        },
        None => PrimaryKey::default(),
    }
}

pub fn convert_column_metadata_to_column(
    meta: &ColumnMetadata,
    id: EntityId,
    status: EntityStatus,
    config: ColumnConfig,
) -> Column {
    Column {
        id,
        name: meta.name.clone(),
        status,
        column_type: meta.column_type.clone(),
        nullable: meta.nullable,
        has_default: meta.has_default,
        default: meta.default.clone(),
        comment: meta.comment.clone(),
        user_comment: meta.user_comment.clone(),
        classification: meta.classification.clone(),
        config,
    }
}

/// Convert a canonical table; columns get ids `1..=n` in canonical order.
///
/// Foreign keys are left empty: they reference other tables and are
/// synthesized once the whole tree exists.
pub fn convert_table_metadata_to_table(
    meta: &TableMetadata,
    id: EntityId,
    status: EntityStatus,
    config: TableConfig,
) -> Table {
    let columns = meta
        .columns
        .iter()
        .zip(1u64..)
        .map(|(column, raw_id)| {
            convert_column_metadata_to_column(
                column,
                EntityId::new(raw_id),
                status,
                config.column_config(&column.name),
            )
        })
        .collect();

    let mut table = Table {
        id,
        name: meta.name.clone(),
        status,
        comment: meta.comment.clone(),
        user_comment: meta.user_comment.clone(),
        classification: meta.classification.clone(),
        columns,
        primary_key: PrimaryKey::default(),
        foreign_keys: Vec::new(),
        config,
    };
    table.primary_key = primary_key_from_index(meta.primary_index(), &table);
    table
}

pub fn convert_schema_metadata_to_schema(
    meta: &SchemaMetadata,
    id: EntityId,
    status: EntityStatus,
    config: SchemaConfig,
) -> Schema {
    let tables = meta
        .tables
        .iter()
        .zip(1u64..)
        .map(|(table, raw_id)| {
            convert_table_metadata_to_table(
                table,
                EntityId::new(raw_id),
                status,
                config.table_config(&table.name),
            )
        })
        .collect();

    Schema {
        id,
        name: meta.name.clone(),
        status,
        tables,
        config,
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Builders shared by the edit module tests.

    use super::*;
    use crate::core::metadata::{DatabaseMetadata, ForeignKeyMetadata};

    pub fn column_meta(name: &str, column_type: &str) -> ColumnMetadata {
        ColumnMetadata {
            name: name.to_string(),
            column_type: column_type.to_string(),
            ..Default::default()
        }
    }

    pub fn table_meta(name: &str, columns: &[&str]) -> TableMetadata {
        TableMetadata {
            name: name.to_string(),
            columns: columns.iter().map(|c| column_meta(c, "int")).collect(),
            ..Default::default()
        }
    }

    pub fn schema_meta(name: &str, tables: Vec<TableMetadata>) -> SchemaMetadata {
        SchemaMetadata {
            name: name.to_string(),
            tables,
        }
    }

    pub fn database(schemas: Vec<SchemaMetadata>) -> DatabaseMetadata {
        DatabaseMetadata {
            name: "db".to_string(),
            schemas,
            schema_configs: Vec::new(),
        }
    }

    pub fn fk_meta(
        name: &str,
        columns: &[&str],
        referenced_schema: &str,
        referenced_table: &str,
        referenced_columns: &[&str],
    ) -> ForeignKeyMetadata {
        ForeignKeyMetadata {
            name: name.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            referenced_schema: referenced_schema.to_string(),
            referenced_table: referenced_table.to_string(),
            referenced_columns: referenced_columns.iter().map(|c| c.to_string()).collect(),
        }
    }
}
