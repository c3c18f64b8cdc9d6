//! core::metadata::schema
//!
//! Canonical database metadata.
//!
//! # Schema Design
//!
//! Canonical metadata is the source of truth reported by a database scan or
//! stored on a branch. It is name-addressed: there are no synthetic ids, and
//! every cross-reference (primary key columns, foreign key targets) is by name.
//!
//! - Exactly one index per table may be `primary`; its expressions are the
//!   ordered primary key column names.
//! - Foreign key `columns[i]` pairs with `referenced_columns[i]`.
//! - Parsing is strict: unknown fields are rejected, missing fields default.
//!
//! # Example
//!
//! ```
//! use schemadraft::core::metadata::schema::parse_metadata;
//!
//! let json = r#"{
//!     "name": "shop",
//!     "schemas": [{
//!         "name": "public",
//!         "tables": [{
//!             "name": "orders",
//!             "columns": [{ "name": "id", "type": "bigint" }],
//!             "indexes": [{ "name": "orders_pkey", "primary": true, "expressions": ["id"] }]
//!         }]
//!     }]
//! }"#;
//!
//! let meta = parse_metadata(json).unwrap();
//! let table = meta.schema("public").unwrap().table("orders").unwrap();
//! assert_eq!(table.primary_index().unwrap().expressions, vec!["id"]);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::annotations::SchemaConfig;

/// Errors from metadata operations.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("failed to parse metadata: {0}")]
    ParseError(String),

    #[error("failed to serialize metadata: {0}")]
    SerializeError(String),
}

/// Parse canonical metadata from JSON.
///
/// # Errors
///
/// Returns `MetadataError::ParseError` if the JSON is malformed or
/// contains unknown fields.
pub fn parse_metadata(json: &str) -> Result<DatabaseMetadata, MetadataError> {
    serde_json::from_str(json).map_err(|e| MetadataError::ParseError(e.to_string()))
}

/// Metadata of a whole database: its schemas plus the persisted annotations.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct DatabaseMetadata {
    pub name: String,
    pub schemas: Vec<SchemaMetadata>,
    pub schema_configs: Vec<SchemaConfig>,
}

impl DatabaseMetadata {
    /// Look up a schema by name.
    pub fn schema(&self, name: &str) -> Option<&SchemaMetadata> {
        self.schemas.iter().find(|schema| schema.name == name)
    }

    /// Look up a schema by name, mutably.
    pub fn schema_mut(&mut self, name: &str) -> Option<&mut SchemaMetadata> {
        self.schemas.iter_mut().find(|schema| schema.name == name)
    }

    /// Serialize to JSON, optionally pretty-printed.
    pub fn to_json(&self, pretty: bool) -> Result<String, MetadataError> {
        let result = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        result.map_err(|e| MetadataError::SerializeError(e.to_string()))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct SchemaMetadata {
    pub name: String,
    pub tables: Vec<TableMetadata>,
}

impl SchemaMetadata {
    /// Look up a table by name.
    pub fn table(&self, name: &str) -> Option<&TableMetadata> {
        self.tables.iter().find(|table| table.name == name)
    }

    /// Look up a table by name, mutably.
    pub fn table_mut(&mut self, name: &str) -> Option<&mut TableMetadata> {
        self.tables.iter_mut().find(|table| table.name == name)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct TableMetadata {
    pub name: String,
    pub columns: Vec<ColumnMetadata>,
    pub indexes: Vec<IndexMetadata>,
    pub foreign_keys: Vec<ForeignKeyMetadata>,
    pub comment: String,
    pub user_comment: String,
    pub classification: String,
}

impl TableMetadata {
    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnMetadata> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// The index encoding the primary key, if any.
    pub fn primary_index(&self) -> Option<&IndexMetadata> {
        self.indexes.iter().find(|index| index.primary)
    }

    /// The index encoding the primary key, mutably.
    pub fn primary_index_mut(&mut self) -> Option<&mut IndexMetadata> {
        self.indexes.iter_mut().find(|index| index.primary)
    }

    /// Look up a foreign key by name.
    pub fn foreign_key(&self, name: &str) -> Option<&ForeignKeyMetadata> {
        self.foreign_keys.iter().find(|fk| fk.name == name)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ColumnMetadata {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: String,
    pub nullable: bool,
    pub has_default: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<ColumnDefault>,
    pub comment: String,
    pub user_comment: String,
    pub classification: String,
}

/// Default value of a column.
///
/// Serialized as `{"kind": "null"}`, `{"kind": "string", "value": "..."}`
/// or `{"kind": "expression", "value": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ColumnDefault {
    Null,
    String(String),
    Expression(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct IndexMetadata {
    pub name: String,
    pub primary: bool,
    pub unique: bool,
    pub expressions: Vec<String>,
}

impl IndexMetadata {
    /// Build a primary index over the given column names.
    pub fn primary(name: impl Into<String>, expressions: Vec<String>) -> Self {
        Self {
            name: name.into(),
            primary: true,
            unique: true,
            expressions,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ForeignKeyMetadata {
    pub name: String,
    pub columns: Vec<String>,
    pub referenced_schema: String,
    pub referenced_table: String,
    pub referenced_columns: Vec<String>,
}
