//! core::metadata
//!
//! Canonical (name-addressed) database metadata and persisted annotations.
//!
//! # Modules
//!
//! - [`schema`] - Canonical schema/table/column/index/foreign key types
//! - [`annotations`] - Name-keyed user annotations (`SchemaConfig` tree)
//!
//! # Lifecycle
//!
//! Canonical metadata is produced outside this crate (a live database scan or
//! a branch's stored metadata) and is treated as immutable input, except by
//! the flattener, which writes edits back into a caller-owned copy.
//! Annotations outlive canonical churn because they are keyed by name.

pub mod annotations;
pub mod schema;

// Re-export commonly used types
pub use annotations::{ColumnConfig, SchemaConfig, TableConfig};
pub use schema::{
    parse_metadata, ColumnDefault, ColumnMetadata, DatabaseMetadata, ForeignKeyMetadata,
    IndexMetadata, MetadataError, SchemaMetadata, TableMetadata,
};
