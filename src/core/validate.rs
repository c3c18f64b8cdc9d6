//! core::validate
//!
//! Structural sanity check of canonical metadata.
//!
//! Violations are advisory: they are returned as human-readable messages,
//! de-duplicated in first-seen order, and never block flattening.

use crate::core::metadata::DatabaseMetadata;
use crate::core::types::dedup_preserving_order;

/// Collect structural violations of `metadata`.
///
/// # Example
///
/// ```
/// use schemadraft::core::metadata::{DatabaseMetadata, SchemaMetadata, TableMetadata};
/// use schemadraft::core::validate::validate_database_metadata;
///
/// let metadata = DatabaseMetadata {
///     schemas: vec![SchemaMetadata {
///         name: "s".into(),
///         tables: vec![TableMetadata::default(), TableMetadata::default()],
///     }],
///     ..Default::default()
/// };
/// assert_eq!(validate_database_metadata(&metadata), vec!["Table name is required."]);
/// ```
pub fn validate_database_metadata(metadata: &DatabaseMetadata) -> Vec<String> {
    let mut messages = Vec::new();

    for schema in &metadata.schemas {
        for table in &schema.tables {
            if table.name.is_empty() {
                messages.push("Table name is required.".to_string());
            }
            for column in &table.columns {
                if column.name.is_empty() {
                    messages.push("Column name is required.".to_string());
                } else if column.column_type.is_empty() {
                    messages.push(format!("Column {} type is required.", column.name));
                }
            }
        }
    }

    dedup_preserving_order(messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metadata::{ColumnMetadata, SchemaMetadata, TableMetadata};

    fn column(name: &str, column_type: &str) -> ColumnMetadata {
        ColumnMetadata {
            name: name.into(),
            column_type: column_type.into(),
            ..Default::default()
        }
    }

    fn metadata(tables: Vec<TableMetadata>) -> DatabaseMetadata {
        DatabaseMetadata {
            schemas: vec![SchemaMetadata {
                name: "s".into(),
                tables,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn valid_metadata_has_no_violations() {
        let m = metadata(vec![TableMetadata {
            name: "t".into(),
            columns: vec![column("id", "int")],
            ..Default::default()
        }]);
        assert!(validate_database_metadata(&m).is_empty());
    }

    #[test]
    fn reports_missing_names_and_types_in_order() {
        let m = metadata(vec![
            TableMetadata {
                name: "t".into(),
                columns: vec![column("a", ""), column("", ""), column("b", "")],
                ..Default::default()
            },
            TableMetadata::default(),
        ]);
        assert_eq!(
            validate_database_metadata(&m),
            vec![
                "Column a type is required.",
                "Column name is required.",
                "Column b type is required.",
                "Table name is required.",
            ]
        );
    }

    #[test]
    fn repeated_violations_reported_once() {
        let nameless = TableMetadata {
            columns: vec![column("", "int")],
            ..Default::default()
        };
        let m = metadata(vec![nameless.clone(), nameless]);
        assert_eq!(
            validate_database_metadata(&m),
            vec!["Table name is required.", "Column name is required."]
        );
    }
}
