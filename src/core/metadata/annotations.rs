//! core::metadata::annotations
//!
//! Persisted user annotations (classification, semantic types, labels).
//!
//! Annotations are keyed by name, never by editable id, so they survive any
//! amount of churn in the canonical metadata and are re-attached to editable
//! entities by name on every rebuild. Lookups never fail: a missing entry
//! yields a fresh empty config carrying the requested name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct SchemaConfig {
    pub name: String,
    pub table_configs: Vec<TableConfig>,
}

impl SchemaConfig {
    /// An empty config for the named schema.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Find the config of a schema in a persisted list, or an empty one.
    pub fn find_or_empty(configs: &[SchemaConfig], name: &str) -> SchemaConfig {
        configs
            .iter()
            .find(|config| config.name == name)
            .cloned()
            .unwrap_or_else(|| SchemaConfig::named(name))
    }

    /// The config of the named table, or an empty one.
    pub fn table_config(&self, name: &str) -> TableConfig {
        self.table_configs
            .iter()
            .find(|config| config.name == name)
            .cloned()
            .unwrap_or_else(|| TableConfig::named(name))
    }

    /// True when no table carries any annotation.
    pub fn is_empty(&self) -> bool {
        self.table_configs.iter().all(TableConfig::is_empty)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct TableConfig {
    pub name: String,
    pub classification_id: String,
    pub column_configs: Vec<ColumnConfig>,
}

impl TableConfig {
    /// An empty config for the named table.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// The config of the named column, or an empty one.
    pub fn column_config(&self, name: &str) -> ColumnConfig {
        self.column_configs
            .iter()
            .find(|config| config.name == name)
            .cloned()
            .unwrap_or_else(|| ColumnConfig::named(name))
    }

    /// True when neither the table nor any column carries an annotation.
    pub fn is_empty(&self) -> bool {
        self.classification_id.is_empty() && self.column_configs.iter().all(ColumnConfig::is_empty)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ColumnConfig {
    pub name: String,
    pub semantic_type_id: String,
    pub classification_id: String,
    pub labels: BTreeMap<String, String>,
}

impl ColumnConfig {
    /// An empty config for the named column.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// True when the config carries nothing beyond its name.
    pub fn is_empty(&self) -> bool {
        self.semantic_type_id.is_empty()
            && self.classification_id.is_empty()
            && self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configs() -> Vec<SchemaConfig> {
        vec![SchemaConfig {
            name: "public".to_string(),
            table_configs: vec![TableConfig {
                name: "users".to_string(),
                classification_id: "1-1".to_string(),
                column_configs: vec![ColumnConfig {
                    name: "email".to_string(),
                    semantic_type_id: "email".to_string(),
                    ..Default::default()
                }],
            }],
        }]
    }

    #[test]
    fn find_existing_configs() {
        let schema = SchemaConfig::find_or_empty(&configs(), "public");
        let table = schema.table_config("users");
        assert_eq!(table.classification_id, "1-1");
        assert_eq!(table.column_config("email").semantic_type_id, "email");
    }

    #[test]
    fn missing_configs_are_empty_and_named() {
        let schema = SchemaConfig::find_or_empty(&configs(), "audit");
        assert_eq!(schema, SchemaConfig::named("audit"));

        let table = schema.table_config("events");
        assert_eq!(table.name, "events");
        assert!(table.is_empty());

        let column = table.column_config("payload");
        assert_eq!(column.name, "payload");
        assert!(column.is_empty());
    }

    #[test]
    fn emptiness_ignores_names() {
        let mut column = ColumnConfig::named("c");
        assert!(column.is_empty());
        column.labels.insert("owner".into(), "billing".into());
        assert!(!column.is_empty());

        let table = TableConfig {
            name: "t".into(),
            classification_id: String::new(),
            column_configs: vec![column],
        };
        assert!(!table.is_empty());
        assert!(!configs()[0].is_empty());
    }
}
