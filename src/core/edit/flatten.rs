//! core::edit::flatten
//!
//! Editable → canonical flattening.
//!
//! # Policy
//!
//! - Schemas, tables and columns are synced destructively: after flattening,
//!   the canonical structure matches the non-dropped edits exactly, and
//!   canonical entities with no edit counterpart are removed.
//! - Foreign keys are synced additively: synthesized keys are appended, and
//!   existing canonical foreign keys are never removed or replaced.
//! - Annotations are regenerated from the configs attached to the edits.
//!
//! Flattening is total. Unresolvable foreign keys are skipped silently.

use log::{debug, trace};
use rand::Rng;

use super::{schema_by_id, Column, ForeignKey, Schema, Table};
use crate::core::metadata::{
    ColumnConfig, ColumnMetadata, DatabaseMetadata, ForeignKeyMetadata, IndexMetadata,
    SchemaConfig, SchemaMetadata, TableConfig, TableMetadata,
};
use crate::core::types::{dedup_preserving_order, EntityId, EntityStatus};

/// Length of the random suffix of generated foreign key names.
pub const FK_NAME_TOKEN_LEN: usize = 8;

const FK_NAME_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Apply an editable tree to canonical metadata.
///
/// Foreign keys without a name get `<table>-fk-<8 random [a-z0-9]>`.
///
/// # Example
///
/// ```
/// use schemadraft::core::edit::{build_editable_schemas, merge_schema_edit_to_metadata};
/// use schemadraft::core::metadata::{ColumnMetadata, DatabaseMetadata, SchemaMetadata, TableMetadata};
/// use schemadraft::core::types::EntityStatus;
///
/// let metadata = DatabaseMetadata {
///     name: "db".into(),
///     schemas: vec![SchemaMetadata {
///         name: "s1".into(),
///         tables: vec![TableMetadata { name: "t1".into(), ..Default::default() }],
///     }],
///     schema_configs: vec![],
/// };
///
/// let mut edits = build_editable_schemas(&metadata.schemas, &metadata.schema_configs);
/// edits[0].tables[0].status = EntityStatus::Dropped;
///
/// let merged = merge_schema_edit_to_metadata(&edits, metadata);
/// assert!(merged.schemas[0].tables.is_empty());
/// ```
pub fn merge_schema_edit_to_metadata(
    schema_edits: &[Schema],
    metadata: DatabaseMetadata,
) -> DatabaseMetadata {
    merge_schema_edit_to_metadata_with(schema_edits, metadata, &mut rand::rng())
}

/// [`merge_schema_edit_to_metadata`] with an explicit source of randomness
/// for foreign key name generation.
pub fn merge_schema_edit_to_metadata_with<R: Rng + ?Sized>(
    schema_edits: &[Schema],
    mut metadata: DatabaseMetadata,
    rng: &mut R,
) -> DatabaseMetadata {
    for edit in schema_edits {
        match edit.status {
            EntityStatus::Created => {
                metadata.schemas.retain(|schema| schema.name != edit.name);
                metadata.schemas.push(transform_schema_edit_to_metadata(edit));
            }
            EntityStatus::Dropped => {
                metadata.schemas.retain(|schema| schema.name != edit.name);
            }
            EntityStatus::Normal => match metadata.schema_mut(&edit.name) {
                Some(schema) => merge_schema(edit, schema),
                None => {
                    debug!("schema '{}' missing from metadata, inserting edit", edit.name);
                    metadata.schemas.push(transform_schema_edit_to_metadata(edit));
                }
            },
        }
    }
    metadata
        .schemas
        .retain(|schema| schema_edits.iter().any(|edit| edit.name == schema.name));

    for schema_edit in schema_edits {
        for table_edit in &schema_edit.tables {
            for fk in &table_edit.foreign_keys {
                synthesize_foreign_key(&mut metadata, schema_edits, schema_edit, table_edit, fk, rng);
            }
        }
    }

    metadata.schema_configs = regenerate_schema_configs(schema_edits);
    metadata
}

fn merge_schema(edit: &Schema, schema: &mut SchemaMetadata) {
    for table_edit in &edit.tables {
        match table_edit.status {
            EntityStatus::Created => {
                schema.tables.retain(|table| table.name != table_edit.name);
                schema.tables.push(transform_table_edit_to_metadata(table_edit));
            }
            EntityStatus::Dropped => {
                schema.tables.retain(|table| table.name != table_edit.name);
            }
            EntityStatus::Normal => match schema.table_mut(&table_edit.name) {
                Some(table) => merge_table(table_edit, table),
                None => {
                    debug!(
                        "table '{}.{}' missing from metadata, inserting edit",
                        edit.name, table_edit.name
                    );
                    schema.tables.push(transform_table_edit_to_metadata(table_edit));
                }
            },
        }
    }
    schema
        .tables
        .retain(|table| edit.tables.iter().any(|table_edit| table_edit.name == table.name));
}

fn merge_table(edit: &Table, table: &mut TableMetadata) {
    for column_edit in &edit.columns {
        match column_edit.status {
            EntityStatus::Created => {
                table.columns.retain(|column| column.name != column_edit.name);
                table.columns.push(transform_column_edit_to_metadata(column_edit));
            }
            EntityStatus::Dropped => {
                table.columns.retain(|column| column.name != column_edit.name);
            }
            EntityStatus::Normal => {
                match table.columns.iter_mut().find(|c| c.name == column_edit.name) {
                    Some(column) => *column = transform_column_edit_to_metadata(column_edit),
                    None => table.columns.push(transform_column_edit_to_metadata(column_edit)),
                }
            }
        }
    }
    table
        .columns
        .retain(|column| edit.columns.iter().any(|c| c.name == column.name));

    let expressions = primary_key_column_names(edit, |column| !column.status.is_dropped());
    if expressions.is_empty() {
        table.indexes.retain(|index| !index.primary);
    } else {
        match table.primary_index_mut() {
            Some(index) => {
                index.expressions = expressions;
                if !edit.primary_key.name.is_empty() {
                    index.name = edit.primary_key.name.clone();
                }
            }
            None => table
                .indexes
                .push(IndexMetadata::primary(edit.primary_key.name.clone(), expressions)),
        }
    }

    table.comment = edit.comment.clone();
    table.user_comment = edit.user_comment.clone();
    table.classification = edit.classification.clone();
}

/// Resolve primary key column ids to names, keeping only columns accepted by `include`.
fn primary_key_column_names(table: &Table, include: impl Fn(&Column) -> bool) -> Vec<String> {
    let names = table
        .primary_key
        .column_id_list
        .iter()
        .filter_map(|id| table.column_by_id(*id))
        .filter(|column| include(column))
        .map(|column| column.name.clone());
    dedup_preserving_order(names)
}

/// Convert a whole schema edit, ignoring the status of its tables and columns.
pub fn transform_schema_edit_to_metadata(edit: &Schema) -> SchemaMetadata {
    SchemaMetadata {
        name: edit.name.clone(),
        tables: edit
            .tables
            .iter()
            .map(transform_table_edit_to_metadata)
            .collect(),
    }
}

/// Convert a whole table edit, ignoring the status of its columns.
///
/// Foreign keys are left empty; they are synthesized after every schema
/// is structurally settled.
pub fn transform_table_edit_to_metadata(edit: &Table) -> TableMetadata {
    let expressions = primary_key_column_names(edit, |_| true);
    let indexes = if expressions.is_empty() {
        Vec::new()
    } else {
        vec![IndexMetadata::primary(edit.primary_key.name.clone(), expressions)]
    };

    TableMetadata {
        name: edit.name.clone(),
        columns: edit
            .columns
            .iter()
            .map(transform_column_edit_to_metadata)
            .collect(),
        indexes,
        foreign_keys: Vec::new(),
        comment: edit.comment.clone(),
        user_comment: edit.user_comment.clone(),
        classification: edit.classification.clone(),
    }
}

pub fn transform_column_edit_to_metadata(edit: &Column) -> ColumnMetadata {
    ColumnMetadata {
        name: edit.name.clone(),
        column_type: edit.column_type.clone(),
        nullable: edit.nullable,
        has_default: edit.has_default,
        default: edit.default.clone(),
        comment: edit.comment.clone(),
        user_comment: edit.user_comment.clone(),
        classification: edit.classification.clone(),
    }
}

/// Resolve dropped-aware column ids of a table edit to names.
fn live_column_names(table: &Table, ids: &[EntityId]) -> Vec<String> {
    ids.iter()
        .filter_map(|id| table.column_by_id(*id))
        .filter(|column| !column.status.is_dropped())
        .map(|column| column.name.clone())
        .collect()
}

fn synthesize_foreign_key<R: Rng + ?Sized>(
    metadata: &mut DatabaseMetadata,
    schema_edits: &[Schema],
    schema_edit: &Schema,
    table_edit: &Table,
    fk: &ForeignKey,
    rng: &mut R,
) {
    let Some(referenced_schema) = schema_by_id(schema_edits, fk.referenced_schema_id) else {
        debug!("skipping foreign key '{}': referenced schema id {} not found", fk.name, fk.referenced_schema_id);
        return;
    };
    let Some(referenced_table) = referenced_schema.table_by_id(fk.referenced_table_id) else {
        debug!("skipping foreign key '{}': referenced table id {} not found", fk.name, fk.referenced_table_id);
        return;
    };
    let referenced_exists = metadata
        .schema(&referenced_schema.name)
        .and_then(|schema| schema.table(&referenced_table.name))
        .is_some();
    if !referenced_exists {
        debug!(
            "skipping foreign key '{}': '{}.{}' not in metadata",
            fk.name, referenced_schema.name, referenced_table.name
        );
        return;
    }

    let columns = live_column_names(table_edit, &fk.column_id_list);
    let referenced_columns = live_column_names(referenced_table, &fk.referenced_column_id_list);
    if columns.is_empty() || columns.len() != referenced_columns.len() {
        debug!(
            "skipping foreign key '{}': {} columns reference {} columns",
            fk.name,
            columns.len(),
            referenced_columns.len()
        );
        return;
    }

    let Some(table) = metadata
        .schema_mut(&schema_edit.name)
        .and_then(|schema| schema.table_mut(&table_edit.name))
    else {
        debug!(
            "skipping foreign key '{}': '{}.{}' not in metadata",
            fk.name, schema_edit.name, table_edit.name
        );
        return;
    };

    // An unnamed canonical key matches an unnamed edit, so it is not re-added.
    if table.foreign_key(&fk.name).is_some() {
        trace!("foreign key '{}' already on '{}', keeping existing", fk.name, table.name);
        return;
    }
    let name = if fk.name.is_empty() {
        let generated = generate_foreign_key_name(&table_edit.name, rng);
        trace!("generated foreign key name '{}'", generated);
        generated
    } else {
        fk.name.clone()
    };

    table.foreign_keys.push(ForeignKeyMetadata {
        name,
        columns,
        referenced_schema: referenced_schema.name.clone(),
        referenced_table: referenced_table.name.clone(),
        referenced_columns,
    });
}

/// `<table>-fk-` followed by 8 random lowercase alphanumerics.
pub fn generate_foreign_key_name<R: Rng + ?Sized>(table_name: &str, rng: &mut R) -> String {
    let token: String = (0..FK_NAME_TOKEN_LEN)
        .map(|_| FK_NAME_CHARSET[rng.random_range(0..FK_NAME_CHARSET.len())] as char)
        .collect();
    format!("{}-fk-{}", table_name, token)
}

/// Rebuild the persisted annotations from the configs attached to the edits.
///
/// Dropped entities and empty configs are not persisted.
fn regenerate_schema_configs(schema_edits: &[Schema]) -> Vec<SchemaConfig> {
    schema_edits
        .iter()
        .filter(|schema| !schema.status.is_dropped())
        .map(|schema| SchemaConfig {
            name: schema.name.clone(),
            table_configs: schema
                .tables
                .iter()
                .filter(|table| !table.status.is_dropped())
                .map(table_config_of)
                .filter(|config| !config.is_empty())
                .collect(),
        })
        .filter(|config| !config.is_empty())
        .collect()
}

fn table_config_of(table: &Table) -> TableConfig {
    TableConfig {
        name: table.name.clone(),
        classification_id: table.config.classification_id.clone(),
        column_configs: table
            .columns
            .iter()
            .filter(|column| !column.status.is_dropped())
            .map(|column| ColumnConfig {
                name: column.name.clone(),
                ..column.config.clone()
            })
            .filter(|config| !config.is_empty())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::super::fixtures::*;
    use super::super::{build_editable_schemas, PrimaryKey};
    use super::*;
    use crate::core::metadata::ColumnDefault;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn s1_t1(columns: &[&str]) -> DatabaseMetadata {
        database(vec![schema_meta("s1", vec![table_meta("t1", columns)])])
    }

    fn merge(edits: &[Schema], metadata: DatabaseMetadata) -> DatabaseMetadata {
        merge_schema_edit_to_metadata_with(edits, metadata, &mut rng())
    }

    #[test]
    fn unchanged_tree_round_trips() {
        let mut metadata = s1_t1(&["id", "name"]);
        metadata.schemas[0].tables[0].indexes =
            vec![IndexMetadata::primary("pk", vec!["id".into()])];
        let edits = build_editable_schemas(&metadata.schemas, &metadata.schema_configs);
        let merged = merge(&edits, metadata.clone());
        assert_eq!(merged, metadata);
    }

    #[test]
    fn dropped_table_is_removed() {
        let metadata = s1_t1(&["id"]);
        let mut edits = build_editable_schemas(&metadata.schemas, &[]);
        edits[0].tables[0].status = EntityStatus::Dropped;
        let merged = merge(&edits, metadata);
        assert!(merged.schemas[0].tables.is_empty());
    }

    #[test]
    fn dropped_schema_is_removed() {
        let metadata = s1_t1(&["id"]);
        let mut edits = build_editable_schemas(&metadata.schemas, &[]);
        edits[0].status = EntityStatus::Dropped;
        let merged = merge(&edits, metadata);
        assert!(merged.schemas.is_empty());
    }

    #[test]
    fn created_schema_replaces_same_named_canonical_schema() {
        let metadata = s1_t1(&["old"]);
        let replacement = database(vec![schema_meta("s1", vec![table_meta("fresh", &["x"])])]);
        let mut edits = build_editable_schemas(&replacement.schemas, &[]);
        edits[0].status = EntityStatus::Created;
        edits[0].tables[0].columns[0].status = EntityStatus::Dropped;

        let merged = merge(&edits, metadata);
        assert_eq!(merged.schemas.len(), 1);
        let table = &merged.schemas[0].tables[0];
        assert_eq!(table.name, "fresh");
        // created schemas are emitted in full regardless of child status
        assert_eq!(table.columns.len(), 1);
    }

    #[test]
    fn canonical_entities_without_edits_are_removed() {
        let metadata = database(vec![
            schema_meta("keep", vec![table_meta("t", &["a"]), table_meta("stale", &["b"])]),
            schema_meta("orphan", vec![]),
        ]);
        let edits = build_editable_schemas(&[schema_meta("keep", vec![table_meta("t", &["a"])])], &[]);
        let merged = merge(&edits, metadata);
        assert_eq!(merged.schemas.len(), 1);
        assert_eq!(merged.schemas[0].tables.len(), 1);
        assert_eq!(merged.schemas[0].tables[0].name, "t");
    }

    #[test]
    fn normal_schema_missing_from_metadata_is_inserted() {
        let edits = build_editable_schemas(&s1_t1(&["a"]).schemas, &[]);
        let merged = merge(&edits, database(vec![]));
        assert_eq!(merged.schemas.len(), 1);
        assert_eq!(merged.schemas[0].tables[0].columns[0].name, "a");
    }

    #[test]
    fn column_create_drop_and_update() {
        let metadata = s1_t1(&["keep", "gone", "changed"]);
        let mut edits = build_editable_schemas(&metadata.schemas, &[]);
        {
            let table = &mut edits[0].tables[0];
            table.columns[1].status = EntityStatus::Dropped;
            table.columns[2].column_type = "text".into();
            table.columns[2].has_default = true;
            table.columns[2].default = Some(ColumnDefault::Expression("'x'".into()));
            let id = table.next_column_id();
            table.columns.push(Column {
                id,
                name: "added".into(),
                status: EntityStatus::Created,
                column_type: "bool".into(),
                ..Default::default()
            });
        }

        let merged = merge(&edits, metadata);
        let table = &merged.schemas[0].tables[0];
        let names: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["keep", "changed", "added"]);
        let changed = table.column("changed").unwrap();
        assert_eq!(changed.column_type, "text");
        assert_eq!(changed.default, Some(ColumnDefault::Expression("'x'".into())));
    }

    #[test]
    fn primary_index_rebuilt_and_removed() {
        let mut metadata = s1_t1(&["a", "b"]);
        metadata.schemas[0].tables[0].indexes = vec![
            IndexMetadata::primary("pk", vec!["a".into()]),
            IndexMetadata {
                name: "idx_b".into(),
                expressions: vec!["b".into()],
                ..Default::default()
            },
        ];
        let mut edits = build_editable_schemas(&metadata.schemas, &[]);
        edits[0].tables[0].primary_key = PrimaryKey {
            name: "pk_ab".into(),
            column_id_list: vec![EntityId::new(1), EntityId::new(2)],
        };
        let merged = merge(&edits, metadata.clone());
        let pk = merged.schemas[0].tables[0].primary_index().unwrap();
        assert_eq!(pk.name, "pk_ab");
        assert_eq!(pk.expressions, vec!["a", "b"]);
        assert_eq!(merged.schemas[0].tables[0].indexes.len(), 2);

        edits[0].tables[0].primary_key = PrimaryKey::default();
        let merged = merge(&edits, metadata);
        let table = &merged.schemas[0].tables[0];
        assert!(table.primary_index().is_none());
        assert_eq!(table.indexes.len(), 1);
    }

    #[test]
    fn dropped_column_leaves_primary_index() {
        let mut metadata = s1_t1(&["a", "b"]);
        metadata.schemas[0].tables[0].indexes =
            vec![IndexMetadata::primary("pk", vec!["a".into(), "b".into()])];
        let mut edits = build_editable_schemas(&metadata.schemas, &[]);
        assert_eq!(edits[0].tables[0].primary_key.column_id_list.len(), 2);
        edits[0].tables[0].columns[1].status = EntityStatus::Dropped;

        let merged = merge(&edits, metadata.clone());
        let pk = merged.schemas[0].tables[0].primary_index().unwrap();
        assert_eq!(pk.expressions, vec!["a"]);

        // every key column dropped removes the index
        edits[0].tables[0].columns[0].status = EntityStatus::Dropped;
        let merged = merge(&edits, metadata);
        assert!(merged.schemas[0].tables[0].primary_index().is_none());
    }

    #[test]
    fn primary_index_added_when_missing() {
        let metadata = s1_t1(&["id"]);
        let mut edits = build_editable_schemas(&metadata.schemas, &[]);
        edits[0].tables[0].primary_key = PrimaryKey {
            name: "t1_pkey".into(),
            column_id_list: vec![EntityId::new(1)],
        };
        let merged = merge(&edits, metadata);
        let pk = merged.schemas[0].tables[0].primary_index().unwrap();
        assert!(pk.primary && pk.unique);
        assert_eq!(pk.expressions, vec!["id"]);
    }

    #[test]
    fn table_scalars_copied_from_edit() {
        let metadata = s1_t1(&["id"]);
        let mut edits = build_editable_schemas(&metadata.schemas, &[]);
        edits[0].tables[0].user_comment = "owned by billing".into();
        let merged = merge(&edits, metadata);
        assert_eq!(merged.schemas[0].tables[0].user_comment, "owned by billing");
    }

    fn orders_and_users() -> (DatabaseMetadata, Vec<Schema>) {
        let metadata = database(vec![schema_meta(
            "s1",
            vec![table_meta("users", &["id", "tenant"]), table_meta("orders", &["user_id", "tenant"])],
        )]);
        let edits = build_editable_schemas(&metadata.schemas, &[]);
        (metadata, edits)
    }

    fn orders_fk(edits: &[Schema], name: &str, columns: Vec<u64>, referenced: Vec<u64>) -> ForeignKey {
        let schema = &edits[0];
        ForeignKey {
            name: name.to_string(),
            table_id: schema.table_by_name("orders").unwrap().id,
            column_id_list: columns.into_iter().map(EntityId::new).collect(),
            referenced_schema_id: schema.id,
            referenced_table_id: schema.table_by_name("users").unwrap().id,
            referenced_column_id_list: referenced.into_iter().map(EntityId::new).collect(),
        }
    }

    #[test]
    fn unnamed_foreign_key_gets_generated_name() {
        let (metadata, mut edits) = orders_and_users();
        let fk = orders_fk(&edits, "", vec![1, 2], vec![1, 2]);
        edits[0].tables[1].foreign_keys.push(fk);

        let merged = merge(&edits, metadata);
        let orders = merged.schemas[0].table("orders").unwrap();
        assert_eq!(orders.foreign_keys.len(), 1);
        let fk = &orders.foreign_keys[0];
        let suffix = fk.name.strip_prefix("orders-fk-").unwrap();
        assert_eq!(suffix.len(), FK_NAME_TOKEN_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        assert_eq!(fk.columns, vec!["user_id", "tenant"]);
        assert_eq!(fk.referenced_columns, vec!["id", "tenant"]);
        assert_eq!(fk.referenced_schema, "s1");
        assert_eq!(fk.referenced_table, "users");
    }

    #[test]
    fn unnamed_canonical_foreign_key_round_trips() {
        let (mut metadata, _) = orders_and_users();
        metadata.schemas[0].tables[1].foreign_keys =
            vec![fk_meta("", &["user_id"], "s1", "users", &["id"])];
        let edits = build_editable_schemas(&metadata.schemas, &[]);
        assert_eq!(edits[0].tables[1].foreign_keys.len(), 1);

        let merged = merge(&edits, metadata.clone());
        assert_eq!(merged, metadata);

        // flattening again stays a fixed point
        let merged = merge(&edits, merged);
        assert_eq!(merged.schemas[0].table("orders").unwrap().foreign_keys.len(), 1);
    }

    #[test]
    fn unnamed_edit_skipped_when_table_has_unnamed_key() {
        let (mut metadata, mut edits) = orders_and_users();
        metadata.schemas[0].tables[1].foreign_keys =
            vec![fk_meta("", &["tenant"], "s1", "users", &["tenant"])];
        let fk = orders_fk(&edits, "", vec![1], vec![1]);
        edits[0].tables[1].foreign_keys.push(fk);

        let merged = merge(&edits, metadata);
        let fks = &merged.schemas[0].table("orders").unwrap().foreign_keys;
        assert_eq!(fks.len(), 1);
        assert_eq!(fks[0].columns, vec!["tenant"]);
    }

    #[test]
    fn foreign_key_with_mismatched_columns_is_skipped() {
        let (metadata, mut edits) = orders_and_users();
        let fk = orders_fk(&edits, "fk", vec![1, 2], vec![1]);
        edits[0].tables[1].foreign_keys.push(fk);
        let merged = merge(&edits, metadata);
        assert!(merged.schemas[0].table("orders").unwrap().foreign_keys.is_empty());
    }

    #[test]
    fn foreign_key_with_unknown_reference_is_skipped() {
        let (metadata, mut edits) = orders_and_users();
        let mut fk = orders_fk(&edits, "fk", vec![1], vec![1]);
        fk.referenced_table_id = EntityId::new(99);
        edits[0].tables[1].foreign_keys.push(fk);
        let merged = merge(&edits, metadata);
        assert!(merged.schemas[0].table("orders").unwrap().foreign_keys.is_empty());
    }

    #[test]
    fn foreign_key_sync_is_additive() {
        let (mut metadata, mut edits) = orders_and_users();
        metadata.schemas[0].tables[1].foreign_keys =
            vec![fk_meta("legacy", &["tenant"], "s1", "users", &["tenant"])];
        metadata.schemas[0].tables[1].foreign_keys.push(fk_meta(
            "fk_user",
            &["tenant"],
            "s1",
            "users",
            &["tenant"],
        ));
        let fk = orders_fk(&edits, "fk_user", vec![1], vec![1]);
        edits[0].tables[1].foreign_keys = vec![fk];

        let merged = merge(&edits, metadata);
        let fks = &merged.schemas[0].table("orders").unwrap().foreign_keys;
        assert_eq!(fks.len(), 2);
        assert_eq!(fks[0].name, "legacy");
        // the same-named canonical key is kept as it was
        assert_eq!(fks[1].columns, vec!["tenant"]);
    }

    #[test]
    fn foreign_key_on_dropped_table_is_skipped() {
        let (metadata, mut edits) = orders_and_users();
        let fk = orders_fk(&edits, "fk", vec![1], vec![1]);
        edits[0].tables[1].foreign_keys.push(fk);
        edits[0].tables[1].status = EntityStatus::Dropped;
        let merged = merge(&edits, metadata);
        assert!(merged.schemas[0].table("orders").is_none());
    }

    #[test]
    fn annotations_regenerated_from_edits() {
        let mut metadata = s1_t1(&["email", "gone"]);
        metadata.schema_configs = vec![SchemaConfig {
            name: "stale".into(),
            table_configs: vec![TableConfig {
                name: "x".into(),
                classification_id: "9".into(),
                column_configs: vec![],
            }],
        }];
        let mut edits = build_editable_schemas(&metadata.schemas, &[]);
        {
            let table = &mut edits[0].tables[0];
            table.columns[0].config.semantic_type_id = "email".into();
            table.columns[1].config.semantic_type_id = "ignored".into();
            table.columns[1].status = EntityStatus::Dropped;
        }

        let merged = merge(&edits, metadata);
        assert_eq!(merged.schema_configs.len(), 1);
        let table_config = &merged.schema_configs[0].table_configs[0];
        assert_eq!(table_config.name, "t1");
        assert_eq!(table_config.column_configs.len(), 1);
        assert_eq!(table_config.column_configs[0].name, "email");
        assert_eq!(table_config.column_configs[0].semantic_type_id, "email");
    }

    #[test]
    fn generated_names_follow_pattern() {
        let mut rng = rng();
        for _ in 0..20 {
            let name = generate_foreign_key_name("t", &mut rng);
            assert!(name.starts_with("t-fk-"));
            assert_eq!(name.len(), "t-fk-".len() + FK_NAME_TOKEN_LEN);
        }
    }
}
