//! core::edit::rebuild
//!
//! Canonical → editable reconciliation.
//!
//! # Algorithm
//!
//! [`rebuild_editable_schemas`] refreshes a previous editable tree against new
//! canonical target metadata and the persisted annotations, in three passes:
//!
//! 1. Reconcile existing schemas, tables and columns by name. Entities missing
//!    from the target become `dropped`; surviving ones get their scalar fields
//!    and annotations refreshed; primary keys are rebuilt from scratch.
//! 2. Absorb schemas and tables that exist only in the target, as `created`.
//! 3. Replace foreign keys from the target's canonical foreign keys.
//!
//! Statuses of surviving entities are never reset, so in-flight edits (a column
//! the user dropped, a table the user created) carry across rebuilds.
//!
//! # Failure
//!
//! Rebuilding is total. Every lookup miss degrades to a skip or a drop.

use log::{debug, trace};

use super::flatten::transform_column_edit_to_metadata;
use super::{
    convert_column_metadata_to_column, convert_schema_metadata_to_schema,
    convert_table_metadata_to_table, next_schema_id, primary_key_from_index, schema_by_name,
    ForeignKey, Schema, Table,
};
use crate::core::metadata::{ForeignKeyMetadata, SchemaConfig, SchemaMetadata, TableMetadata};
use crate::core::types::{EntityId, EntityStatus};

/// Refresh an editable tree against new canonical target metadata.
///
/// `original` is never mutated; the result is an independent tree.
///
/// # Example
///
/// ```
/// use schemadraft::core::edit::{build_editable_schemas, rebuild_editable_schemas};
/// use schemadraft::core::metadata::{ColumnMetadata, SchemaMetadata, TableMetadata};
/// use schemadraft::core::types::EntityStatus;
///
/// let column = |name: &str| ColumnMetadata { name: name.into(), column_type: "int".into(), ..Default::default() };
/// let target = |columns: Vec<ColumnMetadata>| vec![SchemaMetadata {
///     name: "s1".into(),
///     tables: vec![TableMetadata { name: "t1".into(), columns, ..Default::default() }],
/// }];
///
/// let original = build_editable_schemas(&target(vec![column("c1"), column("c2")]), &[]);
/// let rebuilt = rebuild_editable_schemas(&original, &target(vec![column("c1"), column("c2"), column("c3")]), &[]);
///
/// let c3 = rebuilt[0].tables[0].column_by_name("c3").unwrap();
/// assert_eq!(c3.status, EntityStatus::Created);
/// ```
pub fn rebuild_editable_schemas(
    original: &[Schema],
    target_schemas: &[SchemaMetadata],
    target_configs: &[SchemaConfig],
) -> Vec<Schema> {
    let mut schemas = original.to_vec();

    reconcile_existing_schemas(&mut schemas, target_schemas, target_configs);
    absorb_new_entities(&mut schemas, target_schemas, target_configs);
    synthesize_editable_foreign_keys(&mut schemas, target_schemas);

    schemas
}

/// Build the editable tree of a fresh session.
///
/// Every entity starts as `normal`: the tree mirrors the target exactly.
pub fn build_editable_schemas(
    target_schemas: &[SchemaMetadata],
    target_configs: &[SchemaConfig],
) -> Vec<Schema> {
    let mut schemas: Vec<Schema> = target_schemas
        .iter()
        .zip(1u64..)
        .map(|(schema, raw_id)| {
            convert_schema_metadata_to_schema(
                schema,
                EntityId::new(raw_id),
                EntityStatus::Normal,
                SchemaConfig::find_or_empty(target_configs, &schema.name),
            )
        })
        .collect();

    synthesize_editable_foreign_keys(&mut schemas, target_schemas);
    schemas
}

/// Pass 1: reconcile schemas already in the tree.
fn reconcile_existing_schemas(
    schemas: &mut [Schema],
    target_schemas: &[SchemaMetadata],
    target_configs: &[SchemaConfig],
) {
    for schema in schemas.iter_mut() {
        let Some(target_schema) = target_schemas.iter().find(|s| s.name == schema.name) else {
            trace!("schema '{}' no longer in target, marking dropped", schema.name);
            schema.status = EntityStatus::Dropped;
            continue;
        };

        schema.config = SchemaConfig::find_or_empty(target_configs, &schema.name);

        for table in schema.tables.iter_mut() {
            match target_schema.table(&table.name) {
                Some(target_table) => reconcile_table(table, target_table, &schema.config),
                None => {
                    trace!(
                        "table '{}.{}' no longer in target, marking dropped",
                        schema.name,
                        table.name
                    );
                    table.status = EntityStatus::Dropped;
                }
            }
        }
    }
}

fn reconcile_table(table: &mut Table, target: &TableMetadata, schema_config: &SchemaConfig) {
    table.comment = target.comment.clone();
    table.user_comment = target.user_comment.clone();
    table.classification = target.classification.clone();
    table.config = schema_config.table_config(&table.name);

    for column in table.columns.iter_mut() {
        column.config = table.config.column_config(&column.name);

        match target.column(&column.name) {
            None => {
                trace!("column '{}' no longer in target, marking dropped", column.name);
                column.status = EntityStatus::Dropped;
            }
            Some(target_column) if transform_column_edit_to_metadata(column) == *target_column => {}
            Some(target_column) => column.assign_from_metadata(target_column),
        }
    }

    for target_column in &target.columns {
        if table.column_by_name(&target_column.name).is_some() {
            continue;
        }
        let id = table.next_column_id();
        let config = table.config.column_config(&target_column.name);
        trace!("column '{}' appeared in target, adding as created", target_column.name);
        table.columns.push(convert_column_metadata_to_column(
            target_column,
            id,
            EntityStatus::Created,
            config,
        ));
    }

    table.primary_key = primary_key_from_index(target.primary_index(), table);
}

/// Pass 2: add schemas and tables that only exist in the target.
fn absorb_new_entities(
    schemas: &mut Vec<Schema>,
    target_schemas: &[SchemaMetadata],
    target_configs: &[SchemaConfig],
) {
    for target_schema in target_schemas {
        match schemas.iter().position(|s| s.name == target_schema.name) {
            Some(index) => {
                let schema = &mut schemas[index];
                for target_table in &target_schema.tables {
                    if schema.table_by_name(&target_table.name).is_some() {
                        continue;
                    }
                    let id = schema.next_table_id();
                    let config = schema.config.table_config(&target_table.name);
                    trace!(
                        "table '{}.{}' appeared in target, adding as created",
                        schema.name,
                        target_table.name
                    );
                    schema.tables.push(convert_table_metadata_to_table(
                        target_table,
                        id,
                        EntityStatus::Created,
                        config,
                    ));
                }
            }
            None => {
                let id = next_schema_id(schemas);
                let config = SchemaConfig::find_or_empty(target_configs, &target_schema.name);
                trace!("schema '{}' appeared in target, adding as created", target_schema.name);
                schemas.push(convert_schema_metadata_to_schema(
                    target_schema,
                    id,
                    EntityStatus::Created,
                    config,
                ));
            }
        }
    }
}

/// Pass 3: replace the foreign keys of every table with a target counterpart.
///
/// Source tables are resolved by name within the first schema of the tree,
/// whatever target schema the foreign key came from. Foreign keys whose
/// referenced schema or table cannot be resolved are skipped; unresolved
/// columns are dropped from the id lists.
fn synthesize_editable_foreign_keys(schemas: &mut [Schema], target_schemas: &[SchemaMetadata]) {
    if schemas.is_empty() {
        return;
    }

    for target_schema in target_schemas {
        for target_table in &target_schema.tables {
            let Some(table_index) = schemas[0]
                .tables
                .iter()
                .position(|table| table.name == target_table.name)
            else {
                continue;
            };

            let source = &schemas[0].tables[table_index];
            let foreign_keys: Vec<ForeignKey> = target_table
                .foreign_keys
                .iter()
                .filter_map(|fk| editable_foreign_key(schemas, source, fk))
                .collect();

            schemas[0].tables[table_index].foreign_keys = foreign_keys;
        }
    }
}

fn editable_foreign_key(
    schemas: &[Schema],
    source: &Table,
    fk: &ForeignKeyMetadata,
) -> Option<ForeignKey> {
    let Some(referenced_schema) = schema_by_name(schemas, &fk.referenced_schema) else {
        debug!(
            "skipping foreign key '{}': referenced schema '{}' not found",
            fk.name, fk.referenced_schema
        );
        return None;
    };
    let Some(referenced_table) = referenced_schema.table_by_name(&fk.referenced_table) else {
        debug!(
            "skipping foreign key '{}': referenced table '{}.{}' not found",
            fk.name, fk.referenced_schema, fk.referenced_table
        );
        return None;
    };

    Some(ForeignKey {
        name: fk.name.clone(),
        table_id: source.id,
        column_id_list: source.column_ids(&fk.columns),
        referenced_schema_id: referenced_schema.id,
        referenced_table_id: referenced_table.id,
        referenced_column_id_list: referenced_table.column_ids(&fk.referenced_columns),
    })
}
