//! flatten command - Merge an editable tree into canonical metadata

use anyhow::Result;
use std::path::Path;

use super::files::{read_metadata, read_tree};
use crate::core::edit::merge_schema_edit_to_metadata;
use crate::core::validate::validate_database_metadata;
use crate::engine::Context;
use crate::ui::output;

pub fn flatten(ctx: &Context, tree: &Path, metadata: &Path) -> Result<()> {
    let schemas = read_tree(tree)?;
    let metadata = read_metadata(metadata)?;

    let merged = merge_schema_edit_to_metadata(&schemas, metadata);
    for violation in validate_database_metadata(&merged) {
        output::warn(violation, ctx.verbosity());
    }

    output::result(merged.to_json(ctx.pretty)?);
    Ok(())
}
