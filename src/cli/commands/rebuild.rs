//! rebuild command - Refresh an editable tree against target metadata

use anyhow::Result;
use std::path::Path;

use super::files::{read_metadata, read_tree};
use crate::core::edit::{build_editable_schemas, rebuild_editable_schemas};
use crate::engine::Context;
use crate::ui::output;

pub fn rebuild(ctx: &Context, target: &Path, tree: Option<&Path>) -> Result<()> {
    let target = read_metadata(target)?;

    let schemas = match tree {
        Some(path) => {
            let original = read_tree(path)?;
            rebuild_editable_schemas(&original, &target.schemas, &target.schema_configs)
        }
        None => build_editable_schemas(&target.schemas, &target.schema_configs),
    };

    output::result(output::json(&schemas, ctx.pretty)?);
    Ok(())
}
