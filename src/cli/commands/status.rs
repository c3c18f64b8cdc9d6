//! status command - List pending changes of an editable tree

use anyhow::Result;
use std::path::Path;

use super::files::{read_metadata, read_tree};
use crate::core::edit::summarize_changes;
use crate::engine::Context;
use crate::ui::output;

pub fn status(ctx: &Context, tree: &Path, target: Option<&Path>) -> Result<()> {
    let schemas = read_tree(tree)?;
    let snapshot = target.map(read_metadata).transpose()?;

    let summary = summarize_changes(&schemas, snapshot.as_ref().map(|m| m.schemas.as_slice()));
    if summary.is_empty() {
        output::print("No pending changes.", ctx.verbosity());
    } else {
        output::result(summary.to_string().trim_end());
    }
    Ok(())
}
