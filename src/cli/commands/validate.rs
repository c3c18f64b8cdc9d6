//! validate command - Report structural problems of canonical metadata

use anyhow::{bail, Result};
use std::path::Path;

use super::files::read_metadata;
use crate::core::validate::validate_database_metadata;
use crate::engine::Context;
use crate::ui::output;

/// Print the structural problems of a metadata file; fails if there are any.
pub fn validate(ctx: &Context, metadata: &Path) -> Result<()> {
    let metadata = read_metadata(metadata)?;
    let violations = validate_database_metadata(&metadata);

    if violations.is_empty() {
        output::print("No structural problems found.", ctx.verbosity());
        return Ok(());
    }

    output::result(output::format_list(&violations, ""));
    bail!("{} structural problem(s) found", violations.len())
}
