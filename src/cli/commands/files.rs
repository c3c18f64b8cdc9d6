//! Reading input documents for commands.

use anyhow::{Context as _, Result};
use std::fs;
use std::path::Path;

use crate::core::edit::Schema;
use crate::core::metadata::{parse_metadata, DatabaseMetadata};

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path.display()))
}

/// Read a canonical metadata document.
pub(super) fn read_metadata(path: &Path) -> Result<DatabaseMetadata> {
    let contents = read(path)?;
    parse_metadata(&contents).with_context(|| format!("invalid metadata in '{}'", path.display()))
}

/// Read an editable tree document.
pub(super) fn read_tree(path: &Path) -> Result<Vec<Schema>> {
    let contents = read(path)?;
    serde_json::from_str(&contents)
        .with_context(|| format!("invalid editable tree in '{}'", path.display()))
}
