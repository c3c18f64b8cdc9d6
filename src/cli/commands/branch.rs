//! Branch store commands - baseline, open, commit
//!
//! # Architecture
//!
//! These commands read and write branch records through the
//! [`BranchStore`](crate::store::BranchStore) configured in the context.
//! Each handler builds a runtime and blocks on its async implementation.

use anyhow::{Context as _, Result};
use std::path::Path;

use super::files::read_tree;
use crate::core::edit::Schema;
use crate::engine::{resolve_baseline_metadata, Context, EditSession};
use crate::store::BranchStore;
use crate::ui::output;

/// Print the resolved baseline metadata of a branch.
pub fn baseline(ctx: &Context, branch: &str) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(baseline_impl(ctx, branch))
}

async fn baseline_impl(ctx: &Context, name: &str) -> Result<()> {
    let store = ctx.store();
    let branch = store
        .fetch_by_name(name, ctx.cache)
        .await
        .with_context(|| format!("failed to load branch '{}'", name))?;
    let baseline = resolve_baseline_metadata(&branch, &store)
        .await
        .with_context(|| format!("failed to resolve baseline of '{}'", name))?;

    output::result(baseline.to_json(ctx.pretty)?);
    Ok(())
}

/// Print the editable tree of a fresh session on a branch.
pub fn open(ctx: &Context, branch: &str) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(open_impl(ctx, branch))
}

async fn open_impl(ctx: &Context, name: &str) -> Result<()> {
    let store = ctx.store();
    let session = EditSession::open(&store, name)
        .await
        .with_context(|| format!("failed to open session on '{}'", name))?;

    output::result(output::json(&session.schemas(), ctx.pretty)?);
    Ok(())
}

/// Flatten an edited tree into a branch head and save the branch.
pub fn commit(ctx: &Context, branch: &str, tree: &Path) -> Result<()> {
    let schemas = read_tree(tree)?;
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(commit_impl(ctx, branch, schemas))
}

async fn commit_impl(ctx: &Context, name: &str, schemas: Vec<Schema>) -> Result<()> {
    let store = ctx.store();
    let mut session = EditSession::open(&store, name)
        .await
        .with_context(|| format!("failed to open session on '{}'", name))?;
    *session.schemas_mut() = schemas;

    let outcome = session
        .commit(&store)
        .await
        .with_context(|| format!("failed to save branch '{}'", name))?;

    let verbosity = ctx.verbosity();
    for violation in &outcome.violations {
        output::warn(violation, verbosity);
    }
    output::print(format!("Committed '{}'.", name), verbosity);
    Ok(())
}
