//! store::file
//!
//! Branch store backed by a directory of JSON files.
//!
//! # Layout
//!
//! One `<name>.json` file per branch. Writes go to `<name>.json.tmp` and are
//! renamed into place, so readers never see a partial record.
//!
//! # Caching
//!
//! Successful reads and writes populate an in-memory copy. A fetch with
//! `use_cache` set may be served from it; a fetch without always re-reads
//! the file.

use async_trait::async_trait;
use log::{debug, trace};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::branch::Branch;
use super::traits::{BranchStore, StoreError};

#[derive(Debug)]
pub struct FileBranchStore {
    dir: PathBuf,
    cache_enabled: bool,
    cache: Mutex<HashMap<String, Branch>>,
}

impl FileBranchStore {
    /// Open a store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache_enabled: true,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Disable the read cache entirely; every fetch re-reads its file.
    pub fn without_cache(mut self) -> Self {
        self.cache_enabled = false;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the record for `name`.
    pub fn branch_path(&self, name: &str) -> Result<PathBuf, StoreError> {
        validate_branch_name(name)?;
        Ok(self.dir.join(format!("{}.json", name)))
    }

    fn cache(&self) -> MutexGuard<'_, HashMap<String, Branch>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn remember(&self, branch: &Branch) {
        if self.cache_enabled {
            self.cache().insert(branch.name.clone(), branch.clone());
        }
    }

    async fn read_branch(&self, name: &str) -> Result<Branch, StoreError> {
        let path = self.branch_path(name)?;
        let contents = match fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound(name.to_string()))
            }
            Err(e) => return Err(StoreError::Io(format!("{}: {}", path.display(), e))),
        };

        let branch: Branch =
            serde_json::from_str(&contents).map_err(|e| StoreError::InvalidRecord {
                name: name.to_string(),
                message: e.to_string(),
            })?;
        if branch.name != name {
            return Err(StoreError::InvalidRecord {
                name: name.to_string(),
                message: format!("record is named '{}'", branch.name),
            });
        }
        Ok(branch)
    }
}

/// Branch names become file names, so path separators and leading dots are refused.
fn validate_branch_name(name: &str) -> Result<(), StoreError> {
    let bad = name.is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\', '\0'])
        || name.ends_with(".tmp");
    if bad {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    Ok(())
}

fn io_error(path: &Path, e: std::io::Error) -> StoreError {
    StoreError::Io(format!("{}: {}", path.display(), e))
}

#[async_trait]
impl BranchStore for FileBranchStore {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn fetch_by_name(&self, name: &str, use_cache: bool) -> Result<Branch, StoreError> {
        let cached = if use_cache && self.cache_enabled {
            self.cache().get(name).cloned()
        } else {
            None
        };
        if let Some(branch) = cached {
            trace!("branch '{}' served from cache", name);
            return Ok(branch);
        }

        let branch = self.read_branch(name).await?;
        debug!("read branch '{}' from {}", name, self.dir.display());
        self.remember(&branch);
        Ok(branch)
    }

    async fn save(&self, branch: &Branch) -> Result<(), StoreError> {
        let path = self.branch_path(&branch.name)?;
        let contents =
            serde_json::to_string_pretty(branch).map_err(|e| StoreError::InvalidRecord {
                name: branch.name.clone(),
                message: e.to_string(),
            })?;

        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| io_error(&self.dir, e))?;

        let temp_path = path.with_extension("json.tmp");
        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| io_error(&temp_path, e))?;
        file.write_all(contents.as_bytes())
            .await
            .map_err(|e| io_error(&temp_path, e))?;
        file.sync_all().await.map_err(|e| io_error(&temp_path, e))?;
        drop(file);

        fs::rename(&temp_path, &path)
            .await
            .map_err(|e| io_error(&path, e))?;

        debug!("saved branch '{}' to {}", branch.name, path.display());
        self.remember(branch);
        Ok(())
    }
}
