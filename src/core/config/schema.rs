//! core::config::schema
//!
//! Configuration file schema.
//!
//! # Validation
//!
//! Values are validated after parsing; unknown keys are rejected at parse
//! time.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// User configuration.
///
/// # Example
///
/// ```toml
/// store_dir = "/var/lib/sdraft/branches"
/// pretty = true
/// cache = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Directory holding one JSON file per branch
    pub store_dir: Option<PathBuf>,

    /// Pretty-print JSON output
    pub pretty: Option<bool>,

    /// Serve repeated branch reads from memory
    pub cache: Option<bool>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(dir) = &self.store_dir {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "store_dir must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}
