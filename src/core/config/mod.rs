//! core::config
//!
//! Configuration loading.
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (not handled here)
//!
//! # Locations
//!
//! Searched in order:
//! 1. `$SDRAFT_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/sdraft/config.toml`
//! 3. `~/.sdraft/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use schemadraft::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! println!("Branches in: {}", config.store_dir().display());
//! println!("Pretty: {}", config.pretty());
//! ```

pub mod schema;

pub use schema::FileConfig;

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default branch store location, relative to the working directory.
pub const DEFAULT_STORE_DIR: &str = ".sdraft/branches";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Loaded configuration with defaults applied by the accessors.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub file: FileConfig,
    /// Path the config was loaded from, if any
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed.
    /// A missing config file is not an error (defaults are used).
    pub fn load() -> Result<Config, ConfigError> {
        match Self::locate() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    /// Load configuration from an explicit file.
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: FileConfig = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        file.validate()?;

        Ok(Config {
            file,
            path: Some(path.to_path_buf()),
        })
    }

    /// First existing config file in search order.
    fn locate() -> Option<PathBuf> {
        // 1. Check $SDRAFT_CONFIG
        if let Ok(path) = std::env::var("SDRAFT_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/sdraft/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("sdraft/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.sdraft/config.toml
        dirs::home_dir()
            .map(|home| home.join(".sdraft/config.toml"))
            .filter(|path| path.exists())
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Directory of the branch store.
    ///
    /// Defaults to `.sdraft/branches`.
    pub fn store_dir(&self) -> PathBuf {
        self.file
            .store_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_DIR))
    }

    /// Whether JSON output is pretty-printed.
    ///
    /// Defaults to `true`.
    pub fn pretty(&self) -> bool {
        self.file.pretty.unwrap_or(true)
    }

    /// Whether the branch store may serve cached reads.
    ///
    /// Defaults to `true`.
    pub fn cache(&self) -> bool {
        self.file.cache.unwrap_or(true)
    }

    /// Get the path to the loaded config file.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
