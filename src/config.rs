//! Configuration for FarnDB
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{FarnError, Result};

/// Main configuration for a FarnDB instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Path of the JSON data file.
    /// Saves go through a sibling `{path}.tmp` file that is renamed over it.
    pub path: PathBuf,

    /// What to do when the data file exists but cannot be loaded
    pub load_mode: LoadMode,

    // -------------------------------------------------------------------------
    // Save Configuration
    // -------------------------------------------------------------------------
    /// Pretty-print the data file (two-space indent)
    pub pretty: bool,

    /// fsync the temporary file before renaming it over the live file
    pub sync_on_save: bool,

    /// Create missing parent directories of `path` on save
    pub create_dirs: bool,
}

/// Behaviour when an existing data file is unreadable or malformed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Log a warning and start with an empty database
    #[default]
    Lenient,

    /// Fail `Engine::open` with `FarnError::Load`
    Strict,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: PathBuf::from("farndb.json"),
            load_mode: LoadMode::Lenient,
            pretty: true,
            sync_on_save: true,
            create_dirs: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check that the config describes a usable data file
    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(FarnError::Config("database path must not be empty".to_string()));
        }
        if self.path.file_name().is_none() {
            return Err(FarnError::Config(format!(
                "database path {} does not name a file",
                self.path.display()
            )));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data file path
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.path = path.into();
        self
    }

    /// Set the load mode
    pub fn load_mode(mut self, mode: LoadMode) -> Self {
        self.config.load_mode = mode;
        self
    }

    /// Shorthand for `load_mode(LoadMode::Strict)`
    pub fn strict(self) -> Self {
        self.load_mode(LoadMode::Strict)
    }

    /// Enable or disable pretty-printing of the data file
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.config.pretty = pretty;
        self
    }

    /// Enable or disable fsync before the atomic rename
    pub fn sync_on_save(mut self, sync: bool) -> Self {
        self.config.sync_on_save = sync;
        self
    }

    /// Enable or disable creation of missing parent directories
    pub fn create_dirs(mut self, create: bool) -> Self {
        self.config.create_dirs = create;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
