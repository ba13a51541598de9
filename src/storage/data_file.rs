//! Data file
//!
//! Reads and atomically rewrites the JSON data file.

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::document::Database;
use crate::error::{FarnError, Result};

/// Suffix appended to the data file name for the temporary save target
pub const TEMP_SUFFIX: &str = ".tmp";

/// Handle on the data file and its temporary sibling
#[derive(Debug, Clone)]
pub struct DataFile {
    /// Live data file
    path: PathBuf,
    /// Temporary file renamed over `path` on save
    temp_path: PathBuf,
    pretty: bool,
    sync_on_save: bool,
    create_dirs: bool,
}

impl DataFile {
    pub fn new(config: &Config) -> Self {
        Self {
            path: config.path.clone(),
            temp_path: Self::temp_path_for(&config.path),
            pretty: config.pretty,
            sync_on_save: config.sync_on_save,
            create_dirs: config.create_dirs,
        }
    }

    /// Read the database from disk
    ///
    /// Returns:
    /// - `Ok(Some(database))` — file parsed
    /// - `Ok(None)` — file does not exist
    /// - `Err(FarnError::Load)` — file exists but is unreadable or malformed
    pub fn load(&self) -> Result<Option<Database>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.load_error(e.to_string())),
        };

        let database: Database =
            serde_json::from_slice(&bytes).map_err(|e| self.load_error(e.to_string()))?;

        Ok(Some(database))
    }

    /// Serialize the entire database and atomically replace the data file.
    ///
    /// Returns the number of bytes written.
    pub fn save(&self, database: &Database) -> Result<usize> {
        let bytes = self.encode(database)?;

        self.write_atomic(&bytes).map_err(|source| FarnError::Save {
            path: self.path.clone(),
            source,
        })?;

        Ok(bytes.len())
    }

    /// Copy the live data file to `destination`.
    ///
    /// Returns the number of bytes copied.
    pub fn backup(&self, destination: &Path) -> Result<u64> {
        fs::copy(&self.path, destination).map_err(|source| FarnError::Backup {
            path: destination.to_path_buf(),
            source,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn encode(&self, database: &Database) -> Result<Vec<u8>> {
        let mut bytes = if self.pretty {
            serde_json::to_vec_pretty(database)?
        } else {
            serde_json::to_vec(database)?
        };
        bytes.push(b'\n');
        Ok(bytes)
    }

    fn write_atomic(&self, bytes: &[u8]) -> io::Result<()> {
        if self.create_dirs {
            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.temp_path)?;

        file.write_all(bytes)?;
        if self.sync_on_save {
            file.sync_all()?;
        }
        drop(file);

        fs::rename(&self.temp_path, &self.path)
    }

    fn load_error(&self, reason: String) -> FarnError {
        FarnError::Load {
            path: self.path.clone(),
            reason,
        }
    }

    /// "data/farndb.json" → "data/farndb.json.tmp"
    fn temp_path_for(path: &Path) -> PathBuf {
        let mut name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| OsString::from("farndb"));
        name.push(TEMP_SUFFIX);
        path.with_file_name(name)
    }
}
