//! Error types for FarnDB
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using FarnError
pub type Result<T> = std::result::Result<T, FarnError>;

/// Unified error type for FarnDB operations
#[derive(Debug, Error)]
pub enum FarnError {
    // -------------------------------------------------------------------------
    // Data File Errors
    // -------------------------------------------------------------------------
    /// The data file exists but could not be read or parsed.
    #[error("Could not load database file {}: {}", .path.display(), .reason)]
    Load { path: PathBuf, reason: String },

    /// Persisting the database failed. The in-memory change that triggered
    /// the save has already been applied and is not rolled back.
    #[error("Could not save database file {}: {}", .path.display(), .source)]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Backup to {} failed: {}", .path.display(), .source)]
    Backup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Malformed JSON text supplied at the command boundary
    #[error("Invalid JSON {kind}: {reason}")]
    InvalidJson { kind: &'static str, reason: String },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
