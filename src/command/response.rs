//! Response definitions

use std::path::PathBuf;

use crate::document::Document;

/// Result of executing a command
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Id assigned to the inserted document
    Inserted(String),

    /// Matching documents in insertion order
    Documents(Vec<Document>),

    /// Number of documents updated
    Updated(usize),

    /// Number of documents deleted
    Deleted(usize),

    /// Number of matching documents
    Count(usize),

    /// Collection names in creation order, with document counts
    Collections(Vec<(String, usize)>),

    /// Whether the collection existed and was dropped
    Dropped(bool),

    /// Backup written
    BackedUp { path: PathBuf, bytes: u64 },
}
