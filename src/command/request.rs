//! Command definitions

use std::path::PathBuf;

use crate::document::{Document, Patch, Query};

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Insert,
    Find,
    Update,
    Delete,
    Count,
    List,
    Drop,
    Backup,
}

impl CommandType {
    pub fn name(self) -> &'static str {
        match self {
            CommandType::Insert => "insert",
            CommandType::Find => "find",
            CommandType::Update => "update",
            CommandType::Delete => "delete",
            CommandType::Count => "count",
            CommandType::List => "list",
            CommandType::Drop => "drop",
            CommandType::Backup => "backup",
        }
    }

    /// Whether the command can change the data file
    pub fn is_mutating(self) -> bool {
        matches!(
            self,
            CommandType::Insert | CommandType::Update | CommandType::Delete | CommandType::Drop
        )
    }
}

/// A parsed command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Insert one document
    Insert { collection: String, document: Document },

    /// Find documents, optionally filtered and truncated
    Find {
        collection: String,
        query: Option<Query>,
        limit: Option<usize>,
    },

    /// Merge a patch into every matching document
    Update {
        collection: String,
        query: Query,
        patch: Patch,
    },

    /// Remove every matching document
    Delete { collection: String, query: Query },

    /// Count documents, optionally filtered
    Count {
        collection: String,
        query: Option<Query>,
    },

    /// List collections with their document counts
    List,

    /// Drop a collection
    Drop { collection: String },

    /// Copy the data file
    Backup { path: PathBuf },
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Insert { .. } => CommandType::Insert,
            Command::Find { .. } => CommandType::Find,
            Command::Update { .. } => CommandType::Update,
            Command::Delete { .. } => CommandType::Delete,
            Command::Count { .. } => CommandType::Count,
            Command::List => CommandType::List,
            Command::Drop { .. } => CommandType::Drop,
            Command::Backup { .. } => CommandType::Backup,
        }
    }

    /// The collection the command targets, if any
    pub fn collection(&self) -> Option<&str> {
        match self {
            Command::Insert { collection, .. }
            | Command::Find { collection, .. }
            | Command::Update { collection, .. }
            | Command::Delete { collection, .. }
            | Command::Count { collection, .. }
            | Command::Drop { collection } => Some(collection.as_str()),
            Command::List | Command::Backup { .. } => None,
        }
    }
}
