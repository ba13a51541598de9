//! # FarnDB
//!
//! A lightweight embedded JSON document store:
//! - One data file holding every collection
//! - Exact-match queries over schemaless documents
//! - Engine-assigned `_id`, `_created` and `_modified` fields
//! - Whole-database atomic saves (temp file + rename) after every mutation
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │               farndb-cli  /  SharedEngine                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Command
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Engine                                 │
//! │          (resident database, single owner)                   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┼────────────┐
//!          │            │            │
//!          ▼            ▼            ▼
//!   ┌───────────┐ ┌───────────┐ ┌───────────┐
//!   │ Document  │ │   Clock   │ │  Storage  │
//!   │ (match,   │ │ (ids and  │ │ (JSON     │
//!   │  patch)   │ │  stamps)  │ │  file)    │
//!   └───────────┘ └───────────┘ └───────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use farndb::Engine;
//! use serde_json::json;
//!
//! # fn main() -> farndb::Result<()> {
//! let mut db = Engine::open_path("app.json")?;
//!
//! let doc = json!({"name": "Alice", "age": 30});
//! let id = db.insert("users", doc.as_object().cloned().unwrap_or_default())?;
//!
//! let query = json!({"name": "Alice"}).as_object().cloned().unwrap_or_default();
//! let alice = db.find_one("users", &query);
//! assert!(alice.is_some());
//! # let _ = id;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod clock;
pub mod document;
pub mod storage;
pub mod command;
pub mod engine;
pub mod shared;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{FarnError, Result};
pub use config::{Config, LoadMode};
pub use document::{Database, Document, Patch, Query};
pub use engine::{Engine, LoadReport};
pub use shared::SharedEngine;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of FarnDB
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
