//! Document Module
//!
//! The JSON document model shared by the engine and the command layer.
//!
//! ## Responsibilities
//! - Document / query / patch value types
//! - Reserved field names assigned by the engine
//! - Exact-match query predicate (shared by find, update and delete)
//! - Patch merge that never touches reserved fields
//!
//! ## Reserved Fields
//! ```text
//! ┌────────────┬──────────┬──────────────────────────────────────┐
//! │ Field      │ Type     │ Written                              │
//! ├────────────┼──────────┼──────────────────────────────────────┤
//! │ _id        │ string   │ once, on insert                      │
//! │ _created   │ number   │ once, on insert (seconds since epoch)│
//! │ _modified  │ number   │ on insert and on every update        │
//! └────────────┴──────────┴──────────────────────────────────────┘
//! ```

mod patch;
mod query;

use indexmap::IndexMap;
use serde_json::{Map, Value};

pub use patch::{apply_patch, stamp_inserted, stamp_modified};
pub use query::{matches, values_equal};

/// A stored record: field name → JSON value, in field insertion order
pub type Document = Map<String, Value>;

/// Field name → required exact value
pub type Query = Map<String, Value>;

/// Field name → new value, merged into matching documents
pub type Patch = Map<String, Value>;

/// Every collection, in creation order, each holding documents in insertion order
pub type Database = IndexMap<String, Vec<Document>>;

/// Unique identifier within a collection
pub const ID_FIELD: &str = "_id";

/// Insert timestamp
pub const CREATED_FIELD: &str = "_created";

/// Last-update timestamp
pub const MODIFIED_FIELD: &str = "_modified";

/// Fields assigned by the engine and never by callers
pub const RESERVED_FIELDS: [&str; 3] = [ID_FIELD, CREATED_FIELD, MODIFIED_FIELD];

/// Whether `field` is one of the engine-assigned fields
pub fn is_reserved(field: &str) -> bool {
    RESERVED_FIELDS.contains(&field)
}
