//! Storage Module
//!
//! Durable storage for the whole database in one JSON file.
//!
//! ## Responsibilities
//! - Load the data file on open (absent file → no database)
//! - Save the entire database after every mutation
//! - Byte-for-byte backups of the live file
//!
//! ## Save Protocol
//! ```text
//!   serialize database
//!          │
//!          ▼
//!   write {file}.tmp ──► fsync (optional)
//!          │
//!          ▼
//!   rename {file}.tmp → {file}     (atomic replace)
//! ```
//!
//! Readers of `{file}` only ever see a complete database. A crash between the
//! write and the rename can leave `{file}.tmp` behind; it is overwritten by
//! the next save.
//!
//! ## File Format
//! ```text
//! {
//!   "users": [
//!     { "name": "Alice", "_id": "1718000000000000", "_created": ..., "_modified": ... }
//!   ],
//!   "orders": []
//! }
//! ```

mod data_file;

pub use data_file::{DataFile, TEMP_SUFFIX};
