//! Command Module
//!
//! The operations exposed by the command-line tool, as typed values.
//!
//! ## Flow
//! ```text
//!   CLI text ──► parse (JSON → Query/Patch/Document) ──► Command
//!                      │                                   │
//!                      └─ InvalidJson (engine untouched)   ▼
//!                                                  Engine::execute
//!                                                          │
//!                                                          ▼
//!                                                      Response
//! ```
//!
//! ### Commands
//! - INSERT: collection + document
//! - FIND:   collection + optional query + optional limit
//! - UPDATE: collection + query + patch
//! - DELETE: collection + query
//! - COUNT:  collection + optional query
//! - LIST:   no arguments
//! - DROP:   collection
//! - BACKUP: destination path

mod parse;
mod request;
mod response;

pub use parse::{parse_document, parse_object, parse_optional_query, parse_patch, parse_query};
pub use request::{Command, CommandType};
pub use response::Response;
