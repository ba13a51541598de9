//! Boundary parsing
//!
//! Turns caller-supplied JSON text into documents, queries and patches.
//! Anything that is not a JSON object is rejected here, before it can reach
//! the engine.

use serde_json::Value;

use crate::document::{Document, Patch, Query};
use crate::error::{FarnError, Result};

/// Parse `text` as a JSON object.
///
/// `kind` names the payload in the error message ("document", "query", ...).
pub fn parse_object(kind: &'static str, text: &str) -> Result<serde_json::Map<String, Value>> {
    let value: Value = serde_json::from_str(text).map_err(|e| FarnError::InvalidJson {
        kind,
        reason: e.to_string(),
    })?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(FarnError::InvalidJson {
            kind,
            reason: format!("expected a JSON object, got {}", value_kind(&other)),
        }),
    }
}

pub fn parse_document(text: &str) -> Result<Document> {
    parse_object("document", text)
}

pub fn parse_query(text: &str) -> Result<Query> {
    parse_object("query", text)
}

pub fn parse_patch(text: &str) -> Result<Patch> {
    parse_object("patch", text)
}

/// Parse an optional query; `None` stays `None`
pub fn parse_optional_query(text: Option<&str>) -> Result<Option<Query>> {
    text.map(parse_query).transpose()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
