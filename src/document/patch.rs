//! Reserved-field bookkeeping and patch merging

use serde_json::Value;

use super::{is_reserved, Document, Patch, CREATED_FIELD, ID_FIELD, MODIFIED_FIELD};
use crate::clock::Tick;

/// Merge `patch` into `document`, overwriting existing fields and adding new ones.
///
/// Reserved fields in the patch are skipped. Returns the number of fields applied.
pub fn apply_patch(document: &mut Document, patch: &Patch) -> usize {
    let mut applied = 0;
    for (field, value) in patch {
        if is_reserved(field) {
            continue;
        }
        document.insert(field.clone(), value.clone());
        applied += 1;
    }
    applied
}

/// Assign `_id`, `_created` and `_modified` for a newly inserted document,
/// replacing any caller-supplied values.
pub fn stamp_inserted(document: &mut Document, tick: Tick) -> String {
    let id = tick.id();
    document.insert(ID_FIELD.to_string(), Value::String(id.clone()));
    document.insert(CREATED_FIELD.to_string(), Value::from(tick.seconds()));
    document.insert(MODIFIED_FIELD.to_string(), Value::from(tick.seconds()));
    id
}

/// Rewrite `_modified` after an update
pub fn stamp_modified(document: &mut Document, tick: Tick) {
    document.insert(MODIFIED_FIELD.to_string(), Value::from(tick.seconds()));
}
