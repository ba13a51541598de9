//! Query matching
//!
//! A document matches a query when it contains every queried field with an
//! equal value. Equality is deep and type-sensitive: `30` never equals `"30"`
//! and `true` never equals `1`. Numbers compare by value, so `30` equals `30.0`.

use serde_json::{Number, Value};

use super::{Document, Query};

/// Check a document against every field of a query.
///
/// The empty query matches every document.
pub fn matches(document: &Document, query: &Query) -> bool {
    query.iter().all(|(field, expected)| {
        document
            .get(field)
            .is_some_and(|actual| values_equal(actual, expected))
    })
}

/// Deep equality between two JSON values.
///
/// Arrays compare element-wise in order; objects compare by key set,
/// ignoring field order.
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => numbers_equal(l, r),
        (Value::Array(l), Value::Array(r)) => {
            l.len() == r.len() && l.iter().zip(r).all(|(a, b)| values_equal(a, b))
        }
        (Value::Object(l), Value::Object(r)) => {
            l.len() == r.len()
                && l.iter()
                    .all(|(key, a)| r.get(key).is_some_and(|b| values_equal(a, b)))
        }
        _ => left == right,
    }
}

/// Exact numeric comparison. An integer equals a float only when the float
/// is integral and names the same integer; no side is rounded through `f64`.
fn numbers_equal(left: &Number, right: &Number) -> bool {
    match (integer_value(left), integer_value(right)) {
        (Some(l), Some(r)) => l == r,
        (Some(i), None) => float_equals_integer(right, i),
        (None, Some(i)) => float_equals_integer(left, i),
        (None, None) => match (left.as_f64(), right.as_f64()) {
            (Some(l), Some(r)) => l == r,
            _ => false,
        },
    }
}

fn integer_value(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

fn float_equals_integer(float: &Number, integer: i128) -> bool {
    // 2^127 as f64; integral floats below it convert to i128 exactly
    const LIMIT: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;
    match float.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < LIMIT => f as i128 == integer,
        _ => false,
    }
}
