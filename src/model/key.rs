//! Text views of raw upstream scalars
//!
//! Records keep identifiers and coordinates exactly as upstream sent them.
//! These helpers only derive the strings used as map keys and in progress
//! output.

use serde_json::Value;

/// Map key for an identifier: strings as-is, numbers and booleans in
/// their JSON form, anything else empty
pub fn join_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Text for progress output; non-strings are rendered as JSON
pub fn label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
