//! Helpers for JSON-typed TEXT columns.

use serde_json::Value;

/// Parse a JSON string-array column (e.g. photo URLs)
pub fn parse_string_list(json: Option<&str>) -> Vec<String> {
    json.and_then(|s| serde_json::from_str(s).ok())
        .unwrap_or_default()
}

/// Serialize a string list for storage, omitting empty lists
pub fn serialize_string_list(items: &[String]) -> Option<String> {
    if items.is_empty() {
        None
    } else {
        serde_json::to_string(items).ok()
    }
}

/// Parse a free-form JSON object column (e.g. vehicle features)
pub fn parse_json_object(json: Option<&str>) -> Option<Value> {
    json.and_then(|s| serde_json::from_str(s).ok())
}

/// Serialize a free-form JSON object for storage
pub fn serialize_json_object(value: Option<&Value>) -> Option<String> {
    value.and_then(|v| serde_json::to_string(v).ok())
}
