//! Coercion primitives for untrusted model output
//!
//! Each helper turns a loosely typed JSON value into a strictly typed one,
//! dropping or defaulting what does not fit instead of failing.

use std::str::FromStr;

use serde_json::Value;

use crate::service::json_extract::JsonObject;

/// Cap for most list fields
pub const DEFAULT_LIST_LIMIT: usize = 10;

/// Cap for "top urgent gaps" style fields
pub const URGENT_GAP_LIMIT: usize = 5;

/// Confidence used when the source value is missing or not numeric
pub const DEFAULT_CONFIDENCE: f64 = 0.7;

/// Render a JSON value as trimmed text
///
/// Strings are used as-is, numbers and booleans by their text form,
/// `null` as empty, and arrays/objects as their JSON text.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

/// Trimmed text of `key`, empty when the key is missing
pub fn text_field(object: &JsonObject, key: &str) -> String {
    object.get(key).map(value_to_text).unwrap_or_default()
}

/// Trimmed text of `key`, or `fallback` when it is missing or blank
pub fn text_field_or(object: &JsonObject, key: &str, fallback: &str) -> String {
    let text = text_field(object, key);
    if text.is_empty() {
        fallback.trim().to_string()
    } else {
        text
    }
}

/// Keep the trimmed, non-empty string entries of a list, up to `max_items`
///
/// Anything other than a list yields an empty list; non-string entries are dropped.
pub fn string_list(value: Option<&Value>, max_items: usize) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .take(max_items)
        .map(str::to_string)
        .collect()
}

/// Parse an enumerated field, falling back to the enum's documented default
pub fn enum_field<T>(object: &JsonObject, key: &str) -> T
where
    T: FromStr + Default,
{
    object
        .get(key)
        .map(value_to_text)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_default()
}

/// Parse a confidence value and clamp it into `[0.0, 1.0]`
pub fn confidence(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };

    parsed
        .filter(|c| !c.is_nan())
        .unwrap_or(DEFAULT_CONFIDENCE)
        .clamp(0.0, 1.0)
}
