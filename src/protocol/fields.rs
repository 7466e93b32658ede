/*!
 * Field readers for response payloads.
 *
 * The API encodes most numbers as strings and is not consistent about it,
 * so every reader accepts both. Strict readers fail with a protocol error;
 * lenient readers fall back to zero.
 */

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Map, Value};

use crate::errors::GengoError;

/// Borrow a value as a JSON object
pub fn object<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>, GengoError> {
    value
        .as_object()
        .ok_or_else(|| GengoError::protocol(format!("Expected {} to be an object", what)))
}

/// Borrow a value as a JSON array
pub fn array<'a>(value: &'a Value, what: &str) -> Result<&'a Vec<Value>, GengoError> {
    value
        .as_array()
        .ok_or_else(|| GengoError::protocol(format!("Expected {} to be an array", what)))
}

/// Borrow a required property
pub fn property<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<&'a Value, GengoError> {
    obj.get(key)
        .ok_or_else(|| GengoError::protocol(format!("Property '{}' not found", key)))
}

/// Textual form of a scalar property; `None` for absent, null or structured values
pub fn text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Integer property, zero when absent or unparseable
pub fn lenient_i64(obj: &Map<String, Value>, key: &str) -> i64 {
    parse_i64(obj, key).unwrap_or(0)
}

/// Decimal property, zero when absent or unparseable
pub fn lenient_f64(obj: &Map<String, Value>, key: &str) -> f64 {
    parse_f64(obj, key).unwrap_or(0.0)
}

/// Integer property that must be present and well formed
pub fn strict_i64(obj: &Map<String, Value>, key: &str) -> Result<i64, GengoError> {
    parse_i64(obj, key).ok_or_else(|| missing(key))
}

/// Decimal property that must be present and well formed
pub fn strict_f64(obj: &Map<String, Value>, key: &str) -> Result<f64, GengoError> {
    parse_f64(obj, key).ok_or_else(|| missing(key))
}

/// Unix timestamp property that must be present and well formed
pub fn strict_timestamp(obj: &Map<String, Value>, key: &str) -> Result<DateTime<Utc>, GengoError> {
    let secs = strict_i64(obj, key)?;
    from_timestamp(secs).ok_or_else(|| missing(key))
}

/// Unix timestamp property; `None` when absent, unparseable or not positive
pub fn lenient_timestamp(obj: &Map<String, Value>, key: &str) -> Option<DateTime<Utc>> {
    parse_i64(obj, key)
        .filter(|secs| *secs > 0)
        .and_then(from_timestamp)
}

/// `1`/`"1"`/`true` flag
pub fn flag(obj: &Map<String, Value>, key: &str) -> bool {
    match obj.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(_) => parse_i64(obj, key) == Some(1),
        None => false,
    }
}

/// Integers of an array property, skipping unparseable items
pub fn int_list(obj: &Map<String, Value>, key: &str) -> Vec<i64> {
    let Some(Value::Array(items)) = obj.get(key) else {
        return Vec::new();
    };

    items.iter().filter_map(value_as_i64).collect()
}

fn parse_i64(obj: &Map<String, Value>, key: &str) -> Option<i64> {
    obj.get(key).and_then(value_as_i64)
}

fn parse_f64(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    match obj.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn from_timestamp(secs: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(secs, 0).single()
}

fn missing(key: &str) -> GengoError {
    GengoError::protocol(format!("Property '{}' is missing or not a number", key))
}
