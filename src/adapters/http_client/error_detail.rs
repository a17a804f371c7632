//! Error message extraction from exchange failure bodies.
//!
//! Upstream services report failures in several shapes. The lookup walks
//! them from most to least specific:
//!
//! 1. `error` as a string
//! 2. `error.message`
//! 3. `details` as a string
//! 4. `details.error` as a string, or `details.error.message`
//! 5. top-level `message`
//! 6. the caller's fallback (the HTTP status text)

use serde_json::Value;

/// Returns the most specific error message in `payload`, or `fallback`.
pub fn extract_error_detail(payload: &Value, fallback: &str) -> String {
    let error = payload.get("error");
    let details = payload.get("details");
    let nested = details.and_then(|d| d.get("error"));

    error
        .and_then(Value::as_str)
        .or_else(|| message_of(error))
        .or_else(|| details.and_then(Value::as_str))
        .or_else(|| nested.and_then(Value::as_str))
        .or_else(|| message_of(nested))
        .or_else(|| payload.get("message").and_then(Value::as_str))
        .unwrap_or(fallback)
        .to_string()
}

fn message_of(value: Option<&Value>) -> Option<&str> {
    value?.get("message")?.as_str()
}
