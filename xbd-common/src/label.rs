//! Display labels for heterogeneous column payloads
//!
//! Column values arrive either as structured JSON or as a serialized
//! string of it. For notification text we reduce them to a short label.

use serde_json::Value;

use crate::{Error, Result};

/// Reduce a raw column value to a human-readable label.
///
/// Priority order, first match wins: nested `label.text`, `date`, `name`,
/// then the re-serialized value as a fallback. Null or empty input yields
/// the empty string. Strings that look like serialized JSON are parsed
/// first; a malformed one is a [`Error::Decode`], not an empty label.
/// Plain strings pass through unchanged, so extraction is idempotent on
/// its own output.
pub fn extract(raw: &Value) -> Result<String> {
    match raw {
        Value::Null => Ok(String::new()),
        Value::String(s) => extract_from_str(s),
        other => extract_from_value(other),
    }
}

fn extract_from_str(raw: &str) -> Result<String> {
    if raw.is_empty() {
        return Ok(String::new());
    }
    let trimmed = raw.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        let parsed: Value = serde_json::from_str(raw)
            .map_err(|e| Error::Decode(format!("malformed column payload: {}", e)))?;
        extract_from_value(&parsed)
    } else {
        Ok(raw.to_string())
    }
}

fn extract_from_value(value: &Value) -> Result<String> {
    if let Some(text) = value.pointer("/label/text").and_then(Value::as_str) {
        return Ok(text.to_string());
    }
    if let Some(date) = value.get("date").and_then(Value::as_str) {
        return Ok(date.to_string());
    }
    if let Some(name) = value.get("name").and_then(Value::as_str) {
        return Ok(name.to_string());
    }
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s.clone()),
        other => serde_json::to_string(other).map_err(|e| Error::Decode(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn label_text_wins_over_other_fields() {
        let raw = json!({ "label": { "text": "Done", "index": 1 }, "name": "ignored" });
        assert_eq!(extract(&raw).unwrap(), "Done");
    }

    #[test]
    fn date_field() {
        let raw = json!({ "date": "2025-04-01" });
        assert_eq!(extract(&raw).unwrap(), "2025-04-01");
    }

    #[test]
    fn name_field() {
        let raw = json!({ "name": "Design v2" });
        assert_eq!(extract(&raw).unwrap(), "Design v2");
    }

    #[test]
    fn fallback_serializes_unrecognized_shapes() {
        let raw = json!({ "checked": true });
        assert_eq!(extract(&raw).unwrap(), "{\"checked\":true}");
    }

    #[test]
    fn serialized_payload_is_parsed_first() {
        let raw = Value::String("{\"label\":{\"text\":\"Blocked\"}}".to_string());
        assert_eq!(extract(&raw).unwrap(), "Blocked");
    }

    #[test]
    fn plain_string_is_stable() {
        // Extracting from an already-extracted label must be a fixpoint.
        let raw = Value::String("In Progress".to_string());
        let once = extract(&raw).unwrap();
        assert_eq!(once, "In Progress");
        let twice = extract(&Value::String(once)).unwrap();
        assert_eq!(twice, "In Progress");
    }

    #[test]
    fn malformed_serialized_payload_is_an_error() {
        let raw = Value::String("{not valid json".to_string());
        assert!(matches!(extract(&raw), Err(Error::Decode(_))));
    }

    #[test]
    fn null_and_empty_yield_empty_label() {
        assert_eq!(extract(&Value::Null).unwrap(), "");
        assert_eq!(extract(&Value::String(String::new())).unwrap(), "");
    }
}
