//! Inbound change events
//!
//! The webhook delivers a loosely-typed event object; classification maps
//! it onto a closed enum of the four handled change kinds. Everything else
//! is ignored (acknowledged, never an error).

use serde::Deserialize;
use serde_json::Value;

use crate::{Error, Result};

/// Wire shape of the webhook `event` object.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(rename = "pulseId")]
    pub pulse_id: u64,
    #[serde(default)]
    pub value: Value,
    #[serde(rename = "previousValue", default)]
    pub previous_value: Value,
    #[serde(rename = "columnId", default)]
    pub column_id: Option<String>,
    #[serde(rename = "columnTitle", default)]
    pub column_title: Option<String>,
    #[serde(rename = "columnType", default)]
    pub column_type: Option<String>,
}

/// Classified change event entering the sync pipeline.
#[derive(Debug, Clone)]
pub enum ChangeEvent {
    /// Source item was renamed; `value.name` carries the new title.
    Rename {
        pulse_id: u64,
        value: Value,
        previous_value: Value,
    },
    /// A column value changed on the source item.
    ColumnValue {
        pulse_id: u64,
        column_id: String,
        column_title: String,
        column_type: String,
        value: Value,
        previous_value: Value,
    },
    Archive { pulse_id: u64 },
    Delete { pulse_id: u64 },
}

impl ChangeEvent {
    /// Classify a loosely-shaped webhook event.
    ///
    /// `Ok(None)` means the event type is outside the handled set and must
    /// be acknowledged without entering the pipeline — whatever else the
    /// payload looks like, only the type tag is inspected. Handled types
    /// are decoded fully; one that does not fit the wire shape is a decode
    /// error.
    pub fn from_value(event: &Value) -> Result<Option<Self>> {
        let event_type = event.get("type").and_then(Value::as_str).unwrap_or_default();
        match event_type {
            "update_name" | "update_column_value" | "item_archived" | "item_deleted" => {
                let raw: RawEvent = serde_json::from_value(event.clone())
                    .map_err(|e| Error::Decode(format!("change event: {}", e)))?;
                Ok(Self::classify(raw))
            }
            _ => Ok(None),
        }
    }

    /// Map a raw webhook event onto a handled change kind.
    ///
    /// `None` means the event type is outside the handled set and must be
    /// acknowledged without entering the pipeline.
    pub fn classify(raw: RawEvent) -> Option<Self> {
        match raw.event_type.as_str() {
            "update_name" => Some(Self::Rename {
                pulse_id: raw.pulse_id,
                value: raw.value,
                previous_value: raw.previous_value,
            }),
            "update_column_value" => Some(Self::ColumnValue {
                pulse_id: raw.pulse_id,
                column_id: raw.column_id.unwrap_or_default(),
                column_title: raw.column_title.unwrap_or_default(),
                column_type: raw.column_type.unwrap_or_default(),
                value: raw.value,
                previous_value: raw.previous_value,
            }),
            "item_archived" => Some(Self::Archive { pulse_id: raw.pulse_id }),
            "item_deleted" => Some(Self::Delete { pulse_id: raw.pulse_id }),
            _ => None,
        }
    }

    /// Identifier of the source item this event is about.
    pub fn pulse_id(&self) -> u64 {
        match self {
            Self::Rename { pulse_id, .. }
            | Self::ColumnValue { pulse_id, .. }
            | Self::Archive { pulse_id }
            | Self::Delete { pulse_id } => *pulse_id,
        }
    }

    /// Wire name of the event type, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Rename { .. } => "update_name",
            Self::ColumnValue { .. } => "update_column_value",
            Self::Archive { .. } => "item_archived",
            Self::Delete { .. } => "item_deleted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(event_type: &str) -> RawEvent {
        RawEvent {
            event_type: event_type.to_string(),
            pulse_id: 42,
            value: json!({ "name": "New" }),
            previous_value: Value::Null,
            column_id: Some("status_1".to_string()),
            column_title: Some("Status".to_string()),
            column_type: Some("status".to_string()),
        }
    }

    #[test]
    fn classifies_the_four_handled_kinds() {
        assert!(matches!(
            ChangeEvent::classify(raw("update_name")),
            Some(ChangeEvent::Rename { pulse_id: 42, .. })
        ));
        assert!(matches!(
            ChangeEvent::classify(raw("update_column_value")),
            Some(ChangeEvent::ColumnValue { pulse_id: 42, .. })
        ));
        assert!(matches!(
            ChangeEvent::classify(raw("item_archived")),
            Some(ChangeEvent::Archive { pulse_id: 42 })
        ));
        assert!(matches!(
            ChangeEvent::classify(raw("item_deleted")),
            Some(ChangeEvent::Delete { pulse_id: 42 })
        ));
    }

    #[test]
    fn unhandled_kinds_are_ignored() {
        assert!(ChangeEvent::classify(raw("comment_created")).is_none());
        assert!(ChangeEvent::classify(raw("create_pulse")).is_none());
        assert!(ChangeEvent::classify(raw("")).is_none());
    }

    #[test]
    fn unhandled_value_is_ignored_whatever_its_shape() {
        // Ignored types carry whatever fields their kind defines; only the
        // type tag matters. No pulseId here.
        let event = json!({ "type": "create_column", "columnId": "c1" });
        assert!(ChangeEvent::from_value(&event).unwrap().is_none());

        let untyped = json!({ "app": "monday" });
        assert!(ChangeEvent::from_value(&untyped).unwrap().is_none());
    }

    #[test]
    fn handled_value_is_decoded_fully() {
        let event = json!({
            "type": "item_deleted",
            "pulseId": 42
        });
        assert!(matches!(
            ChangeEvent::from_value(&event).unwrap(),
            Some(ChangeEvent::Delete { pulse_id: 42 })
        ));
    }

    #[test]
    fn malformed_handled_value_is_a_decode_error() {
        // A handled type missing its required fields cannot be acted on.
        let event = json!({ "type": "update_name" });
        assert!(matches!(
            ChangeEvent::from_value(&event),
            Err(Error::Decode(_))
        ));
    }

    #[test]
    fn column_update_carries_column_identity() {
        let event = ChangeEvent::classify(raw("update_column_value")).unwrap();
        match event {
            ChangeEvent::ColumnValue { column_id, column_title, column_type, .. } => {
                assert_eq!(column_id, "status_1");
                assert_eq!(column_title, "Status");
                assert_eq!(column_type, "status");
            }
            other => panic!("expected column value event, got {:?}", other),
        }
    }
}
