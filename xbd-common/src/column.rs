//! Column payload variants
//!
//! The remote API represents column values as loosely-typed JSON blobs
//! whose shape depends on the column's type tag. This module gives each
//! handled tag an explicit decode step into a closed variant instead of
//! shape-probing at every use site.

use serde::Deserialize;
use serde_json::Value;

use crate::{Error, Result};

/// One person or team entry inside a people-typed column value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Person {
    pub id: u64,
    #[serde(default)]
    pub kind: Option<String>,
}

/// Label of a status/color column: display text plus the choice index the
/// mutation API actually accepts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusLabel {
    #[serde(default)]
    pub index: Option<i64>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Decoded column payload, one variant per handled type tag.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnPayload {
    People(Vec<Person>),
    Status { label: Option<StatusLabel> },
    Date { date: Option<String> },
    Text(String),
    Other(Value),
}

impl ColumnPayload {
    /// Decode a serialized column value for the given type tag.
    pub fn decode(type_tag: &str, raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| Error::Decode(format!("column payload ({}): {}", type_tag, e)))?;
        Self::from_value(type_tag, value)
    }

    /// Decode an already-parsed column value for the given type tag.
    pub fn from_value(type_tag: &str, value: Value) -> Result<Self> {
        match type_tag {
            "people" => {
                let persons = value
                    .get("personsAndTeams")
                    .cloned()
                    .unwrap_or_else(|| Value::Array(Vec::new()));
                let persons: Vec<Person> = serde_json::from_value(persons)
                    .map_err(|e| Error::Decode(format!("people column: {}", e)))?;
                Ok(Self::People(persons))
            }
            // "color" is the legacy tag for status columns; same shape.
            "status" | "color" => {
                let label = match value.get("label") {
                    Some(label) if !label.is_null() => Some(
                        serde_json::from_value(label.clone())
                            .map_err(|e| Error::Decode(format!("status column: {}", e)))?,
                    ),
                    _ => None,
                };
                Ok(Self::Status { label })
            }
            "date" => {
                let date = value
                    .get("date")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                Ok(Self::Date { date })
            }
            "text" => match value {
                Value::String(s) => Ok(Self::Text(s)),
                other => Ok(Self::Other(other)),
            },
            _ => Ok(Self::Other(value)),
        }
    }

    /// Choice index for status/color payloads, if one is present.
    pub fn label_index(&self) -> Option<i64> {
        match self {
            Self::Status { label: Some(label) } => label.index,
            _ => None,
        }
    }
}
