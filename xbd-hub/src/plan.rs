//! Mutation planning
//!
//! Pure mapping from (classified event, matched linked item) to the one
//! outbound write mirroring the change. No network calls here.

use serde_json::{json, Value};

use xbd_common::board::Item;
use xbd_common::column::ColumnPayload;
use xbd_common::event::ChangeEvent;
use xbd_common::link;

/// Placeholder used when a linked item's old name no longer decodes; the
/// rename still goes through rather than failing the event.
const UNKNOWN_PART: &str = "unknown";

/// One outbound write against the remote API.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Rename {
        board_id: String,
        item_id: String,
        new_name: String,
    },
    Delete {
        item_id: String,
    },
    SetColumnValue {
        board_id: String,
        item_id: String,
        column_id: String,
        value: Value,
    },
}

/// Compute the compensating mutation for `item`, or `None` when there is
/// nothing to write (a column update targeting a column the linked item
/// does not carry; the caller keeps scanning).
pub fn plan(event: &ChangeEvent, board_id: &str, item: &Item) -> Option<Mutation> {
    match event {
        ChangeEvent::Rename { value, .. } => {
            let new_title = value.get("name").and_then(Value::as_str).unwrap_or_default();
            // Rebuild the name from the old name's decoded board/ref so the
            // link suffix survives the rename.
            let new_name = match &item.link {
                Some(link) => link::encode(new_title, &link.source_board, link.source_pulse_id),
                None => link::encode_parts(new_title, UNKNOWN_PART, UNKNOWN_PART),
            };
            Some(Mutation::Rename {
                board_id: board_id.to_string(),
                item_id: item.id.clone(),
                new_name,
            })
        }
        ChangeEvent::Archive { .. } | ChangeEvent::Delete { .. } => {
            Some(Mutation::Delete { item_id: item.id.clone() })
        }
        ChangeEvent::ColumnValue { column_id, column_type, value, .. } => {
            let column = item.column_values.iter().find(|c| &c.id == column_id)?;
            Some(Mutation::SetColumnValue {
                board_id: board_id.to_string(),
                item_id: item.id.clone(),
                column_id: column.id.clone(),
                value: reduce_choice_value(column_type, value),
            })
        }
    }
}

/// Choice-type mutation APIs accept only a label index, not the full label
/// object; reduce status/color values carrying one to `{"index": n}`.
fn reduce_choice_value(column_type: &str, value: &Value) -> Value {
    match ColumnPayload::from_value(column_type, value.clone()) {
        Ok(payload) => match payload.label_index() {
            Some(index) => json!({ "index": index }),
            None => value.clone(),
        },
        Err(_) => value.clone(),
    }
}
