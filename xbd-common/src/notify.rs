//! Notification message building and assignee extraction
//!
//! One notification per assignee of the matched linked item; the message
//! text is composed from the decoded link title/board plus display labels
//! for the old and new values.

use crate::board::Item;
use crate::column::ColumnPayload;
use crate::event::ChangeEvent;
use crate::label;
use crate::link;
use crate::Result;

/// Collect user ids from every people-typed column on the item.
pub fn extract_assignees(item: &Item) -> Result<Vec<u64>> {
    let mut ids = Vec::new();
    for col in &item.column_values {
        if col.column_type != "people" {
            continue;
        }
        let raw = col.value.as_deref().unwrap_or("{}");
        if let ColumnPayload::People(persons) = ColumnPayload::decode("people", raw)? {
            ids.extend(persons.iter().map(|p| p.id));
        }
    }
    Ok(ids)
}

/// Compose the notification text for one change on one linked item.
pub fn build_message(event: &ChangeEvent, item: &Item) -> Result<String> {
    let (task_name, source_board) = link::title_parts(&item.name);

    match event {
        ChangeEvent::Rename { value, previous_value, .. } => {
            let new_name = label::extract(value)?;
            let old_name = label::extract(previous_value)?;
            Ok(format!(
                "✏️ Task \"{}\" from {} board was renamed to \"{}\"",
                old_name, source_board, new_name
            ))
        }
        ChangeEvent::ColumnValue { column_title, value, previous_value, .. } => {
            let from = label::extract(previous_value)?;
            let to = label::extract(value)?;
            if !from.is_empty() && !to.is_empty() {
                Ok(format!(
                    "📌 \"{}\" changed from \"{}\" to \"{}\" on \"{}\" from \"{}\"",
                    column_title, from, to, task_name, source_board
                ))
            } else {
                Ok(format!("📌 \"{}\" updated on \"{}\"", column_title, task_name))
            }
        }
        ChangeEvent::Archive { .. } => Ok(format!(
            "📦 Task \"{}\" from {} board was archived",
            task_name, source_board
        )),
        ChangeEvent::Delete { .. } => Ok(format!(
            "❌ Task \"{}\" from {} board was deleted",
            task_name, source_board
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{ColumnValue, Item};
    use serde_json::{json, Value};

    fn linked_item(columns: Vec<ColumnValue>) -> Item {
        Item::new(
            "i1".to_string(),
            "Design (linked from Roadmap) [ref:42]".to_string(),
            None,
            columns,
        )
    }

    fn people_column(id: &str, persons: Value) -> ColumnValue {
        ColumnValue {
            id: id.to_string(),
            column_type: "people".to_string(),
            value: Some(json!({ "personsAndTeams": persons }).to_string()),
        }
    }

    #[test]
    fn collects_assignees_across_people_columns() {
        let item = linked_item(vec![
            people_column("owner", json!([{ "id": 7, "kind": "person" }])),
            ColumnValue {
                id: "status_1".to_string(),
                column_type: "status".to_string(),
                value: Some("{\"label\":{\"index\":1}}".to_string()),
            },
            people_column("reviewers", json!([{ "id": 9 }, { "id": 12, "kind": "team" }])),
        ]);
        assert_eq!(extract_assignees(&item).unwrap(), vec![7, 9, 12]);
    }

    #[test]
    fn empty_people_value_yields_no_assignees() {
        let item = linked_item(vec![ColumnValue {
            id: "owner".to_string(),
            column_type: "people".to_string(),
            value: None,
        }]);
        assert_eq!(extract_assignees(&item).unwrap(), Vec::<u64>::new());
    }

    #[test]
    fn malformed_people_value_propagates_decode_error() {
        let item = linked_item(vec![ColumnValue {
            id: "owner".to_string(),
            column_type: "people".to_string(),
            value: Some("{broken".to_string()),
        }]);
        assert!(extract_assignees(&item).is_err());
    }

    #[test]
    fn rename_message() {
        let event = ChangeEvent::Rename {
            pulse_id: 42,
            value: json!({ "name": "Design v2" }),
            previous_value: json!({ "name": "Design" }),
        };
        let msg = build_message(&event, &linked_item(Vec::new())).unwrap();
        assert_eq!(
            msg,
            "✏️ Task \"Design\" from Roadmap board was renamed to \"Design v2\""
        );
    }

    #[test]
    fn column_update_message_with_both_labels() {
        let event = ChangeEvent::ColumnValue {
            pulse_id: 42,
            column_id: "status_1".to_string(),
            column_title: "Status".to_string(),
            column_type: "status".to_string(),
            value: json!({ "label": { "text": "Done", "index": 3 } }),
            previous_value: json!({ "label": { "text": "Working", "index": 1 } }),
        };
        let msg = build_message(&event, &linked_item(Vec::new())).unwrap();
        assert_eq!(
            msg,
            "📌 \"Status\" changed from \"Working\" to \"Done\" on \"Design\" from \"Roadmap\""
        );
    }

    #[test]
    fn column_update_message_without_previous_label() {
        let event = ChangeEvent::ColumnValue {
            pulse_id: 42,
            column_id: "date_1".to_string(),
            column_title: "Due date".to_string(),
            column_type: "date".to_string(),
            value: json!({ "date": "2025-04-01" }),
            previous_value: Value::Null,
        };
        let msg = build_message(&event, &linked_item(Vec::new())).unwrap();
        assert_eq!(msg, "📌 \"Due date\" updated on \"Design\"");
    }

    #[test]
    fn archive_and_delete_messages() {
        let item = linked_item(Vec::new());
        let archived = build_message(&ChangeEvent::Archive { pulse_id: 42 }, &item).unwrap();
        assert_eq!(archived, "📦 Task \"Design\" from Roadmap board was archived");
        let deleted = build_message(&ChangeEvent::Delete { pulse_id: 42 }, &item).unwrap();
        assert_eq!(deleted, "❌ Task \"Design\" from Roadmap board was deleted");
    }

    #[test]
    fn unlinked_item_falls_back_to_unknown_board() {
        let item = Item::new("i1".to_string(), "Loose task".to_string(), None, Vec::new());
        let msg = build_message(&ChangeEvent::Delete { pulse_id: 42 }, &item).unwrap();
        assert_eq!(msg, "❌ Task \"Loose task\" from unknown board was deleted");
    }
}
