//! Board and item projections
//!
//! Read-only snapshots fetched fresh for every inbound event and discarded
//! afterwards; nothing here is cached across events. The link reference is
//! decoded from the item name once, at construction.

use serde::Deserialize;

use crate::link::{self, LinkRef};

/// One board with its items, in the order the API returned them.
#[derive(Debug, Clone)]
pub struct Board {
    pub id: String,
    pub items: Vec<Item>,
}

/// Item group; the dependency group is recognized by its title.
#[derive(Debug, Clone, Deserialize)]
pub struct Group {
    pub title: String,
}

/// Raw column value as returned by the API; interpretation is deferred to
/// [`crate::column::ColumnPayload`] and the label extractor.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnValue {
    pub id: String,
    #[serde(rename = "type")]
    pub column_type: String,
    #[serde(default)]
    pub value: Option<String>,
}

/// One work item ("pulse" in the external system's vocabulary).
#[derive(Debug, Clone)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub group: Option<Group>,
    pub column_values: Vec<ColumnValue>,
    /// Link reference decoded from `name`, absent for unlinked items.
    pub link: Option<LinkRef>,
}

impl Item {
    pub fn new(
        id: String,
        name: String,
        group: Option<Group>,
        column_values: Vec<ColumnValue>,
    ) -> Self {
        let link = link::decode(&name);
        Self { id, name, group, column_values, link }
    }

    /// True when the item sits in the group with the given marker title.
    pub fn in_group(&self, group_title: &str) -> bool {
        self.group.as_ref().is_some_and(|g| g.title == group_title)
    }
}
