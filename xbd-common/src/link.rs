//! Link reference codec
//!
//! The host system has no native cross-board link column, so the
//! relationship is carried as a suffix on the item's display name:
//!
//! ```text
//! <title> (linked from <sourceBoardName>) [ref:<sourcePulseId>]
//! ```
//!
//! At most one suffix per name; a name without the suffix is unlinked.

use once_cell::sync::Lazy;
use regex::Regex;

static LINK_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.*?) \(linked from ([^)]+)\) \[ref:(\d+)\]$").expect("link suffix regex")
});

/// Decoded link reference embedded in an item name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRef {
    /// Human title with the suffix stripped
    pub title: String,
    /// Name of the board the source item lives on
    pub source_board: String,
    /// Identifier of the source item this one mirrors
    pub source_pulse_id: u64,
}

/// Decode the link suffix from an item name, if present.
pub fn decode(name: &str) -> Option<LinkRef> {
    let caps = LINK_SUFFIX.captures(name)?;
    let source_pulse_id = caps[3].parse().ok()?;
    Some(LinkRef {
        title: caps[1].trim().to_string(),
        source_board: caps[2].to_string(),
        source_pulse_id,
    })
}

/// Split a name into (title, source board), treating undecodable names as
/// unlinked titles from an `"unknown"` board.
pub fn title_parts(name: &str) -> (String, String) {
    match decode(name) {
        Some(link) => (link.title, link.source_board),
        None => (name.to_string(), "unknown".to_string()),
    }
}

/// Substring test for the ref tag.
///
/// Deliberately looser than [`decode`]: a mangled name that no longer
/// matches the full grammar but still carries `[ref:<id>]` textually is
/// still considered linked.
pub fn is_linked_to(name: &str, pulse_id: u64) -> bool {
    name.contains(&format!("[ref:{}]", pulse_id))
}

/// Produce the canonical suffixed name for a linked item.
pub fn encode(title: &str, source_board: &str, pulse_id: u64) -> String {
    encode_parts(title, source_board, &pulse_id.to_string())
}

/// [`encode`] variant accepting a non-numeric ref tag, used for the
/// sentinel path when an old name fails to decode during a rename.
pub fn encode_parts(title: &str, source_board: &str, ref_tag: &str) -> String {
    format!("{} (linked from {}) [ref:{}]", title, source_board, ref_tag)
}
