//! Event pipeline: locate the linked item, mirror the change, notify
//!
//! One strictly sequential chain of awaits per event; the only shared
//! state is the remote API itself. Boards are fetched fresh every time and
//! the link graph is re-derived from item names on the spot.

use tracing::{debug, info};

use xbd_common::event::ChangeEvent;
use xbd_common::link;
use xbd_common::notify;
use xbd_common::Result;

use crate::monday::MondayApi;
use crate::plan::{self, Mutation};
use crate::token::AccessToken;

/// Result of running one classified event through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// One linked item was mutated and its assignees notified.
    Handled,
    /// No item in the dependency group references the source item.
    NoMatch,
}

/// Handle one classified change event.
///
/// Scans boards in fetch order and items in board order. The first item in
/// the dependency group whose name carries the source ref tag receives the
/// full mutate + notify sequence, after which scanning stops; further
/// linked items are left untouched. A matched item that lacks the target
/// column of a column-update event does not stop the scan.
pub async fn handle_event(
    api: &dyn MondayApi,
    token: &AccessToken,
    dependency_group: &str,
    event: &ChangeEvent,
) -> Result<Outcome> {
    let boards = api.fetch_boards(token).await?;
    let pulse_id = event.pulse_id();

    for board in &boards {
        for item in &board.items {
            if !item.in_group(dependency_group) {
                continue;
            }
            if !link::is_linked_to(&item.name, pulse_id) {
                continue;
            }

            let Some(mutation) = plan::plan(event, &board.id, item) else {
                continue;
            };

            debug!(
                "item {} on board {} references pulse {}",
                item.id, board.id, pulse_id
            );
            apply(api, token, &mutation).await?;
            notify_assignees(api, token, &board.id, event, item).await?;
            info!(
                "propagated {} for pulse {} to item {} on board {}",
                event.kind(),
                pulse_id,
                item.id,
                board.id
            );
            return Ok(Outcome::Handled);
        }
    }

    debug!("no linked item found for pulse {}", pulse_id);
    Ok(Outcome::NoMatch)
}

async fn apply(api: &dyn MondayApi, token: &AccessToken, mutation: &Mutation) -> Result<()> {
    match mutation {
        Mutation::Rename { board_id, item_id, new_name } => {
            api.change_item_name(token, board_id, item_id, new_name).await?;
        }
        Mutation::Delete { item_id } => {
            api.delete_item(token, item_id).await?;
        }
        Mutation::SetColumnValue { board_id, item_id, column_id, value } => {
            api.change_column_value(token, board_id, item_id, column_id, value)
                .await?;
        }
    }
    Ok(())
}

/// One notification per assignee, sequentially; the first failure aborts.
async fn notify_assignees(
    api: &dyn MondayApi,
    token: &AccessToken,
    board_id: &str,
    event: &ChangeEvent,
    item: &xbd_common::board::Item,
) -> Result<()> {
    let user_ids = notify::extract_assignees(item)?;
    let message = notify::build_message(event, item)?;
    for user_id in user_ids {
        api.create_notification(token, user_id, board_id, &message).await?;
    }
    Ok(())
}
