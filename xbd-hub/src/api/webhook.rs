//! Webhook entry point
//!
//! Response contract:
//! - challenge present: echo it back, nothing else happens
//! - `event` absent: 400
//! - event type outside the handled set: 200 with an acknowledgment body
//! - handled and one linked item mutated: 200, empty body
//! - handled but no linked item found: 200 with an acknowledgment body
//! - any downstream failure: 500 with the error message

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, warn};

use xbd_common::event::ChangeEvent;

use crate::engine::{self, Outcome};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct WebhookBody {
    #[serde(default)]
    challenge: Option<Value>,
    /// Kept loose on purpose: ignored event types carry arbitrary shapes
    /// and still have to be acknowledged.
    #[serde(default)]
    event: Option<Value>,
}

fn acknowledged() -> Response {
    (StatusCode::OK, Json(json!({ "message": "Webhook received" }))).into_response()
}

/// POST /webhooks/dependency
pub async fn handle_webhook(
    State(state): State<AppState>,
    Json(body): Json<WebhookBody>,
) -> Response {
    // Subscription verification handshake; echoed verbatim, never errors.
    if let Some(challenge) = body.challenge {
        return Json(json!({ "challenge": challenge })).into_response();
    }

    let Some(raw) = body.event else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    let event = match ChangeEvent::from_value(&raw) {
        Ok(Some(event)) => event,
        // Unhandled event types are acknowledged, not errored.
        Ok(None) => return acknowledged(),
        Err(e) => {
            error!("undecodable change event: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response();
        }
    };

    let Some(token) = state.tokens.get().await else {
        warn!("webhook received before authorization completed");
        return StatusCode::UNAUTHORIZED.into_response();
    };

    match engine::handle_event(
        state.api.as_ref(),
        &token,
        &state.config.dependency_group,
        &event,
    )
    .await
    {
        Ok(Outcome::Handled) => StatusCode::OK.into_response(),
        Ok(Outcome::NoMatch) => acknowledged(),
        Err(e) => {
            error!("webhook propagation failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
