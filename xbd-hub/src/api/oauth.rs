//! OAuth authorization and callback handlers
//!
//! Boundary wrappers only: build the authorize redirect, exchange the code
//! for a token, stash it in the token store. The sync pipeline never sees
//! any of this; it receives the token as a parameter.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::token::AccessToken;
use crate::AppState;

const OAUTH_SCOPES: &[&str] = &[
    "boards:read",
    "boards:write",
    "users:read",
    "webhooks:write",
    "notifications:write",
];

/// GET /authorization
///
/// 200 when a token is already stored, otherwise redirect the browser to
/// the provider's authorize page.
pub async fn authorization(State(state): State<AppState>) -> Response {
    if state.tokens.is_set().await {
        return StatusCode::OK.into_response();
    }

    let oauth = &state.config.oauth;
    let mut url = match reqwest::Url::parse(&state.config.auth_url) {
        Ok(url) => url,
        Err(e) => {
            error!("invalid auth_url in configuration: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    url.query_pairs_mut()
        .append_pair("client_id", &oauth.client_id)
        .append_pair("redirect_uri", &oauth.redirect_uri)
        .append_pair("scope", &OAUTH_SCOPES.join(" "))
        .append_pair("state", "optional-anti-csrf-token");

    Redirect::temporary(url.as_str()).into_response()
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
}

/// GET /oauth/callback
///
/// Exchange the authorization code for an access token and store it.
pub async fn oauth_callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Response {
    let (Some(code), Some(_anti_csrf)) = (query.code, query.state) else {
        return (StatusCode::BAD_REQUEST, "Missing code").into_response();
    };

    let oauth = &state.config.oauth;
    let exchange = reqwest::Client::new()
        .post(&state.config.token_url)
        .json(&json!({
            "client_id": oauth.client_id,
            "client_secret": oauth.client_secret,
            "code": code,
            "redirect_uri": oauth.redirect_uri,
        }))
        .send()
        .await;

    let response = match exchange {
        Ok(response) if response.status().is_success() => response,
        Ok(response) => {
            error!("token exchange returned {}", response.status());
            return (StatusCode::INTERNAL_SERVER_ERROR, "Token exchange failed").into_response();
        }
        Err(e) => {
            error!("token exchange request failed: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Token exchange failed").into_response();
        }
    };

    let payload: serde_json::Value = match response.json().await {
        Ok(payload) => payload,
        Err(e) => {
            error!("malformed token response: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Token exchange failed").into_response();
        }
    };
    let Some(access_token) = payload.get("access_token").and_then(|v| v.as_str()) else {
        error!("token response carries no access_token");
        return (StatusCode::INTERNAL_SERVER_ERROR, "Token exchange failed").into_response();
    };

    state.tokens.set(AccessToken::new(access_token)).await;
    info!("access token stored, authorization complete");

    Redirect::temporary(&state.config.client_url).into_response()
}
