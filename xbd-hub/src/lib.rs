//! xbd-hub library - Cross-board dependency sync service
//!
//! Receives item-change webhooks from the work-management tool, mirrors
//! source-item changes onto linked items across boards, and notifies the
//! linked items' assignees.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use xbd_common::config::Config;

use crate::monday::MondayApi;
use crate::token::TokenStore;

pub mod api;
pub mod engine;
pub mod monday;
pub mod plan;
pub mod token;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Outbound API, behind a trait for test substitution
    pub api: Arc<dyn MondayApi>,
    /// Token obtained via the OAuth callback
    pub tokens: TokenStore,
}

impl AppState {
    /// Create new application state with an empty token store
    pub fn new(config: Config, api: Arc<dyn MondayApi>) -> Self {
        Self {
            config: Arc::new(config),
            api,
            tokens: TokenStore::new(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health_check))
        .route("/authorization", get(api::authorization))
        .route("/oauth/callback", get(api::oauth_callback))
        .route("/webhooks/dependency", post(api::handle_webhook))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
