//! HTTP API handlers for xbd-hub

pub mod health;
pub mod oauth;
pub mod webhook;

pub use health::health_check;
pub use oauth::{authorization, oauth_callback};
pub use webhook::handle_webhook;
