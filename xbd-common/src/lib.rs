//! # XBD Common Library
//!
//! Shared code for the cross-board dependency sync service:
//! - Error taxonomy
//! - Configuration loading
//! - Board/item projections (read-only, fetched per event)
//! - Link reference codec (the `[ref:<id>]` name suffix)
//! - Column payload decoding and display labels
//! - Change event classification
//! - Notification message building and assignee extraction

pub mod board;
pub mod column;
pub mod config;
pub mod error;
pub mod event;
pub mod label;
pub mod link;
pub mod notify;

pub use error::{Error, Result};
