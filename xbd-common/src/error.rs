//! Common error types for XBD

use thiserror::Error;

/// Common result type for XBD operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by the sync pipeline and its collaborators
///
/// Decode/Fetch/Mutation/Notify all abort the event being processed; none
/// of them is retried within the same invocation.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed structured column payload
    #[error("Decode error: {0}")]
    Decode(String),

    /// Board/item retrieval from the remote API failed
    #[error("Board fetch failed: {0}")]
    Fetch(String),

    /// Remote write (rename/delete/column update) failed
    #[error("Mutation failed: {0}")]
    Mutation(String),

    /// Notification delivery failed
    #[error("Notification failed: {0}")]
    Notify(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
