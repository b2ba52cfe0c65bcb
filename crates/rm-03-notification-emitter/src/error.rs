//! Error types for the Notification Emitter subsystem

use std::time::Duration;
use thiserror::Error;

/// Errors from notification sinks
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sink write timed out after {0:?}")]
    Timeout(Duration),

    #[error("Sink rejected write with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Sink unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur while emitting a notification batch
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("Failed to encode push message: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("Sink failed to store {messages} push messages: {source}")]
    Sink {
        messages: usize,
        #[source]
        source: SinkError,
    },
}
