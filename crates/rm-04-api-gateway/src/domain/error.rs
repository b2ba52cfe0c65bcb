//! API Gateway error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rm_03_notification_emitter::EmitError;
use serde::Serialize;
use thiserror::Error;

use super::config::ConfigError;

/// Errors returned to HTTP clients
#[derive(Debug, Error)]
pub enum ApiError {
    /// The `MU-TAB-ID` header is absent, empty or not valid text
    #[error("Missing or invalid MU-TAB-ID header")]
    MissingTabId,

    /// The query string does not describe a pattern
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// The delta body is not a valid delta batch
    #[error("Invalid delta payload: {0}")]
    InvalidDelta(#[from] serde_json::Error),

    /// Notifications could not be stored
    #[error("{0}")]
    Emit(#[from] EmitError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingTabId | ApiError::InvalidQuery(_) | ApiError::InvalidDelta(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Emit(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

/// Gateway-level errors (not sent to clients)
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Server socket bind error
    #[error("server bind error: {0}")]
    Bind(String),

    /// Metrics could not be registered
    #[error("metrics error: {0}")]
    Metrics(String),

    /// The server stopped with an error
    #[error("server error: {0}")]
    Server(String),
}
