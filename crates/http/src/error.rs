//! Error handling for the HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Wire message for every failure that carries no more specific message.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// Wire message for a request cut off by the server timeout.
pub const TIMEOUT_MESSAGE: &str = "request timed out";

/// Standard error response format for all HTTP errors
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Application error types that map to HTTP responses.
///
/// `message` is what the client sees; `detail` and `source` only reach the log.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("bad request: {message} ({detail})")]
    BadRequest { message: String, detail: String },

    #[error("not found: {message} ({detail})")]
    NotFound { message: String, detail: String },

    /// A server-side failure that still gets a specific client message
    #[error("{message}: {source}")]
    Failure {
        message: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("request exceeded {0:?}")]
    Timeout(std::time::Duration),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>, detail: impl std::fmt::Display) -> Self {
        Self::BadRequest {
            message: message.into(),
            detail: detail.to_string(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>, detail: impl std::fmt::Display) -> Self {
        Self::NotFound {
            message: message.into(),
            detail: detail.to_string(),
        }
    }

    /// Create an internal error with a client-visible message
    pub fn failure(message: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::Failure {
            message: message.into(),
            source: source.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
            AppError::Failure { .. } | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message sent to the client
    pub fn public_message(&self) -> &str {
        match self {
            AppError::BadRequest { message, .. }
            | AppError::NotFound { message, .. }
            | AppError::Failure { message, .. } => message,
            AppError::Timeout(_) => TIMEOUT_MESSAGE,
            AppError::Internal(_) => INTERNAL_ERROR_MESSAGE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4();
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(
                error_id = %error_id,
                status_code = %status.as_u16(),
                error = %self,
                "request failed"
            );
        } else {
            tracing::warn!(
                error_id = %error_id,
                status_code = %status.as_u16(),
                error = %self,
                "request rejected"
            );
        }

        let body = ErrorBody {
            error: self.public_message().to_string(),
        };

        (status, Json(body)).into_response()
    }
}
