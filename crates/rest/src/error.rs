//! Error types for the phrase API.
//!
//! Every error is rendered as a JSON body of the form
//!
//! ```json
//! { "statusCode": 404, "error": "Not Found", "message": "Phrase not found" }
//! ```
//!
//! # Error Mapping
//!
//! | Storage Error | HTTP Status | Message |
//! |--------------|-------------|---------|
//! | NotFound | 404 | `Phrase not found` |
//! | InvalidSort | 400 | the parse failure |
//! | Backend | 500 | generic, detail is logged |
//! | Seed | 500 | generic, detail is logged |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use phrasebook_persistence::error::StorageError;
use std::fmt;

/// Message returned for every not-found outcome.
pub const NOT_FOUND_MESSAGE: &str = "Phrase not found";

const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

/// The primary error type for REST API operations.
#[derive(Debug)]
pub enum RestError {
    /// No phrase matched (HTTP 404).
    ///
    /// Absent ids, missing translations and empty searches are not
    /// distinguished in the response.
    NotFound {
        /// What was looked up, for logs only.
        lookup: String,
    },

    /// Bad request (HTTP 400).
    BadRequest {
        /// Description of the problem.
        message: String,
    },

    /// Internal server error (HTTP 500).
    InternalError {
        /// Error message, logged but not returned.
        message: String,
    },
}

impl RestError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::NotFound { .. } => StatusCode::NOT_FOUND,
            RestError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RestError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::NotFound { lookup } => write!(f, "Phrase not found: {}", lookup),
            RestError::BadRequest { message } => write!(f, "Bad request: {}", message),
            RestError::InternalError { message } => write!(f, "Internal error: {}", message),
        }
    }
}

impl std::error::Error for RestError {}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            RestError::NotFound { lookup } => {
                tracing::debug!(lookup = %lookup, "Phrase not found");
                NOT_FOUND_MESSAGE.to_string()
            }
            RestError::BadRequest { message } => message.clone(),
            RestError::InternalError { message } => {
                tracing::error!(error = %message, "Internal error while handling request");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        };

        (status, Json(error_body(status, &message))).into_response()
    }
}

/// Builds the JSON error body for a status and message.
pub fn error_body(status: StatusCode, message: &str) -> serde_json::Value {
    serde_json::json!({
        "statusCode": status.as_u16(),
        "error": status.canonical_reason().unwrap_or("Unknown"),
        "message": message,
    })
}

impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { lookup } => RestError::NotFound { lookup },
            StorageError::InvalidSort { value, message } => RestError::BadRequest {
                message: format!("Invalid sortBy '{}': {}", value, message),
            },
            StorageError::Backend(e) => RestError::InternalError {
                message: e.to_string(),
            },
            StorageError::Seed(e) => RestError::InternalError {
                message: e.to_string(),
            },
        }
    }
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;
