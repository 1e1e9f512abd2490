//! Error types for the document Q&A service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Service errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Declared MIME type is not one of the supported kinds
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// File parsing error
    #[error("Failed to parse file '{filename}': {message}")]
    FileParse { filename: String, message: String },

    /// Parsing or chunking produced no usable text
    #[error("No extractable content: {0}")]
    EmptyDocument(String),

    /// Required request field is missing
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Embedding generation failed
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    /// LLM endpoint returned a non-success status
    #[error("Upstream LLM error: HTTP {status}")]
    Upstream { status: u16, body: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a file parse error
    pub fn file_parse(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FileParse {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::UnsupportedFileType(mime) => (
                StatusCode::BAD_REQUEST,
                format!("Unsupported file type: {}", mime),
            ),
            Error::FileParse { filename, message } => (
                StatusCode::BAD_REQUEST,
                format!("Failed to parse '{}': {}", filename, message),
            ),
            Error::EmptyDocument(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Error::MissingField(field) => (
                StatusCode::BAD_REQUEST,
                format!("Missing required field: {}", field),
            ),
            // An upstream 4xx means the request content itself was rejected;
            // anything else is the backend's problem and stays generic.
            Error::Upstream { status, body } if *status >= 400 && *status < 500 => {
                tracing::warn!("LLM endpoint rejected request: HTTP {} - {}", status, body);
                (
                    StatusCode::BAD_REQUEST,
                    format!("Upstream LLM error: HTTP {}", status),
                )
            }
            other => {
                tracing::error!("Request failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}
