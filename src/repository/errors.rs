//! Typed failures surfaced by the REST collaborators.
//!
//! The `Display` strings double as user-facing messages, so they mirror the
//! wording the UI always showed for each failure class.

use reqwest::StatusCode;
use thiserror::Error;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Resource not found")]
    NotFound,
    /// The backend rejected the payload; carries its message when present.
    #[error("{0}")]
    BadRequest(String),
    /// Duplicate resource.
    #[error("{0}")]
    Conflict(String),
    #[error("Server error. Please try again later.")]
    Server,
    #[error("Unable to connect to server. Please check if the backend is running.")]
    Unreachable,
    /// The response body did not match the expected shape.
    #[error("Unexpected response from server: {0}")]
    Decode(String),
    #[error("{0}")]
    Other(String),
}

impl RepositoryError {
    /// Maps an HTTP status and optional backend message to the error
    /// taxonomy the views distinguish.
    pub fn from_status(status: StatusCode, message: Option<String>) -> Self {
        match status {
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::BAD_REQUEST => {
                Self::BadRequest(message.unwrap_or_else(|| "Bad request".to_string()))
            }
            StatusCode::CONFLICT => {
                Self::Conflict(message.unwrap_or_else(|| "Resource already exists".to_string()))
            }
            _ if status.is_server_error() => Self::Server,
            _ => Self::Other(
                message.unwrap_or_else(|| "An unexpected error occurred".to_string()),
            ),
        }
    }
}

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Self::Unreachable
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Other(err.to_string())
        }
    }
}
