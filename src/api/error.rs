//! API error types for the refunds client.

use thiserror::Error;

/// Errors that can occur when talking to the refunds API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Authentication failed - missing or invalid API token.
    #[error("Authentication failed: check your API token")]
    Unauthorized { message: Option<String> },

    /// The booking or endpoint was not found.
    #[error("Not found: {}", .message.as_deref().unwrap_or("resource does not exist"))]
    NotFound { message: Option<String> },

    /// The server refused the request as invalid (4xx other than auth/404).
    #[error("Request rejected (HTTP {status}): {}", .message.as_deref().unwrap_or("no details"))]
    Rejected { status: u16, message: Option<String> },

    /// Rate limited by the API.
    #[error("Rate limited: please wait before retrying")]
    RateLimited { message: Option<String> },

    /// Server-side failure.
    #[error("Server error (HTTP {status}): {}", .message.as_deref().unwrap_or("no details"))]
    ServerError { status: u16, message: Option<String> },

    /// Network or HTTP error, including timeouts.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Keyring error when storing/retrieving tokens.
    #[error("Keyring error: {0}")]
    Keyring(String),

    /// Invalid response from the API.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Create an error from a non-success HTTP status and any message the
    /// server put in the body.
    pub fn from_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        match status.as_u16() {
            401 | 403 => ApiError::Unauthorized { message },
            404 => ApiError::NotFound { message },
            429 => ApiError::RateLimited { message },
            500..=599 => ApiError::ServerError {
                status: status.as_u16(),
                message,
            },
            code => ApiError::Rejected {
                status: code,
                message,
            },
        }
    }

    /// The human-readable message the server sent along with the error, if
    /// there was one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { message }
            | ApiError::NotFound { message }
            | ApiError::Rejected { message, .. }
            | ApiError::RateLimited { message }
            | ApiError::ServerError { message, .. } => message.as_deref(),
            ApiError::Network(_)
            | ApiError::InvalidUrl(_)
            | ApiError::Keyring(_)
            | ApiError::InvalidResponse(_) => None,
        }
    }
}
