//! HTTP client error types.

use shelf_auth::AuthError;
use shelf_commerce::error::CommerceError;
use thiserror::Error;

/// Errors that can occur when talking to the remote store.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to send the request.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP error response.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(String),

    /// The response decoded but carried out-of-range values.
    #[error("Invalid data from API: {0}")]
    InvalidData(#[from] CommerceError),

    /// Login or session failure.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl FetchError {
    /// HTTP status of an error response, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if the failure was an authentication problem.
    pub fn is_auth_failure(&self) -> bool {
        match self {
            FetchError::Auth(e) => e.is_auth_failure(),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::JsonError(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_decode() {
            FetchError::ParseError(e.to_string())
        } else if e.is_builder() {
            FetchError::InvalidUrl(e.to_string())
        } else {
            FetchError::RequestError(e.to_string())
        }
    }
}
