//! Authentication errors.

use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The remote API rejected the username/password pair.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A required login field was empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A gated view was reached without a session.
    #[error("not logged in")]
    NotAuthenticated,

    /// Token expired.
    #[error("token expired")]
    TokenExpired,

    /// Requested token lifetime outside the accepted range.
    #[error("session length must be between 1 and {max} minutes, got {0}", max = crate::MAX_SESSION_MINUTES)]
    InvalidSessionLength(i64),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl AuthError {
    /// Check if this is an authentication failure that should send the user
    /// back to the login step.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials | AuthError::NotAuthenticated | AuthError::TokenExpired
        )
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(e: serde_json::Error) -> Self {
        AuthError::Serialization(e.to_string())
    }
}
