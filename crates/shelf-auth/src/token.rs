//! Authentication tokens.
//!
//! The remote API issues a short-lived access token and a refresh token on
//! login. They live in memory for the length of the session only.

use crate::AuthError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default access token lifetime requested at login, in minutes.
pub const DEFAULT_SESSION_MINUTES: i64 = 60;

/// Longest token lifetime a login may request, in minutes (30 days).
pub const MAX_SESSION_MINUTES: i64 = 60 * 24 * 30;

/// Token lifetime for a login requesting `minutes`.
///
/// Accepts `1..=MAX_SESSION_MINUTES`.
pub fn session_lifetime(minutes: i64) -> Result<Duration, AuthError> {
    if !(1..=MAX_SESSION_MINUTES).contains(&minutes) {
        return Err(AuthError::InvalidSessionLength(minutes));
    }
    Duration::try_minutes(minutes).ok_or(AuthError::InvalidSessionLength(minutes))
}

/// An access/refresh token pair.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthToken {
    /// Bearer token for authenticated requests.
    pub access_token: String,
    /// Token that can renew the access token.
    pub refresh_token: Option<String>,
    /// When the token was issued.
    pub issued_at: DateTime<Utc>,
    /// When the access token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

impl AuthToken {
    /// Create a token issued now that lives for `lifetime`.
    pub fn new(access_token: impl Into<String>, refresh_token: Option<String>, lifetime: Duration) -> Self {
        Self::issued_at(access_token, refresh_token, Utc::now(), lifetime)
    }

    /// Create a token with an explicit issue time.
    ///
    /// An expiry past the representable range is clamped to it.
    pub fn issued_at(
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        let bound = if lifetime < Duration::zero() {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        };
        Self {
            access_token: access_token.into(),
            refresh_token,
            issued_at,
            expires_at: issued_at.checked_add_signed(lifetime).unwrap_or(bound),
        }
    }

    /// Check if token is expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Check if token is expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Validate the token.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.access_token.is_empty() {
            return Err(AuthError::NotAuthenticated);
        }
        if self.is_expired() {
            return Err(AuthError::TokenExpired);
        }
        Ok(())
    }

    /// Time left before expiry, never negative.
    pub fn time_to_expiry(&self) -> Duration {
        (self.expires_at - Utc::now()).max(Duration::zero())
    }

    /// Raw access token, without the `Bearer ` scheme prefix.
    pub fn bearer(&self) -> &str {
        &self.access_token
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("access_token", &"<redacted>")
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
