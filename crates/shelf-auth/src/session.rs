//! Session management.
//!
//! A [`SessionContext`] is created logged-out, filled in by a successful
//! login and handed to every view that needs the user. Logging out tears
//! the session down; gated views then fail with
//! [`AuthError::NotAuthenticated`].

use crate::token::AuthToken;
use crate::user::User;
use crate::AuthError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

static SESSION_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Create a new session ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a session ID unique within this process.
    pub fn generate() -> Self {
        let seq = SESSION_COUNTER.fetch_add(1, Ordering::Relaxed);
        let ts = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        Self(format!("sess_{:x}_{:x}", ts, seq))
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A logged-in session.
#[derive(Debug, Clone)]
pub struct ActiveSession {
    /// Session ID.
    pub id: SessionId,
    /// The logged-in user.
    pub user: User,
    /// Token for authenticated requests.
    pub token: AuthToken,
    /// When the session began.
    pub established_at: DateTime<Utc>,
}

impl ActiveSession {
    /// Validate the session, returning error if its token is no longer usable.
    pub fn validate(&self) -> Result<(), AuthError> {
        self.token.validate()
    }
}

/// Explicit authentication state passed to gated views.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    active: Option<ActiveSession>,
}

impl SessionContext {
    /// A logged-out context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session after a successful login, replacing any previous one.
    pub fn establish(&mut self, user: User, token: AuthToken) -> &ActiveSession {
        if let Some(previous) = self.active.take() {
            debug!(session = %previous.id, "replacing existing session");
        }
        let session = ActiveSession {
            id: SessionId::generate(),
            user,
            token,
            established_at: Utc::now(),
        };
        info!(
            session = %session.id,
            user = %session.user.username,
            expires_at = %session.token.expires_at,
            "session established"
        );
        self.active.insert(session)
    }

    /// Tear the session down. Returns the ended session, if there was one.
    pub fn end(&mut self) -> Option<ActiveSession> {
        let ended = self.active.take();
        if let Some(session) = &ended {
            info!(session = %session.id, user = %session.user.username, "session ended");
        }
        ended
    }

    /// Whether a session is present.
    pub fn is_authenticated(&self) -> bool {
        self.active.is_some()
    }

    /// The current session, if any, without validating it.
    pub fn current(&self) -> Option<&ActiveSession> {
        self.active.as_ref()
    }

    /// Route guard: the current session, or an error if logged out or expired.
    pub fn guard(&self) -> Result<&ActiveSession, AuthError> {
        let session = self.active.as_ref().ok_or(AuthError::NotAuthenticated)?;
        session.validate()?;
        Ok(session)
    }

    /// The logged-in user.
    pub fn require_user(&self) -> Result<&User, AuthError> {
        self.guard().map(|s| &s.user)
    }

    /// The bearer token for authenticated requests.
    pub fn require_token(&self) -> Result<&AuthToken, AuthError> {
        self.guard().map(|s| &s.token)
    }
}
