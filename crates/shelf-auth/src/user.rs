//! User and credential types.

use crate::AuthError;
use serde::{Deserialize, Serialize};
use shelf_commerce::ids::UserId;
use std::fmt;

/// Username of the public demo account.
pub const DEMO_USERNAME: &str = "emilys";

/// Password of the public demo account.
pub const DEMO_PASSWORD: &str = "emilyspass";

/// A logged-in user as reported by the remote API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Remote user ID; carts are looked up by it.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Avatar URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl User {
    /// Name shown in the navigation bar: the first name, else the username.
    pub fn display_name(&self) -> &str {
        if self.first_name.is_empty() {
            &self.username
        } else {
            &self.first_name
        }
    }

    /// "First Last", skipping empty parts.
    pub fn full_name(&self) -> String {
        [self.first_name.as_str(), self.last_name.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Login form input.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    /// Login name.
    pub username: String,
    /// Password, sent only to the login endpoint.
    pub password: String,
}

impl Credentials {
    /// Create credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// The public demo account.
    pub fn demo() -> Self {
        Self::new(DEMO_USERNAME, DEMO_PASSWORD)
    }

    /// Both fields are required.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.username.trim().is_empty() {
            return Err(AuthError::MissingField("username"));
        }
        if self.password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
