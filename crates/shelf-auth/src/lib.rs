//! Authentication module for Shelf.
//!
//! Login credentials, the bearer token handed out by the remote API, and the
//! explicit session context that gated views receive instead of reaching
//! for global state.

mod error;
mod session;
mod token;
mod user;

pub use error::AuthError;
pub use session::{ActiveSession, SessionContext, SessionId};
pub use token::{session_lifetime, AuthToken, DEFAULT_SESSION_MINUTES, MAX_SESSION_MINUTES};
pub use user::{Credentials, User, DEMO_PASSWORD, DEMO_USERNAME};
