//! The remote store seam.

use crate::FetchError;
use async_trait::async_trait;
use shelf_auth::{AuthToken, Credentials, User};
use shelf_commerce::catalog::{CategorySlug, ProductPage};
use shelf_commerce::cart::Cart;
use shelf_commerce::ids::UserId;
use shelf_commerce::search::CatalogQuery;
use std::time::Duration;

/// Default store API origin.
pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// Default per-request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where and how to reach the store API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// API origin, without a trailing path.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// What a successful login hands back.
#[derive(Debug, Clone)]
pub struct LoginGrant {
    /// The logged-in user.
    pub user: User,
    /// Token for authenticated requests.
    pub token: AuthToken,
}

/// Operations the storefront needs from the remote store.
///
/// Every call is a single attempt; failures surface as [`FetchError`].
#[async_trait]
pub trait StoreApi: Send + Sync {
    /// Exchange credentials for a user and token. Rejected credentials come
    /// back as `AuthError::InvalidCredentials`.
    async fn login(
        &self,
        credentials: &Credentials,
        session_minutes: i64,
    ) -> Result<LoginGrant, FetchError>;

    /// The user a token belongs to.
    async fn current_user(&self, token: &AuthToken) -> Result<User, FetchError>;

    /// One page of the listing, or the results of a search.
    async fn products(&self, query: &CatalogQuery) -> Result<ProductPage, FetchError>;

    /// The category listing, normalized to slugs.
    async fn categories(&self) -> Result<Vec<CategorySlug>, FetchError>;

    /// The user's first cart, if they have one.
    async fn user_cart(&self, user_id: UserId, token: &AuthToken) -> Result<Option<Cart>, FetchError>;
}
