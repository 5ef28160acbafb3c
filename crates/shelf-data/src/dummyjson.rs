//! [`StoreApi`] over the DummyJSON REST endpoints.

use crate::api::{ApiConfig, LoginGrant, StoreApi};
use crate::{ClientRequestBuilder, FetchClient, FetchError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shelf_auth::{session_lifetime, AuthError, AuthToken, Credentials, User};
use shelf_commerce::cart::Cart;
use shelf_commerce::catalog::{normalize_categories, CategoryEntry, CategorySlug, ProductPage};
use shelf_commerce::ids::UserId;
use shelf_commerce::search::CatalogQuery;
use tracing::{debug, info, warn};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
    expires_in_mins: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    #[serde(flatten)]
    user: User,
    #[serde(alias = "token")]
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CartsEnvelope {
    carts: Vec<Cart>,
}

/// Store client for a DummyJSON-compatible API.
#[derive(Debug, Clone)]
pub struct DummyJsonApi {
    client: FetchClient,
}

impl DummyJsonApi {
    /// Create a client for the configured origin.
    pub fn new(config: ApiConfig) -> Self {
        let client = FetchClient::new()
            .with_base_url(config.base_url)
            .with_timeout(config.timeout)
            .with_default_header("Accept", "application/json");
        Self { client }
    }

    fn products_request(&self, query: &CatalogQuery) -> ClientRequestBuilder {
        let path = if query.is_search() {
            "/products/search"
        } else {
            "/products"
        };
        self.client.get(path).query(query.params())
    }

    fn cart_request(&self, user_id: UserId, token: &AuthToken) -> ClientRequestBuilder {
        self.client
            .get(format!("/carts/user/{}", user_id))
            .bearer_auth(token.bearer())
    }
}

/// Map a failed login response onto the auth error the login form shows.
fn login_error(err: FetchError) -> FetchError {
    match err.status() {
        Some(400) | Some(401) => FetchError::Auth(AuthError::InvalidCredentials),
        _ => err,
    }
}

/// Map a rejected token onto `NotAuthenticated`.
fn session_error(err: FetchError) -> FetchError {
    match err.status() {
        Some(401) | Some(403) => FetchError::Auth(AuthError::NotAuthenticated),
        _ => err,
    }
}

/// Reject a product page carrying out-of-range prices, ratings or discounts.
fn checked_page(page: ProductPage) -> Result<ProductPage, FetchError> {
    page.validate().map_err(|e| {
        warn!(error = %e, "product page failed validation");
        FetchError::from(e)
    })?;
    Ok(page)
}

#[async_trait]
impl StoreApi for DummyJsonApi {
    async fn login(
        &self,
        credentials: &Credentials,
        session_minutes: i64,
    ) -> Result<LoginGrant, FetchError> {
        credentials.validate()?;
        let lifetime = session_lifetime(session_minutes)?;
        let body = LoginRequest {
            username: credentials.username.trim(),
            password: &credentials.password,
            expires_in_mins: session_minutes,
        };
        let response = self
            .client
            .post("/auth/login")
            .json(&body)?
            .send()
            .await?
            .error_for_status()
            .map_err(|e| {
                warn!(username = %credentials.username, error = %e, "login rejected");
                login_error(e)
            })?;

        let login: LoginResponse = response.json()?;
        info!(user = %login.user.username, "logged in");
        Ok(LoginGrant {
            token: AuthToken::new(login.access_token, login.refresh_token, lifetime),
            user: login.user,
        })
    }

    async fn current_user(&self, token: &AuthToken) -> Result<User, FetchError> {
        let response = self
            .client
            .get("/auth/me")
            .bearer_auth(token.bearer())
            .send()
            .await?
            .error_for_status()
            .map_err(session_error)?;
        response.json()
    }

    async fn products(&self, query: &CatalogQuery) -> Result<ProductPage, FetchError> {
        let page: ProductPage = self
            .products_request(query)
            .send()
            .await?
            .error_for_status()?
            .json()?;
        let page = checked_page(page)?;
        debug!(
            count = page.products.len(),
            total = page.total,
            skip = page.skip,
            "loaded products"
        );
        Ok(page)
    }

    async fn categories(&self) -> Result<Vec<CategorySlug>, FetchError> {
        let entries: Vec<CategoryEntry> = self
            .client
            .get("/products/categories")
            .send()
            .await?
            .error_for_status()?
            .json()?;
        Ok(normalize_categories(entries))
    }

    async fn user_cart(&self, user_id: UserId, token: &AuthToken) -> Result<Option<Cart>, FetchError> {
        let envelope: CartsEnvelope = self
            .cart_request(user_id, token)
            .send()
            .await?
            .error_for_status()
            .map_err(session_error)?
            .json()?;
        if envelope.carts.len() > 1 {
            debug!(user = %user_id, carts = envelope.carts.len(), "user has several carts, using the first");
        }
        Ok(envelope.carts.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_commerce::error::CommerceError;
    use shelf_commerce::money::Money;

    fn api() -> DummyJsonApi {
        DummyJsonApi::new(ApiConfig::default())
    }

    #[test]
    fn test_browse_request_url() {
        let req = api().products_request(&CatalogQuery::Browse { limit: 12, skip: 24 });
        assert_eq!(
            req.request().full_url().unwrap().as_str(),
            "https://dummyjson.com/products?limit=12&skip=24"
        );
    }

    #[test]
    fn test_search_request_url() {
        let req = api().products_request(&CatalogQuery::from_search_text("phone", 12));
        assert_eq!(
            req.request().full_url().unwrap().as_str(),
            "https://dummyjson.com/products/search?q=phone"
        );
    }

    #[test]
    fn test_cart_request_carries_token() {
        let token = AuthToken::new("tok", None, chrono::Duration::minutes(60));
        let req = api().cart_request(UserId::new(33), &token);
        assert_eq!(
            req.request().full_url().unwrap().path(),
            "/carts/user/33"
        );
        assert_eq!(
            req.request().headers.get("Authorization").map(String::as_str),
            Some("Bearer tok")
        );
    }

    #[tokio::test]
    async fn test_login_rejects_session_length_before_sending() {
        let api = DummyJsonApi::new(ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..ApiConfig::default()
        });
        let err = api
            .login(&Credentials::demo(), 1_000_000_000_000)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            FetchError::Auth(AuthError::InvalidSessionLength(1_000_000_000_000))
        ));
    }

    #[test]
    fn test_checked_page_rejects_out_of_range_values() {
        let page: ProductPage = serde_json::from_str(
            r#"{"products": [{"id": 1, "title": "Mascara", "price": 9.99, "category": "beauty",
                "rating": 4.94, "stock": 5}], "total": 1, "skip": 0, "limit": 30}"#,
        )
        .unwrap();
        assert_eq!(checked_page(page.clone()).unwrap(), page);

        let mut bad = page;
        bad.products[0].rating = 9.5;
        assert!(matches!(
            checked_page(bad),
            Err(FetchError::InvalidData(CommerceError::InvalidRating(_)))
        ));
    }

    #[test]
    fn test_login_request_body() {
        let body = LoginRequest {
            username: "emilys",
            password: "emilyspass",
            expires_in_mins: 30,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"username": "emilys", "password": "emilyspass", "expiresInMins": 30})
        );
    }

    #[test]
    fn test_login_response_parsing() {
        let json = r#"{
            "id": 1, "username": "emilys", "email": "emily.johnson@x.dummyjson.com",
            "firstName": "Emily", "lastName": "Johnson", "gender": "female",
            "image": "https://dummyjson.com/icon/emilys/128",
            "accessToken": "eyJhbGciOi", "refreshToken": "eyJyZWZyZXNo"
        }"#;
        let login: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(login.user.id, UserId::new(1));
        assert_eq!(login.user.first_name, "Emily");
        assert_eq!(login.access_token, "eyJhbGciOi");
        assert_eq!(login.refresh_token.as_deref(), Some("eyJyZWZyZXNo"));
    }

    #[test]
    fn test_legacy_token_field() {
        let login: LoginResponse =
            serde_json::from_str(r#"{"id": 1, "username": "emilys", "token": "abc"}"#).unwrap();
        assert_eq!(login.access_token, "abc");
        assert!(login.refresh_token.is_none());
    }

    #[test]
    fn test_login_error_mapping() {
        let rejected = FetchError::HttpError {
            status: 400,
            message: "Invalid credentials".to_string(),
        };
        assert!(matches!(
            login_error(rejected),
            FetchError::Auth(AuthError::InvalidCredentials)
        ));

        let outage = FetchError::HttpError {
            status: 503,
            message: "Service Unavailable".to_string(),
        };
        assert!(matches!(login_error(outage), FetchError::HttpError { status: 503, .. }));
        assert!(matches!(login_error(FetchError::Timeout), FetchError::Timeout));
    }

    #[test]
    fn test_session_error_mapping() {
        let expired = FetchError::HttpError {
            status: 401,
            message: "Token Expired!".to_string(),
        };
        assert!(matches!(
            session_error(expired),
            FetchError::Auth(AuthError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_carts_envelope_parsing() {
        let json = r#"{
            "carts": [{
                "id": 50, "userId": 33, "total": 2.5, "discountedTotal": 2.25,
                "totalProducts": 1, "totalQuantity": 1,
                "products": [{
                    "id": 7, "title": "Mug", "price": 2.5, "quantity": 1, "total": 2.5,
                    "discountPercentage": 10.0, "discountedTotal": 2.25
                }]
            }],
            "total": 1, "skip": 0, "limit": 1
        }"#;
        let envelope: CartsEnvelope = serde_json::from_str(json).unwrap();
        let cart = envelope.carts.into_iter().next().unwrap();
        assert_eq!(cart.user_id, UserId::new(33));
        assert_eq!(cart.total, Money::new(250));
        assert_eq!(cart.items.len(), 1);

        let empty: CartsEnvelope = serde_json::from_str(r#"{"carts": [], "total": 0}"#).unwrap();
        assert!(empty.carts.is_empty());
    }
}
