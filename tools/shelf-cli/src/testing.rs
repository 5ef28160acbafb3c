//! In-memory store and context for command tests.

use async_trait::async_trait;
use shelf_auth::{AuthError, AuthToken, Credentials, User, DEMO_PASSWORD};
use shelf_commerce::cart::{Cart, LineItem};
use shelf_commerce::catalog::{CategorySlug, Product, ProductPage};
use shelf_commerce::ids::{CartId, ProductId, UserId};
use shelf_commerce::money::Money;
use shelf_commerce::search::CatalogQuery;
use shelf_data::{FetchError, LoginGrant, StoreApi};

use crate::commands::CredentialArgs;
use crate::config::ShelfConfig;
use crate::context::Context;
use crate::output::Output;

pub struct FakeStore {
    pub products: Vec<Product>,
    pub categories: Vec<CategorySlug>,
    pub cart: Option<Cart>,
}

impl FakeStore {
    /// 30 products alternating between two categories, priced 10, 20, ...
    pub fn new() -> Self {
        let products = (1..=30)
            .map(|i| {
                let category = if i % 2 == 0 { "groceries" } else { "beauty" };
                Product::new(
                    ProductId::new(i),
                    format!("product {}", i),
                    Money::from_dollars(i as i64 * 10),
                    category,
                    (i % 5) as f64 + 0.5,
                )
            })
            .collect();
        let categories = (1..=12)
            .map(|i| CategorySlug::new(format!("category-{}", i)))
            .collect();

        let mut cart = Cart::empty(CartId::new(50), UserId::new(1));
        cart.items.push(LineItem::new(ProductId::new(5), "Mug", Money::new(500), 2, 0.0));
        cart.items.push(LineItem::new(ProductId::new(6), "Tea", Money::new(300), 1, 10.0));

        Self {
            products,
            categories,
            cart: Some(cart.with_recomputed_totals()),
        }
    }
}

pub fn emily() -> User {
    User {
        id: UserId::new(1),
        username: "emilys".to_string(),
        email: "emily.johnson@x.dummyjson.com".to_string(),
        first_name: "Emily".to_string(),
        last_name: "Johnson".to_string(),
        image: None,
    }
}

#[async_trait]
impl StoreApi for FakeStore {
    async fn login(&self, credentials: &Credentials, session_minutes: i64) -> Result<LoginGrant, FetchError> {
        if credentials.password != DEMO_PASSWORD {
            return Err(AuthError::InvalidCredentials.into());
        }
        Ok(LoginGrant {
            user: emily(),
            token: AuthToken::new("tok", None, chrono::Duration::minutes(session_minutes)),
        })
    }

    async fn current_user(&self, token: &AuthToken) -> Result<User, FetchError> {
        if token.bearer() == "tok" {
            Ok(emily())
        } else {
            Err(AuthError::NotAuthenticated.into())
        }
    }

    async fn products(&self, query: &CatalogQuery) -> Result<ProductPage, FetchError> {
        match query {
            CatalogQuery::Browse { limit, skip } => Ok(ProductPage {
                products: self
                    .products
                    .iter()
                    .skip(*skip as usize)
                    .take(*limit as usize)
                    .cloned()
                    .collect(),
                total: self.products.len() as u64,
                skip: *skip,
                limit: *limit,
            }),
            CatalogQuery::Search { q } => {
                let products: Vec<Product> = self
                    .products
                    .iter()
                    .filter(|p| p.title.contains(q.as_str()))
                    .cloned()
                    .collect();
                Ok(ProductPage {
                    total: products.len() as u64,
                    limit: products.len() as u64,
                    skip: 0,
                    products,
                })
            }
        }
    }

    async fn categories(&self) -> Result<Vec<CategorySlug>, FetchError> {
        Ok(self.categories.clone())
    }

    async fn user_cart(&self, _user_id: UserId, _token: &AuthToken) -> Result<Option<Cart>, FetchError> {
        Ok(self.cart.clone())
    }
}

/// A quiet context with default config.
pub fn context() -> Context {
    Context {
        config: ShelfConfig::default(),
        config_path: None,
        output: Output::new(false, true),
        cwd: std::env::temp_dir(),
    }
}

/// Demo credentials as flags.
pub fn demo_login() -> CredentialArgs {
    CredentialArgs {
        username: Some("emilys".to_string()),
        password: Some(DEMO_PASSWORD.to_string()),
    }
}
