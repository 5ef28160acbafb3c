//! Storefront flows over a [`StoreApi`].

use crate::api::StoreApi;
use crate::FetchError;
use shelf_auth::{ActiveSession, Credentials, SessionContext};
use shelf_commerce::cart::Cart;
use shelf_commerce::catalog::{CategorySlug, ProductPage};
use shelf_commerce::ids::CartId;
use shelf_commerce::search::{CatalogFeed, CatalogQuery};
use tracing::{info, warn};

/// What the catalog view shows on load.
#[derive(Debug, Clone, Default)]
pub struct StorefrontPage {
    /// Products for the requested query.
    pub page: ProductPage,
    /// Sidebar categories; empty when the listing failed to load.
    pub categories: Vec<CategorySlug>,
}

/// Log in and establish the session. Nothing is sent when a field is empty.
pub async fn sign_in<'s, A>(
    api: &A,
    session: &'s mut SessionContext,
    credentials: &Credentials,
    session_minutes: i64,
) -> Result<&'s ActiveSession, FetchError>
where
    A: StoreApi + ?Sized,
{
    credentials.validate()?;
    let grant = api.login(credentials, session_minutes).await?;
    Ok(session.establish(grant.user, grant.token))
}

/// Fetch a product page and the category listing concurrently.
///
/// A failed category listing leaves the sidebar empty; a failed product
/// listing fails the whole load.
pub async fn load_storefront<A>(api: &A, query: &CatalogQuery) -> Result<StorefrontPage, FetchError>
where
    A: StoreApi + ?Sized,
{
    let (page, categories) = futures::join!(api.products(query), api.categories());
    let categories = categories.unwrap_or_else(|e| {
        warn!(error = %e, "failed to load categories");
        Vec::new()
    });
    Ok(StorefrontPage {
        page: page?,
        categories,
    })
}

/// Fetch the next page into the feed. Returns false when there is nothing
/// more to load.
pub async fn load_more<A>(api: &A, feed: &mut CatalogFeed) -> Result<bool, FetchError>
where
    A: StoreApi + ?Sized,
{
    let Some(query) = feed.next_query() else {
        return Ok(false);
    };
    let page = api.products(&query).await?;
    feed.absorb(query, page);
    Ok(true)
}

/// The logged-in user's cart; a user without one gets an empty cart.
pub async fn load_cart<A>(api: &A, session: &SessionContext) -> Result<Cart, FetchError>
where
    A: StoreApi + ?Sized,
{
    let active = session.guard()?;
    match api.user_cart(active.user.id, &active.token).await? {
        Some(cart) => Ok(cart),
        None => {
            info!(user = %active.user.id, "user has no cart");
            Ok(Cart::empty(CartId::new(0), active.user.id))
        }
    }
}
