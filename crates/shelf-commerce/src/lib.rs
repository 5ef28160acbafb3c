//! Storefront domain types and logic for Shelf.
//!
//! This crate holds everything the storefront does with fetched data:
//!
//! - **Catalog**: Products and the normalized category listing
//! - **Search**: The catalog filter, catalog queries, the "load more" feed
//! - **Cart**: Line items, the value-returning cart editor, the local
//!   overlay and the order summary
//!
//! Nothing in here performs I/O.
//!
//! # Example
//!
//! ```rust
//! use shelf_commerce::prelude::*;
//!
//! let products = vec![
//!     Product::new(ProductId::new(1), "Mascara", Money::from_dollars(10), "beauty", 4.5),
//!     Product::new(ProductId::new(2), "Apple", Money::from_dollars(20), "groceries", 3.0),
//! ];
//! let spec = FilterSpec::new().toggle_category("beauty");
//! let visible = filter_products(&products, &spec);
//! assert_eq!(visible.len(), 1);
//!
//! let mut cart = Cart::empty(CartId::new(1), UserId::new(1));
//! cart.items.push(LineItem::new(ProductId::new(5), "Mug", Money::new(500), 2, 0.0));
//! let cart = set_quantity(&cart, ProductId::new(5), -3);
//! assert_eq!(cart.items[0].quantity, 1);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{normalize_categories, CategoryEntry, CategorySlug, Product, ProductPage};

    // Cart
    pub use crate::cart::{
        remove_item, set_quantity, Cart, CartEdit, CartOverlay, CartSummary, LineItem,
        TotalsPolicy,
    };

    // Search
    pub use crate::search::{filter_products, CatalogFeed, CatalogQuery, FilterSpec, Pagination};
}
