//! Product catalog module.
//!
//! Contains types for products and categories.

mod category;
mod product;

pub use category::{normalize_categories, CategoryEntry, CategorySlug, SIDEBAR_CATEGORY_LIMIT};
pub use product::{Product, ProductPage, MAX_RATING};
