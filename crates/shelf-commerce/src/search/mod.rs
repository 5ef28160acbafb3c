//! Search module.
//!
//! Contains the catalog filter, catalog queries and the accumulated feed.

mod filter;
mod query;
mod results;

pub use filter::{filter_products, FilterSpec, PRICE_CEILING, PRICE_FLOOR};
pub use query::{CatalogQuery, DEFAULT_PAGE_SIZE};
pub use results::{CatalogFeed, Pagination};
