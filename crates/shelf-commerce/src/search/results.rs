//! Accumulated catalog listing and pagination.

use crate::catalog::{Product, ProductPage};
use crate::search::{CatalogQuery, FilterSpec};
use serde::{Deserialize, Serialize};

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: u64,
    /// Items per page.
    pub per_page: u64,
    /// Total number of items.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u64,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info.
    pub fn new(page: u64, per_page: u64, total: u64) -> Self {
        let page = page.max(1);
        let per_page = per_page.max(1);
        let total_pages = if total == 0 {
            1
        } else {
            total.div_ceil(per_page)
        };

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Pagination for a `limit`/`skip` window.
    pub fn from_window(skip: u64, limit: u64, total: u64) -> Self {
        let limit = limit.max(1);
        Self::new(skip / limit + 1, limit, total)
    }

    /// Offset of the first item on this page.
    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.per_page
    }

    /// Get start item number (1-indexed).
    pub fn start_item(&self) -> u64 {
        if self.total == 0 {
            0
        } else {
            self.offset() + 1
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> u64 {
        (self.page * self.per_page).min(self.total)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, crate::search::DEFAULT_PAGE_SIZE, 0)
    }
}

/// The product list behind the catalog view.
///
/// Browse pages after the first are appended ("load more"); a search or a
/// first page replaces whatever was loaded.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogFeed {
    products: Vec<Product>,
    query: CatalogQuery,
    total: u64,
}

impl CatalogFeed {
    /// An empty feed positioned at the first browse page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a fetched page into the feed.
    pub fn absorb(&mut self, query: CatalogQuery, page: ProductPage) {
        if query.replaces_results() {
            self.products = page.products;
        } else {
            self.products.extend(page.products);
        }
        self.total = match &query {
            CatalogQuery::Search { .. } => page.total.max(self.products.len() as u64),
            CatalogQuery::Browse { .. } => page.total,
        };
        self.query = query;
    }

    /// Everything loaded so far, in arrival order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The query that produced the most recent page.
    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    /// Total reported by the remote listing.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Whether another browse page exists.
    pub fn has_more(&self) -> bool {
        match &self.query {
            CatalogQuery::Browse { limit, skip } => skip + limit < self.total,
            CatalogQuery::Search { .. } => false,
        }
    }

    /// The query for the next "load more", if any.
    pub fn next_query(&self) -> Option<CatalogQuery> {
        if self.has_more() {
            self.query.next_page()
        } else {
            None
        }
    }

    /// Filtered view of the loaded products.
    pub fn visible(&self, spec: &FilterSpec) -> Vec<&Product> {
        spec.apply(&self.products)
    }

    /// Window covered by the loaded products.
    pub fn pagination(&self) -> Pagination {
        match &self.query {
            CatalogQuery::Browse { limit, skip } => Pagination::from_window(*skip, *limit, self.total),
            CatalogQuery::Search { .. } => {
                Pagination::new(1, self.products.len() as u64, self.products.len() as u64)
            }
        }
    }
}
