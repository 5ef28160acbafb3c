//! Catalog queries: paged browsing or full-text search.

use serde::{Deserialize, Serialize};

/// Products per page when browsing.
pub const DEFAULT_PAGE_SIZE: u64 = 12;

/// What the catalog view asks the remote listing for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CatalogQuery {
    /// A page of the full listing (`?limit=&skip=`).
    Browse {
        /// Page size.
        limit: u64,
        /// Offset of the first product.
        skip: u64,
    },
    /// Full-text search (`/search?q=`); returns a single result set.
    Search {
        /// Search terms.
        q: String,
    },
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self::first_page(DEFAULT_PAGE_SIZE)
    }
}

impl CatalogQuery {
    /// The first browse page.
    pub fn first_page(limit: u64) -> Self {
        CatalogQuery::Browse {
            limit: limit.max(1),
            skip: 0,
        }
    }

    /// Build a query from the search box: blank text means browse.
    pub fn from_search_text(text: &str, limit: u64) -> Self {
        let q = text.trim();
        if q.is_empty() {
            Self::first_page(limit)
        } else {
            CatalogQuery::Search { q: q.to_string() }
        }
    }

    /// Whether this is a text search.
    pub fn is_search(&self) -> bool {
        matches!(self, CatalogQuery::Search { .. })
    }

    /// Whether the response should replace the loaded products rather than
    /// extend them.
    pub fn replaces_results(&self) -> bool {
        match self {
            CatalogQuery::Search { .. } => true,
            CatalogQuery::Browse { skip, .. } => *skip == 0,
        }
    }

    /// The following browse page; searches have none.
    pub fn next_page(&self) -> Option<CatalogQuery> {
        match self {
            CatalogQuery::Browse { limit, skip } => Some(CatalogQuery::Browse {
                limit: *limit,
                skip: skip + limit,
            }),
            CatalogQuery::Search { .. } => None,
        }
    }

    /// Query-string parameters for the listing endpoint.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            CatalogQuery::Browse { limit, skip } => {
                vec![("limit", limit.to_string()), ("skip", skip.to_string())]
            }
            CatalogQuery::Search { q } => vec![("q", q.clone())],
        }
    }
}
