//! Category listing, normalized at the API boundary.
//!
//! `GET /products/categories` has answered both with objects
//! (`{"slug", "name", "url"}`) and with bare strings. Everything past this
//! module only sees [`CategorySlug`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of categories the filter sidebar offers.
pub const SIDEBAR_CATEGORY_LIMIT: usize = 10;

/// A category identifier, as matched against `Product::category`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySlug(String);

impl CategorySlug {
    /// Create a slug from a string.
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// Get the slug as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable label ("mens-shirts" -> "Mens Shirts").
    pub fn label(&self) -> String {
        self.0
            .split('-')
            .filter(|w| !w.is_empty())
            .map(|w| {
                let mut chars = w.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for CategorySlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CategorySlug {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CategorySlug {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for CategorySlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One entry of the raw category listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CategoryEntry {
    /// Object form.
    Detailed {
        #[serde(default)]
        slug: Option<String>,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        url: Option<String>,
    },
    /// Bare string form.
    Plain(String),
}

impl CategoryEntry {
    /// Reduce to a slug: the slug, else the name, else the string itself.
    pub fn into_slug(self) -> Option<CategorySlug> {
        let raw = match self {
            CategoryEntry::Detailed { slug, name, .. } => slug
                .filter(|s| !s.is_empty())
                .or_else(|| name.filter(|s| !s.is_empty()))?,
            CategoryEntry::Plain(s) => s,
        };
        if raw.trim().is_empty() {
            None
        } else {
            Some(CategorySlug(raw))
        }
    }
}

/// Normalize a raw listing, dropping empty entries and duplicates while
/// keeping the remote order.
pub fn normalize_categories(entries: Vec<CategoryEntry>) -> Vec<CategorySlug> {
    let mut out: Vec<CategorySlug> = Vec::with_capacity(entries.len());
    for slug in entries.into_iter().filter_map(CategoryEntry::into_slug) {
        if !out.contains(&slug) {
            out.push(slug);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_entries() {
        let json = r#"[
            {"slug": "beauty", "name": "Beauty", "url": "https://dummyjson.com/products/category/beauty"},
            {"name": "Fragrances"}
        ]"#;
        let entries: Vec<CategoryEntry> = serde_json::from_str(json).unwrap();
        let slugs = normalize_categories(entries);
        assert_eq!(slugs, vec![CategorySlug::from("beauty"), CategorySlug::from("Fragrances")]);
    }

    #[test]
    fn test_plain_entries() {
        let entries: Vec<CategoryEntry> =
            serde_json::from_str(r#"["smartphones", "laptops", "smartphones", ""]"#).unwrap();
        let slugs = normalize_categories(entries);
        assert_eq!(slugs.len(), 2);
        assert_eq!(slugs[1].as_str(), "laptops");
    }

    #[test]
    fn test_mixed_entries() {
        let entries: Vec<CategoryEntry> =
            serde_json::from_str(r#"[{"slug": "groceries"}, "tops", {"url": "x"}]"#).unwrap();
        let slugs = normalize_categories(entries);
        assert_eq!(slugs, vec![CategorySlug::from("groceries"), CategorySlug::from("tops")]);
    }

    #[test]
    fn test_label() {
        assert_eq!(CategorySlug::from("mens-shirts").label(), "Mens Shirts");
        assert_eq!(CategorySlug::from("beauty").label(), "Beauty");
    }
}
