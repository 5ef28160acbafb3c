//! Product types as served by the remote catalog.

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Highest rating a product can carry.
pub const MAX_RATING: f64 = 5.0;

/// A product in the catalog.
///
/// Immutable once fetched; the catalog view owns its copy for the session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Remote product identifier.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Current (already discounted) unit price.
    pub price: Money,
    /// Category slug.
    pub category: String,
    /// Average rating, 0 to 5.
    pub rating: f64,
    /// Units in stock.
    pub stock: u32,
    /// Discount applied to the list price, 0 to 100.
    #[serde(default)]
    pub discount_percentage: f64,
    /// Thumbnail image URI.
    #[serde(default)]
    pub thumbnail: String,
    /// Brand, when the catalog knows one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Long description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Product {
    /// Create a product with the fields the filter looks at.
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        price: Money,
        category: impl Into<String>,
        rating: f64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            category: category.into(),
            rating,
            stock: 0,
            discount_percentage: 0.0,
            thumbnail: String::new(),
            brand: None,
            description: None,
        }
    }

    /// Set units in stock.
    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    /// Set the discount percentage.
    pub fn with_discount(mut self, percent: f64) -> Self {
        self.discount_percentage = percent;
        self
    }

    /// Whether a discount badge should be shown.
    pub fn has_discount(&self) -> bool {
        self.discount_percentage > 0.0
    }

    /// Price before the discount was applied.
    ///
    /// `price / (1 - discount / 100)`; a discount of 100% or more has no
    /// meaningful list price and yields `price` unchanged.
    pub fn original_price(&self) -> Money {
        if !self.has_discount() || self.discount_percentage >= 100.0 {
            return self.price;
        }
        Money::from_decimal(self.price.to_decimal() / (1.0 - self.discount_percentage / 100.0))
    }

    /// Whether any units are left.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Check the numeric fields against their documented ranges.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.price.is_negative() {
            return Err(CommerceError::InvalidPrice(self.price.display()));
        }
        if !(0.0..=MAX_RATING).contains(&self.rating) {
            return Err(CommerceError::InvalidRating(self.rating));
        }
        if !(0.0..=100.0).contains(&self.discount_percentage) {
            return Err(CommerceError::InvalidDiscount(self.discount_percentage));
        }
        Ok(())
    }
}

/// One page of the product listing (`{products, total, skip, limit}`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductPage {
    /// Products on this page.
    pub products: Vec<Product>,
    /// Total number of products matching the request.
    #[serde(default)]
    pub total: u64,
    /// Offset of the first product.
    #[serde(default)]
    pub skip: u64,
    /// Requested page size.
    #[serde(default)]
    pub limit: u64,
}

impl ProductPage {
    /// Validate every product on the page.
    pub fn validate(&self) -> Result<(), CommerceError> {
        self.products.iter().try_for_each(Product::validate)
    }
}
