//! Catalog filter.
//!
//! Narrows an in-memory product list by price range, category set and
//! minimum rating. Filtering is pure: the source list is only borrowed and
//! the survivors come back in their original order.

use crate::catalog::{CategorySlug, Product, MAX_RATING};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Lower end of the unrestricted price range.
pub const PRICE_FLOOR: Money = Money::from_dollars(0);

/// Upper end of the unrestricted price range.
pub const PRICE_CEILING: Money = Money::from_dollars(5000);

/// The active filter criteria.
///
/// Replaced as a whole value on every change; the builder methods consume
/// `self` and hand back the next spec.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterSpec {
    /// Inclusive lower price bound.
    pub min_price: Money,
    /// Inclusive upper price bound.
    pub max_price: Money,
    /// Accepted categories; empty accepts all.
    pub categories: Vec<CategorySlug>,
    /// Minimum rating; 0 accepts all.
    pub min_rating: f64,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            min_price: PRICE_FLOOR,
            max_price: PRICE_CEILING,
            categories: Vec::new(),
            min_rating: 0.0,
        }
    }
}

impl FilterSpec {
    /// The unrestricted spec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the price range. Reversed bounds are swapped.
    pub fn with_price_range(mut self, min: Money, max: Money) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// Add the category if absent, remove it if present.
    pub fn toggle_category(mut self, category: impl Into<CategorySlug>) -> Self {
        let category = category.into();
        if let Some(pos) = self.categories.iter().position(|c| *c == category) {
            self.categories.remove(pos);
        } else {
            self.categories.push(category);
        }
        self
    }

    /// Replace the category set.
    pub fn with_categories<I, C>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<CategorySlug>,
    {
        self.categories.clear();
        for c in categories {
            let c = c.into();
            if !self.categories.contains(&c) {
                self.categories.push(c);
            }
        }
        self
    }

    /// Set the minimum rating, clamped to 0..=5.
    pub fn with_min_rating(mut self, rating: f64) -> Self {
        self.min_rating = if rating.is_nan() {
            0.0
        } else {
            rating.clamp(0.0, MAX_RATING)
        };
        self
    }

    /// Whether the price clause takes part in filtering.
    ///
    /// Only a range that differs from `PRICE_FLOOR..=PRICE_CEILING` counts;
    /// the full range means "unset", even for products priced above it.
    pub fn restricts_price(&self) -> bool {
        self.min_price > PRICE_FLOOR || self.max_price < PRICE_CEILING
    }

    /// Whether the category clause takes part in filtering.
    pub fn restricts_category(&self) -> bool {
        !self.categories.is_empty()
    }

    /// Whether the rating clause takes part in filtering.
    pub fn restricts_rating(&self) -> bool {
        self.min_rating > 0.0
    }

    /// True when no clause is active.
    pub fn is_unrestricted(&self) -> bool {
        !self.restricts_price() && !self.restricts_category() && !self.restricts_rating()
    }

    /// Inclusion predicate for a single product.
    pub fn matches(&self, product: &Product) -> bool {
        if self.restricts_price()
            && (product.price < self.min_price || product.price > self.max_price)
        {
            return false;
        }
        if self.restricts_category()
            && !self.categories.iter().any(|c| c.as_str() == product.category)
        {
            return false;
        }
        if self.restricts_rating() && product.rating < self.min_rating {
            return false;
        }
        true
    }

    /// Borrowing form of [`filter_products`].
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

/// Derive the filtered view of `products` under `spec`.
pub fn filter_products(products: &[Product], spec: &FilterSpec) -> Vec<Product> {
    products.iter().filter(|p| spec.matches(p)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;

    fn product(id: u64, dollars: i64, category: &str, rating: f64) -> Product {
        Product::new(ProductId::new(id), format!("p{}", id), Money::from_dollars(dollars), category, rating)
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, 10, "beauty", 4.5),
            product(2, 20, "groceries", 3.0),
            product(3, 1500, "laptops", 4.8),
            product(4, 7000, "vehicle", 2.1),
            product(5, 60, "beauty", 1.5),
        ]
    }

    fn ids(products: &[Product]) -> Vec<u64> {
        products.iter().map(|p| p.id.get()).collect()
    }

    #[test]
    fn test_default_spec_is_identity() {
        let products = catalog();
        assert!(FilterSpec::default().is_unrestricted());
        assert_eq!(filter_products(&products, &FilterSpec::default()), products);
    }

    #[test]
    fn test_full_range_keeps_products_above_ceiling() {
        let spec = FilterSpec::new().with_min_rating(2.0);
        assert_eq!(ids(&filter_products(&catalog(), &spec)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_price_range() {
        let spec = FilterSpec::new().with_price_range(Money::from_dollars(15), Money::from_dollars(1500));
        assert_eq!(ids(&filter_products(&catalog(), &spec)), vec![2, 3, 5]);
    }

    #[test]
    fn test_reversed_price_range_is_swapped() {
        let spec = FilterSpec::new().with_price_range(Money::from_dollars(100), Money::from_dollars(0));
        assert_eq!(spec.min_price, Money::zero());
        assert_eq!(ids(&filter_products(&catalog(), &spec)), vec![1, 2, 5]);
    }

    #[test]
    fn test_category_toggle() {
        let spec = FilterSpec::new().toggle_category("beauty").toggle_category("laptops");
        assert_eq!(ids(&filter_products(&catalog(), &spec)), vec![1, 3, 5]);

        let spec = spec.toggle_category("beauty");
        assert_eq!(spec.categories, vec![CategorySlug::from("laptops")]);
        assert_eq!(ids(&filter_products(&catalog(), &spec)), vec![3]);
    }

    #[test]
    fn test_all_clauses_combine() {
        let spec = FilterSpec::new()
            .with_categories(["beauty", "groceries"])
            .with_price_range(Money::zero(), Money::from_dollars(50))
            .with_min_rating(3.0);
        assert_eq!(ids(&filter_products(&catalog(), &spec)), vec![1, 2]);
    }

    #[test]
    fn test_rating_clamped() {
        assert_eq!(FilterSpec::new().with_min_rating(9.0).min_rating, 5.0);
        assert_eq!(FilterSpec::new().with_min_rating(-1.0).min_rating, 0.0);
        assert_eq!(FilterSpec::new().with_min_rating(f64::NAN).min_rating, 0.0);
    }

    #[test]
    fn test_empty_input() {
        let spec = FilterSpec::new().toggle_category("beauty");
        assert!(filter_products(&[], &spec).is_empty());
    }

    #[test]
    fn test_apply_borrows() {
        let products = catalog();
        let spec = FilterSpec::new().with_min_rating(4.0);
        let view = spec.apply(&products);
        assert_eq!(view.len(), 2);
        assert_eq!(products.len(), 5);
    }
}
