//! Cart and line item types.

use crate::ids::{CartId, ProductId, UserId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A user's cart as served by the remote API.
///
/// `total`, `discounted_total`, `total_products` and `total_quantity` are
/// the remote aggregates. Local edits through [`Cart::update_quantity`] and
/// [`Cart::remove_item`] leave them untouched; see
/// [`Cart::with_recomputed_totals`] and `CartSummary` for the recomputed
/// figures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Remote cart identifier.
    pub id: CartId,
    /// Line items, in display order.
    #[serde(rename = "products")]
    pub items: Vec<LineItem>,
    /// Sum of line totals before discounts.
    pub total: Money,
    /// Sum of line totals after discounts.
    pub discounted_total: Money,
    /// Owner.
    pub user_id: UserId,
    /// Number of distinct products.
    #[serde(default)]
    pub total_products: u64,
    /// Sum of quantities.
    #[serde(default)]
    pub total_quantity: u64,
}

impl Cart {
    /// An empty cart for a user.
    pub fn empty(id: CartId, user_id: UserId) -> Self {
        Self {
            id,
            items: Vec::new(),
            total: Money::zero(),
            discounted_total: Money::zero(),
            user_id,
            total_products: 0,
            total_quantity: 0,
        }
    }

    /// Set a line item's quantity to `max(1, quantity)` and refresh its line
    /// totals.
    ///
    /// Returns false, leaving the cart untouched, when the product is not in
    /// the cart.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> bool {
        match self.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(item) => {
                item.quantity = clamp_quantity(quantity);
                item.update_total();
                true
            }
            None => false,
        }
    }

    /// Drop a line item, keeping the others in order.
    pub fn remove_item(&mut self, product_id: ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        self.items.len() < len_before
    }

    /// Get an item by product ID.
    pub fn get_item(&self, product_id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| i.product_id == product_id)
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities over the current line items.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Copy of this cart whose aggregates are rebuilt from the line items.
    pub fn with_recomputed_totals(mut self) -> Self {
        self.total = sum_lines(self.items.iter().map(|i| &i.total));
        self.discounted_total = sum_lines(self.items.iter().map(|i| &i.discounted_total));
        self.total_products = self.items.len() as u64;
        self.total_quantity = self.item_count();
        self
    }
}

/// One product entry within a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", from = "LineItemRecord")]
pub struct LineItem {
    /// Product in this line. Unique within a cart.
    #[serde(rename = "id")]
    pub product_id: ProductId,
    /// Product title (denormalized for display).
    pub title: String,
    /// Unit price.
    pub price: Money,
    /// Quantity, at least 1.
    pub quantity: u32,
    /// Line total, `quantity * price`, ignoring the discount.
    pub total: Money,
    /// Discount percentage for this product.
    #[serde(default)]
    pub discount_percentage: f64,
    /// Line total after the discount.
    pub discounted_total: Money,
    /// Thumbnail image URI.
    #[serde(default)]
    pub thumbnail: String,
}

impl LineItem {
    /// Create a line item with its totals computed.
    pub fn new(
        product_id: ProductId,
        title: impl Into<String>,
        price: Money,
        quantity: i64,
        discount_percentage: f64,
    ) -> Self {
        let mut item = Self {
            product_id,
            title: title.into(),
            price,
            quantity: clamp_quantity(quantity),
            total: Money::zero(),
            discount_percentage,
            discounted_total: Money::zero(),
            thumbnail: String::new(),
        };
        item.update_total();
        item
    }

    /// Recompute `total` and `discounted_total` from price and quantity.
    pub fn update_total(&mut self) {
        self.total = self.price.saturating_multiply(i64::from(self.quantity));
        self.discounted_total = self.total - self.total.percentage(self.discount_percentage);
    }

    /// Whether the line carries a discount badge.
    pub fn has_discount(&self) -> bool {
        self.discount_percentage > 0.0
    }
}

/// Wire shape of a cart line.
///
/// Older payloads name the discounted line total `discountedPrice`, and
/// some carry both keys. `discountedTotal` wins when present; with neither,
/// the value is derived from `total` and the discount.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LineItemRecord {
    id: ProductId,
    title: String,
    price: Money,
    quantity: u32,
    total: Money,
    #[serde(default)]
    discount_percentage: f64,
    #[serde(default)]
    discounted_total: Option<Money>,
    #[serde(default)]
    discounted_price: Option<Money>,
    #[serde(default)]
    thumbnail: String,
}

impl From<LineItemRecord> for LineItem {
    fn from(record: LineItemRecord) -> Self {
        let discounted_total = record
            .discounted_total
            .or(record.discounted_price)
            .unwrap_or_else(|| record.total - record.total.percentage(record.discount_percentage));
        Self {
            product_id: record.id,
            title: record.title,
            price: record.price,
            quantity: record.quantity,
            total: record.total,
            discount_percentage: record.discount_percentage,
            discounted_total,
            thumbnail: record.thumbnail,
        }
    }
}

/// Sum line amounts, saturating at the largest representable amount.
fn sum_lines<'a>(amounts: impl Iterator<Item = &'a Money>) -> Money {
    Money::try_sum(amounts).unwrap_or(Money::new(i64::MAX))
}

/// Clamp a requested quantity into `1..=u32::MAX`.
fn clamp_quantity(quantity: i64) -> u32 {
    quantity.clamp(1, i64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    const CART_JSON: &str = r#"{
        "id": 19,
        "products": [
            {"id": 144, "title": "Cricket Helmet", "price": 44.99, "quantity": 4, "total": 179.96,
             "discountPercentage": 11.47, "discountedTotal": 159.32, "thumbnail": "https://cdn.dummyjson.com/a.png"},
            {"id": 124, "title": "iPhone X", "price": 899.99, "quantity": 4, "total": 3599.96,
             "discountPercentage": 8.03, "discountedTotal": 3310.88, "thumbnail": "https://cdn.dummyjson.com/b.png"}
        ],
        "total": 3779.92,
        "discountedTotal": 3470.2,
        "userId": 1,
        "totalProducts": 2,
        "totalQuantity": 8
    }"#;

    fn cart() -> Cart {
        serde_json::from_str(CART_JSON).unwrap()
    }

    #[test]
    fn test_cart_from_json() {
        let cart = cart();
        assert_eq!(cart.id, CartId::new(19));
        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.items[0].product_id, ProductId::new(144));
        assert_eq!(cart.items[1].discounted_total, Money::new(331088));
        assert_eq!(cart.total_quantity, 8);
    }

    #[test]
    fn test_line_item_with_both_discount_keys() {
        let json = r#"{"id": 5, "title": "Mug", "price": 9, "quantity": 2, "total": 18,
            "discountPercentage": 0, "discountedTotal": 18, "discountedPrice": 17.5}"#;
        let item: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.discounted_total, Money::from_dollars(18));
    }

    #[test]
    fn test_line_item_with_legacy_discount_key() {
        let json = r#"{"id": 5, "title": "Mug", "price": 9, "quantity": 2, "total": 18,
            "discountPercentage": 10, "discountedPrice": 16.2}"#;
        let item: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.discounted_total, Money::new(1620));
    }

    #[test]
    fn test_line_item_without_discount_keys() {
        let json = r#"{"id": 5, "title": "Mug", "price": 10, "quantity": 2, "total": 20,
            "discountPercentage": 10}"#;
        let item: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.discounted_total, Money::new(1800));
        assert_eq!(item.thumbnail, "");
    }

    #[test]
    fn test_cart_with_both_discount_keys_decodes() {
        let json = CART_JSON.replace(
            r#""discountedTotal": 159.32,"#,
            r#""discountedTotal": 159.32, "discountedPrice": 159.32,"#,
        );
        let cart: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(cart.items[0].discounted_total, Money::new(15932));
    }

    #[test]
    fn test_line_item_json_uses_current_keys() {
        let item = LineItem::new(ProductId::new(5), "Mug", Money::new(1000), 3, 10.0);
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["id"], 5);
        assert_eq!(value["discountedTotal"], 27.0);
        assert!(value.get("discountedPrice").is_none());
    }

    #[test]
    fn test_update_quantity_refreshes_line_total() {
        let mut cart = cart();
        assert!(cart.update_quantity(ProductId::new(144), 2));
        let item = cart.get_item(ProductId::new(144)).unwrap();
        assert_eq!(item.quantity, 2);
        assert_eq!(item.total, Money::new(8998));
    }

    #[test]
    fn test_update_quantity_keeps_remote_aggregates() {
        let mut cart = cart();
        cart.update_quantity(ProductId::new(124), 1);
        assert_eq!(cart.total, Money::new(377992));
        assert_eq!(cart.total_quantity, 8);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_update_quantity_clamps() {
        let mut cart = cart();
        cart.update_quantity(ProductId::new(144), 0);
        assert_eq!(cart.items[0].quantity, 1);
        cart.update_quantity(ProductId::new(144), -20);
        assert_eq!(cart.items[0].quantity, 1);
    }

    #[test]
    fn test_update_missing_item() {
        let mut cart = cart();
        let before = cart.clone();
        assert!(!cart.update_quantity(ProductId::new(1), 3));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = cart();
        assert!(cart.remove_item(ProductId::new(144)));
        assert_eq!(cart.items.len(), 1);
        assert!(!cart.remove_item(ProductId::new(144)));
    }

    #[test]
    fn test_recomputed_totals() {
        let mut cart = cart();
        cart.remove_item(ProductId::new(124));
        let cart = cart.with_recomputed_totals();
        assert_eq!(cart.total, Money::new(17996));
        assert_eq!(cart.discounted_total, Money::new(15932));
        assert_eq!(cart.total_products, 1);
        assert_eq!(cart.total_quantity, 4);
    }

    #[test]
    fn test_line_item_new() {
        let item = LineItem::new(ProductId::new(5), "Mug", Money::new(1000), 3, 10.0);
        assert_eq!(item.total, Money::new(3000));
        assert_eq!(item.discounted_total, Money::new(2700));
        assert!(item.has_discount());
    }
}
