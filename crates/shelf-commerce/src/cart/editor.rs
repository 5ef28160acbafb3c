//! Cart editor.
//!
//! Value-returning edits over a [`Cart`]. Each call takes the current cart
//! and hands back the next one; an edit naming a product that is not in the
//! cart returns an identical copy. Remote aggregates are carried over as-is.

use crate::cart::Cart;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Set a line's quantity to `max(1, quantity)`.
pub fn set_quantity(cart: &Cart, product_id: ProductId, quantity: i64) -> Cart {
    let mut next = cart.clone();
    next.update_quantity(product_id, quantity);
    next
}

/// Drop a line.
pub fn remove_item(cart: &Cart, product_id: ProductId) -> Cart {
    let mut next = cart.clone();
    next.remove_item(product_id);
    next
}

/// Raise a line's quantity by one (the "+" control).
pub fn increment(cart: &Cart, product_id: ProductId) -> Cart {
    match cart.get_item(product_id) {
        Some(item) => set_quantity(cart, product_id, i64::from(item.quantity) + 1),
        None => cart.clone(),
    }
}

/// Lower a line's quantity by one, never below 1 (the "-" control).
pub fn decrement(cart: &Cart, product_id: ProductId) -> Cart {
    match cart.get_item(product_id) {
        Some(item) => set_quantity(cart, product_id, i64::from(item.quantity) - 1),
        None => cart.clone(),
    }
}

/// A single local edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CartEdit {
    /// Set an explicit quantity.
    SetQuantity { product_id: ProductId, quantity: i64 },
    /// Add one.
    Increment { product_id: ProductId },
    /// Take one away.
    Decrement { product_id: ProductId },
    /// Remove the line.
    Remove { product_id: ProductId },
}

impl CartEdit {
    /// Product the edit targets.
    pub fn product_id(&self) -> ProductId {
        match *self {
            CartEdit::SetQuantity { product_id, .. }
            | CartEdit::Increment { product_id }
            | CartEdit::Decrement { product_id }
            | CartEdit::Remove { product_id } => product_id,
        }
    }

    /// Apply the edit, producing the next cart.
    pub fn apply(&self, cart: &Cart) -> Cart {
        match *self {
            CartEdit::SetQuantity {
                product_id,
                quantity,
            } => set_quantity(cart, product_id, quantity),
            CartEdit::Increment { product_id } => increment(cart, product_id),
            CartEdit::Decrement { product_id } => decrement(cart, product_id),
            CartEdit::Remove { product_id } => remove_item(cart, product_id),
        }
    }
}
