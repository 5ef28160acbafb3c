//! Shopping cart module.
//!
//! Contains the cart types, the value-returning cart editor, the local
//! overlay and the order summary.

mod cart;
pub mod editor;
mod overlay;
mod pricing;

pub use cart::{Cart, LineItem};
pub use editor::{remove_item, set_quantity, CartEdit};
pub use overlay::CartOverlay;
pub use pricing::{CartSummary, TotalsPolicy};
