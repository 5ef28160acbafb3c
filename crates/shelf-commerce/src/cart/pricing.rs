//! Cart summary.

use crate::cart::Cart;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Where the summary takes its aggregate figures from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TotalsPolicy {
    /// The remote aggregates, which go stale after local edits.
    #[default]
    Remote,
    /// Rebuilt from the current line items.
    Recompute,
}

/// The order summary shown next to the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartSummary {
    /// Distinct products.
    pub total_products: u64,
    /// Sum of quantities.
    pub total_quantity: u64,
    /// Total before discounts.
    pub subtotal: Money,
    /// Discount amount (`subtotal - grand_total`).
    pub discount: Money,
    /// Amount due.
    pub grand_total: Money,
    /// Source of the figures.
    pub policy: TotalsPolicy,
}

impl CartSummary {
    /// Summarize a cart under the given policy.
    pub fn new(cart: &Cart, policy: TotalsPolicy) -> Self {
        let recomputed;
        let source = match policy {
            TotalsPolicy::Remote => cart,
            TotalsPolicy::Recompute => {
                recomputed = cart.clone().with_recomputed_totals();
                &recomputed
            }
        };

        Self {
            total_products: source.total_products,
            total_quantity: source.total_quantity,
            subtotal: source.total,
            discount: source.total - source.discounted_total,
            grand_total: source.discounted_total,
            policy,
        }
    }

    /// Whether the remote figures no longer describe `current`.
    ///
    /// The aggregates were reported for the lines of `fetched`, so they go
    /// stale exactly when the lines change. Rounding differences between the
    /// reported aggregates and summed line cents do not count.
    pub fn is_stale(fetched: &Cart, current: &Cart) -> bool {
        fetched.items != current.items
    }
}
