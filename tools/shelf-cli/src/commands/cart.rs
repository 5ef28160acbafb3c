//! Cart view with local edits and the order summary.

use anyhow::{Context as _, Result};
use serde::Serialize;
use shelf_auth::SessionContext;
use shelf_commerce::cart::{Cart, CartEdit, CartOverlay, CartSummary, TotalsPolicy};
use shelf_data::{load_cart, StoreApi};

use super::CartArgs;
use crate::context::Context;
use crate::output::truncate;

/// Outcome of one local edit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    /// The edit went through.
    Applied(CartEdit),
    /// The targeted product is not in the cart.
    Missing(CartEdit),
}

impl Notice {
    fn message(&self) -> String {
        match self {
            Notice::Applied(CartEdit::Remove { .. }) => "Product removed from cart".to_string(),
            Notice::Applied(_) => "Quantity updated".to_string(),
            Notice::Missing(edit) => format!("Product {} is not in the cart", edit.product_id()),
        }
    }
}

/// What the cart view shows.
#[derive(Debug, Serialize)]
pub struct CartView {
    /// The cart with local edits applied.
    pub cart: Cart,
    /// Order summary.
    pub summary: CartSummary,
    /// One entry per requested edit.
    pub notices: Vec<Notice>,
    /// Whether the summary shows remote totals that no longer match the
    /// line items.
    pub stale_totals: bool,
}

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let api = ctx.api();
    let mut session = ctx.sign_in(&api, &args.credentials).await?;
    let view = load_view(&api, &session, &args, ctx).await;
    session.end();

    render(&view?, ctx);
    Ok(())
}

/// Fetch the cart and layer the requested edits over it.
pub async fn load_view<A>(
    api: &A,
    session: &SessionContext,
    args: &CartArgs,
    ctx: &Context,
) -> Result<CartView>
where
    A: StoreApi + ?Sized,
{
    let spinner = ctx.output.spinner("Loading cart...");
    let cart = load_cart(api, session).await;
    spinner.finish_and_clear();
    let cart = cart.context("Failed to load cart")?;

    let mut overlay = CartOverlay::new(cart);
    let notices = args
        .edits()
        .into_iter()
        .map(|edit| {
            if overlay.current().get_item(edit.product_id()).is_some() {
                overlay.apply(edit);
                Notice::Applied(edit)
            } else {
                Notice::Missing(edit)
            }
        })
        .collect();

    let policy = if args.recompute_totals {
        TotalsPolicy::Recompute
    } else {
        ctx.config.cart.totals_policy()
    };
    let summary = CartSummary::new(overlay.current(), policy);
    let stale_totals = policy == TotalsPolicy::Remote
        && CartSummary::is_stale(overlay.snapshot(), overlay.current());

    Ok(CartView {
        cart: overlay.current().clone(),
        summary,
        notices,
        stale_totals,
    })
}

fn render(view: &CartView, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(view);
        return;
    }

    for notice in &view.notices {
        match notice {
            Notice::Applied(_) => ctx.output.success(&notice.message()),
            Notice::Missing(_) => ctx.output.warn(&notice.message()),
        }
    }

    ctx.output.header("Shopping Cart");
    if view.cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        return;
    }

    let widths = [5, 32, 10, 5, 10];
    ctx.output.table_row(&["ID", "Product", "Price", "Qty", "Total"], &widths);
    for item in &view.cart.items {
        let id = item.product_id.to_string();
        let title = truncate(&item.title, 32);
        let price = item.price.display();
        let quantity = item.quantity.to_string();
        let total = item.total.display();
        ctx.output.table_row(
            &[
                id.as_str(),
                title.as_str(),
                price.as_str(),
                quantity.as_str(),
                total.as_str(),
            ],
            &widths,
        );
    }

    let summary = &view.summary;
    ctx.output.header("Order Summary");
    ctx.output.kv("Products", &summary.total_products.to_string());
    ctx.output.kv("Items", &summary.total_quantity.to_string());
    ctx.output.kv("Subtotal", &summary.subtotal.display());
    ctx.output.kv("Discount", &format!("-{}", summary.discount.display()));
    ctx.output.kv("Total", &summary.grand_total.display());

    if view.stale_totals {
        ctx.output.warn("Totals are as reported before your edits; pass --recompute-totals to update them.");
    }
    ctx.output.info("Checkout is not available from the command line.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{context, demo_login, FakeStore};
    use shelf_commerce::ids::ProductId;
    use shelf_commerce::money::Money;

    fn args() -> CartArgs {
        CartArgs {
            credentials: demo_login(),
            ..CartArgs::default()
        }
    }

    async fn view_for(store: &FakeStore, args: &CartArgs) -> CartView {
        let ctx = context();
        let session = ctx.sign_in(store, &args.credentials).await.unwrap();
        load_view(store, &session, args, &ctx).await.unwrap()
    }

    #[tokio::test]
    async fn test_unedited_cart() {
        let view = view_for(&FakeStore::new(), &args()).await;
        assert_eq!(view.cart.items.len(), 2);
        assert!(view.notices.is_empty());
        assert!(!view.stale_totals);
        assert_eq!(view.summary.subtotal, Money::new(1300));
    }

    #[tokio::test]
    async fn test_edits_keep_remote_totals_by_default() {
        let edited = CartArgs {
            set: vec![(ProductId::new(5), 0)],
            remove: vec![ProductId::new(6)],
            ..args()
        };
        let view = view_for(&FakeStore::new(), &edited).await;

        assert_eq!(view.cart.items.len(), 1);
        assert_eq!(view.cart.items[0].quantity, 1);
        assert_eq!(view.summary.policy, TotalsPolicy::Remote);
        assert_eq!(view.summary.subtotal, Money::new(1300));
        assert!(view.stale_totals);
        assert_eq!(view.notices[0].message(), "Quantity updated");
        assert_eq!(view.notices[1].message(), "Product removed from cart");
    }

    #[tokio::test]
    async fn test_recompute_totals_flag() {
        let edited = CartArgs {
            increment: vec![ProductId::new(5)],
            recompute_totals: true,
            ..args()
        };
        let view = view_for(&FakeStore::new(), &edited).await;

        assert_eq!(view.cart.get_item(ProductId::new(5)).map(|i| i.quantity), Some(3));
        assert_eq!(view.summary.policy, TotalsPolicy::Recompute);
        assert_eq!(view.summary.subtotal, Money::new(1800));
        assert_eq!(view.summary.total_quantity, 4);
        assert!(!view.stale_totals);
    }

    #[tokio::test]
    async fn test_edit_on_missing_product() {
        let edited = CartArgs {
            remove: vec![ProductId::new(99)],
            ..args()
        };
        let view = view_for(&FakeStore::new(), &edited).await;
        assert_eq!(view.cart.items.len(), 2);
        assert_eq!(view.notices[0].message(), "Product 99 is not in the cart");
        assert!(!view.stale_totals);
    }

    #[tokio::test]
    async fn test_user_without_cart() {
        let mut store = FakeStore::new();
        store.cart = None;
        let view = view_for(&store, &args()).await;
        assert!(view.cart.is_empty());
        assert_eq!(view.summary.grand_total, Money::zero());
    }
}
