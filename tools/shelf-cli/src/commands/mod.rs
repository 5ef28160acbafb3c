//! CLI command implementations.

pub mod cart;
pub mod categories;
pub mod config;
pub mod login;
pub mod products;

use clap::{Args, Subcommand};
use shelf_commerce::cart::CartEdit;
use shelf_commerce::ids::ProductId;

/// Login flags shared by every command that needs a session.
#[derive(Args, Debug, Clone, Default)]
pub struct CredentialArgs {
    /// Username (falls back to $SHELF_USERNAME, then the config file).
    #[arg(short, long)]
    pub username: Option<String>,

    /// Password (falls back to $SHELF_PASSWORD, then the config file).
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Arguments for the login command.
#[derive(Args, Debug)]
pub struct LoginArgs {
    #[command(flatten)]
    pub credentials: CredentialArgs,
}

/// Arguments for the products command.
#[derive(Args, Debug, Default)]
pub struct ProductsArgs {
    #[command(flatten)]
    pub credentials: CredentialArgs,

    /// Full-text search instead of browsing.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only show these categories (repeatable).
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Lowest price, in dollars.
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Highest price, in dollars.
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Minimum rating, 0 to 5.
    #[arg(short = 'r', long)]
    pub min_rating: Option<f64>,

    /// Number of pages to load ("load more" N-1 times).
    #[arg(short = 'n', long, default_value = "1")]
    pub pages: u32,

    /// Products per page (default: catalog.page_size).
    #[arg(long)]
    pub limit: Option<u64>,
}

/// Arguments for the categories command.
#[derive(Args, Debug)]
pub struct CategoriesArgs {
    #[command(flatten)]
    pub credentials: CredentialArgs,

    /// Show every category instead of the sidebar selection.
    #[arg(long)]
    pub all: bool,
}

/// Arguments for the cart command.
///
/// Edits apply to a local copy only, in the order: `--set`, `--inc`,
/// `--dec`, `--remove`.
#[derive(Args, Debug, Default)]
pub struct CartArgs {
    #[command(flatten)]
    pub credentials: CredentialArgs,

    /// Set a quantity, as PRODUCT_ID=QTY (repeatable). Quantities below 1 become 1.
    #[arg(long = "set", value_name = "ID=QTY", value_parser = parse_quantity)]
    pub set: Vec<(ProductId, i64)>,

    /// Add one to a product's quantity (repeatable).
    #[arg(long = "inc", value_name = "ID")]
    pub increment: Vec<ProductId>,

    /// Take one from a product's quantity, never below 1 (repeatable).
    #[arg(long = "dec", value_name = "ID")]
    pub decrement: Vec<ProductId>,

    /// Remove a product from the cart (repeatable).
    #[arg(long, value_name = "ID")]
    pub remove: Vec<ProductId>,

    /// Recompute the order summary from the edited line items.
    #[arg(long)]
    pub recompute_totals: bool,
}

impl CartArgs {
    /// The requested edits in application order.
    pub fn edits(&self) -> Vec<CartEdit> {
        let sets = self.set.iter().map(|&(product_id, quantity)| CartEdit::SetQuantity {
            product_id,
            quantity,
        });
        let incs = self
            .increment
            .iter()
            .map(|&product_id| CartEdit::Increment { product_id });
        let decs = self
            .decrement
            .iter()
            .map(|&product_id| CartEdit::Decrement { product_id });
        let removes = self
            .remove
            .iter()
            .map(|&product_id| CartEdit::Remove { product_id });
        sets.chain(incs).chain(decs).chain(removes).collect()
    }
}

/// Parse `ID=QTY`.
fn parse_quantity(s: &str) -> Result<(ProductId, i64), String> {
    let (id, qty) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ID=QTY, got '{}'", s))?;
    let id: ProductId = id
        .trim()
        .parse()
        .map_err(|_| format!("invalid product id '{}'", id.trim()))?;
    let qty: i64 = qty
        .trim()
        .parse()
        .map_err(|_| format!("invalid quantity '{}'", qty.trim()))?;
    Ok((id, qty))
}

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Write a default shelf.toml.
    Init {
        /// Where to write (default: ./shelf.toml).
        #[arg(long)]
        path: Option<String>,

        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
