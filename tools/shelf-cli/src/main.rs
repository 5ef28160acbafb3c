//! Shelf CLI - a login-gated storefront for the DummyJSON shop.
//!
//! Commands:
//! - `shelf login` - Log in and show the account
//! - `shelf products` - Browse, search and filter the catalog
//! - `shelf categories` - List product categories
//! - `shelf cart` - Show the cart, with local quantity edits
//! - `shelf config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;
#[cfg(test)]
mod testing;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CartArgs, CategoriesArgs, ConfigArgs, LoginArgs, ProductsArgs};

/// Shelf - browse the catalog and your cart from the terminal
#[derive(Parser)]
#[command(name = "shelf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and show the account
    Login(LoginArgs),

    /// Browse, search and filter products
    Products(ProductsArgs),

    /// List product categories
    Categories(CategoriesArgs),

    /// Show the cart and try out quantity changes locally
    Cart(CartArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Log to stderr; `RUST_LOG` wins, else `warn`, or `debug` with `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Login(args) => commands::login::run(args, &ctx).await,
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Categories(args) => commands::categories::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
