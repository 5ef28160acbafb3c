//! Category listing.

use anyhow::{Context as _, Result};
use shelf_auth::SessionContext;
use shelf_commerce::catalog::CategorySlug;
use shelf_data::StoreApi;

use super::CategoriesArgs;
use crate::context::Context;

/// Run the categories command.
pub async fn run(args: CategoriesArgs, ctx: &Context) -> Result<()> {
    let api = ctx.api();
    let mut session = ctx.sign_in(&api, &args.credentials).await?;
    let categories = load(&api, &session, args.all, ctx).await;
    session.end();
    let categories = categories?;

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    ctx.output.header("Categories");
    if categories.is_empty() {
        ctx.output.info("No categories available.");
    }
    for category in &categories {
        ctx.output.list_item(&format!("{} ({})", category.label(), category));
    }
    Ok(())
}

async fn load<A>(api: &A, session: &SessionContext, all: bool, ctx: &Context) -> Result<Vec<CategorySlug>>
where
    A: StoreApi + ?Sized,
{
    session.guard()?;

    let spinner = ctx.output.spinner("Loading categories...");
    let categories = api.categories().await;
    spinner.finish_and_clear();
    let categories = categories.context("Failed to load categories")?;

    let limit = if all {
        usize::MAX
    } else {
        ctx.config.catalog.category_limit
    };
    Ok(categories.into_iter().take(limit).collect())
}
