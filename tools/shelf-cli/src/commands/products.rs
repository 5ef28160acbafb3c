//! Catalog browsing: search, filters and "load more".

use anyhow::{Context as _, Result};
use serde::Serialize;
use shelf_auth::SessionContext;
use shelf_commerce::catalog::{CategorySlug, Product};
use shelf_commerce::money::Money;
use shelf_commerce::search::{CatalogFeed, CatalogQuery, FilterSpec, PRICE_CEILING, PRICE_FLOOR};
use shelf_data::{load_more, load_storefront, StoreApi};

use super::ProductsArgs;
use crate::context::Context;
use crate::output::{format_price, format_rating, truncate};

/// What the catalog view shows.
#[derive(Debug, Serialize)]
pub struct CatalogView {
    /// Every product loaded so far.
    pub feed: CatalogFeed,
    /// Sidebar categories.
    pub categories: Vec<CategorySlug>,
    /// Active filters.
    pub filter: FilterSpec,
}

impl CatalogView {
    /// Loaded products that pass the filters.
    pub fn visible(&self) -> Vec<&Product> {
        self.feed.visible(&self.filter)
    }
}

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let api = ctx.api();
    let mut session = ctx.sign_in(&api, &args.credentials).await?;
    let view = load_view(&api, &session, &args, ctx).await;
    session.end();

    render(&view?, ctx);
    Ok(())
}

/// Translate the filter flags into a filter spec.
pub fn filter_spec(args: &ProductsArgs) -> FilterSpec {
    let min = args.min_price.map(Money::from_decimal).unwrap_or(PRICE_FLOOR);
    let max = args.max_price.map(Money::from_decimal).unwrap_or(PRICE_CEILING);
    FilterSpec::new()
        .with_price_range(min, max)
        .with_categories(args.categories.iter().map(String::as_str))
        .with_min_rating(args.min_rating.unwrap_or(0.0))
}

/// Load the requested pages and the category sidebar.
pub async fn load_view<A>(
    api: &A,
    session: &SessionContext,
    args: &ProductsArgs,
    ctx: &Context,
) -> Result<CatalogView>
where
    A: StoreApi + ?Sized,
{
    session.guard()?;

    let page_size = args.limit.unwrap_or(ctx.config.catalog.page_size);
    let query = CatalogQuery::from_search_text(args.search.as_deref().unwrap_or(""), page_size);

    let spinner = ctx.output.spinner("Loading products...");
    let loaded = load_storefront(api, &query).await;
    spinner.finish_and_clear();
    let loaded = loaded.context("Failed to load products")?;

    let mut feed = CatalogFeed::new();
    feed.absorb(query, loaded.page);

    for _ in 1..args.pages.max(1) {
        let spinner = ctx.output.spinner("Loading more products...");
        let more = load_more(api, &mut feed).await;
        spinner.finish_and_clear();
        if !more.context("Failed to load more products")? {
            break;
        }
    }

    let categories = loaded
        .categories
        .into_iter()
        .take(ctx.config.catalog.category_limit)
        .collect();

    Ok(CatalogView {
        feed,
        categories,
        filter: filter_spec(args),
    })
}

fn render(view: &CatalogView, ctx: &Context) {
    let visible = view.visible();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "products": visible,
            "loaded": view.feed.products().len(),
            "total": view.feed.total(),
            "has_more": view.feed.has_more(),
            "categories": view.categories,
            "filter": view.filter,
        }));
        return;
    }

    let title = match view.feed.query() {
        CatalogQuery::Search { q } => format!("Search results for \"{}\"", q),
        CatalogQuery::Browse { .. } => "Products".to_string(),
    };
    ctx.output.header(&title);

    if !view.categories.is_empty() {
        let labels: Vec<String> = view.categories.iter().map(CategorySlug::label).collect();
        ctx.output.kv("Categories", &labels.join(", "));
    }
    if !view.filter.is_unrestricted() {
        ctx.output.kv("Filters", &describe_filter(&view.filter));
    }

    if visible.is_empty() {
        ctx.output.info("No products match the current filters.");
    } else {
        let widths = [5, 36, 24, 16, 12];
        ctx.output.table_row(&["ID", "Product", "Price", "Rating", "Category"], &widths);
        for product in &visible {
            let original = product.has_discount().then(|| product.original_price());
            let id = product.id.to_string();
            let title = truncate(&product.title, 36);
            let price = format_price(product.price, original);
            let rating = format_rating(product.rating);
            ctx.output.table_row(
                &[
                    id.as_str(),
                    title.as_str(),
                    price.as_str(),
                    rating.as_str(),
                    product.category.as_str(),
                ],
                &widths,
            );
        }
    }

    let loaded = view.feed.products().len();
    ctx.output.info(&format!(
        "Showing {} of {} loaded ({} total)",
        visible.len(),
        loaded,
        view.feed.total()
    ));
    if view.feed.has_more() {
        let pagination = view.feed.pagination();
        ctx.output.info(&format!(
            "Page {} of {}; pass --pages {} to load more",
            pagination.page,
            pagination.total_pages,
            pagination.page + 1
        ));
    }
}

fn describe_filter(spec: &FilterSpec) -> String {
    let mut parts = Vec::new();
    if spec.restricts_price() {
        parts.push(format!("{} - {}", spec.min_price, spec.max_price));
    }
    if spec.restricts_category() {
        let names: Vec<&str> = spec.categories.iter().map(CategorySlug::as_str).collect();
        parts.push(names.join(" | "));
    }
    if spec.restricts_rating() {
        parts.push(format!("{} stars & up", spec.min_rating));
    }
    parts.join(", ")
}
