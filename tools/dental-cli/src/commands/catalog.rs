//! Catalog browsing commands.

use anyhow::{bail, Context as _, Result};
use dental_commerce::catalog::{slugify, CategoryTree, Product};
use dental_commerce::search::{BrandIndex, Filter, ProductQuery, SearchResults, SortOption};
use dental_data::{load_category_tree, ProductCatalog};
use dental_router::{view_to_url, View};

use super::{CatalogArgs, CatalogCommand};
use crate::context::Context;
use crate::output::{price_label, stock_badge};

const WIDTHS: [usize; 4] = [12, 44, 22, 28];

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let catalog = catalog.as_ref();

    match &args.command {
        CatalogCommand::List => {
            let products = fetch(ctx, "Loading products...", catalog.get_all_products()).await?;
            print_listing(ctx, "All Products", &listing_query(&args, ctx, ProductQuery::new()), &products)
        }
        CatalogCommand::Categories => list_categories(ctx, catalog).await,
        CatalogCommand::Category { name } => show_category(&args, ctx, catalog, name).await,
        CatalogCommand::Search { query } => {
            let products = fetch(ctx, "Searching...", catalog.search_products(query)).await?;
            let title = View::search(query.as_str()).title();
            // already matched by the catalog; the query only sorts and pages
            print_listing(ctx, &title, &listing_query(&args, ctx, ProductQuery::new()), &products)
        }
        CatalogCommand::Show { item_number } => show_product(ctx, catalog, item_number).await,
        CatalogCommand::Essentials => {
            let products = fetch(ctx, "Loading products...", catalog.get_all_products()).await?;
            let query = listing_query(&args, ctx, ProductQuery::everyday_essentials());
            print_listing(ctx, &View::EverydayEssentials.title(), &query, &products)
        }
        CatalogCommand::Promotions => {
            let products = fetch(ctx, "Loading products...", catalog.get_all_products()).await?;
            let query = listing_query(&args, ctx, ProductQuery::promotions());
            print_listing(ctx, &View::Promotions.title(), &query, &products)
        }
        CatalogCommand::Brands => list_brands(&args, ctx, catalog).await,
    }
}

async fn fetch<F>(ctx: &Context, msg: &str, fut: F) -> Result<Vec<Product>>
where
    F: std::future::Future<Output = Result<Vec<Product>, dental_data::FetchError>>,
{
    let spinner = ctx.output.spinner(msg);
    let result = fut.await;
    spinner.finish_and_clear();
    let products = result.context("Failed to load products")?;
    ctx.output.debug(&format!("Loaded {} products", products.len()));
    Ok(products)
}

/// Apply the shared sort, paging and brand flags to a base query. The base
/// sort is kept unless `--sort` names a different one.
fn listing_query(args: &CatalogArgs, ctx: &Context, base: ProductQuery) -> ProductQuery {
    let per_page = args.per_page.unwrap_or(ctx.config.catalog.per_page);
    let sort = SortOption::from_param(&args.sort);
    let mut query = base.with_pagination(args.page, per_page);
    if sort != SortOption::Featured {
        query = query.with_sort(sort);
    }
    if let Some(brand) = &args.brand {
        query = query.with_filter(Filter::manufacturer(brand.as_str()));
    }
    query
}

fn print_listing(
    ctx: &Context,
    title: &str,
    query: &ProductQuery,
    products: &[Product],
) -> Result<()> {
    let results = query.apply(products);

    if ctx.output.is_json() {
        ctx.output.json(&results);
        return Ok(());
    }

    ctx.output.header(title);
    print_results(ctx, &results, query.sort);
    Ok(())
}

fn print_results(ctx: &Context, results: &SearchResults<Product>, sort: SortOption) {
    if results.is_empty() {
        ctx.output.info("No products found.");
        return;
    }

    ctx.output
        .table_row(&["ITEM", "NAME", "BRAND", "CATEGORY"], &WIDTHS);
    for product in &results.items {
        ctx.output.table_row(
            &[
                product.item_number.as_str(),
                &product.name,
                &product.manufacturer,
                &product.category,
            ],
            &WIDTHS,
        );
        ctx.output.kv("price", &price_label(product));
    }

    ctx.output.info("");
    let pagination = &results.pagination;
    ctx.output.info(&format!(
        "{} (page {} of {}, sorted by {})",
        pagination.summary(),
        pagination.page,
        pagination.total_pages.max(1),
        sort.display_name()
    ));
}

async fn list_categories(ctx: &Context, catalog: &dyn ProductCatalog) -> Result<()> {
    let spinner = ctx.output.spinner("Loading categories...");
    let tree = load_category_tree(catalog, &ctx.retry_policy()).await;
    spinner.finish_and_clear();
    let tree = tree.context("Failed to load categories")?;

    if ctx.output.is_json() {
        ctx.output.json(&tree);
        return Ok(());
    }

    ctx.output.header("Categories");
    for root in &tree.roots {
        ctx.output.info(&format!(
            "{}  {}",
            root.name,
            view_to_url(&View::product_list(root.name.as_str(), None))
        ));
        for child in &root.children {
            ctx.output.list_item(&format!(
                "{}  {}",
                child.name,
                view_to_url(&View::product_list(
                    child.name.as_str(),
                    Some(root.name.as_str())
                ))
            ));
        }
    }
    Ok(())
}

/// Resolve a name or slug to its display name and department.
fn resolve_category<'a>(tree: &'a CategoryTree, input: &'a str) -> (&'a str, Option<&'a str>) {
    let slug = slugify(input);
    let name = tree.name_for_slug(&slug).unwrap_or(input);
    (name, tree.parent_of(name))
}

async fn show_category(
    args: &CatalogArgs,
    ctx: &Context,
    catalog: &dyn ProductCatalog,
    input: &str,
) -> Result<()> {
    let tree = load_category_tree(catalog, &ctx.retry_policy())
        .await
        .unwrap_or_else(|e| {
            ctx.output
                .warn(&format!("Using built-in categories ({})", e));
            CategoryTree::standard()
        });
    let (name, parent) = resolve_category(&tree, input);
    ctx.output.debug(&format!(
        "Category '{}' -> {}",
        input,
        view_to_url(&View::product_list(name, parent))
    ));

    let products = fetch(
        ctx,
        "Loading products...",
        catalog.get_products_by_category(name),
    )
    .await?;
    let title = match parent {
        Some(parent) => format!("{} / {}", parent, name),
        None => name.to_string(),
    };
    print_listing(ctx, &title, &listing_query(args, ctx, ProductQuery::new()), &products)
}

async fn show_product(ctx: &Context, catalog: &dyn ProductCatalog, item_number: &str) -> Result<()> {
    let spinner = ctx.output.spinner("Loading product...");
    let product = catalog.get_product(item_number).await;
    spinner.finish_and_clear();

    let Some(product) = product.context("Failed to load product")? else {
        bail!("Product '{}' not found", item_number);
    };

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("item", product.item_number.as_str());
    ctx.output.kv("brand", &product.manufacturer);
    let category = match &product.parent_category {
        Some(parent) => format!("{} / {}", parent, product.category),
        None => product.category.clone(),
    };
    ctx.output.kv("category", &category);
    ctx.output.kv("price", &price_label(&product));
    ctx.output.kv("stock", &stock_badge(product.in_stock));
    ctx.output
        .kv("url", &view_to_url(&View::product(product.item_number.as_str())));
    if let Some(image) = product.primary_image() {
        ctx.output.kv("image", image);
    }
    if let Some(description) = &product.description {
        ctx.output.info("");
        ctx.output.info(description);
    }
    Ok(())
}

async fn list_brands(args: &CatalogArgs, ctx: &Context, catalog: &dyn ProductCatalog) -> Result<()> {
    let products = fetch(ctx, "Loading products...", catalog.get_all_products()).await?;

    if let Some(brand) = &args.brand {
        let matched: Vec<Product> = BrandIndex::products_for(&products, brand)
            .into_iter()
            .cloned()
            .collect();
        let query = listing_query(args, ctx, ProductQuery::new());
        return print_listing(
            ctx,
            &View::Brands {
                brand: Some(brand.clone()),
            }
            .title(),
            &query,
            &matched,
        );
    }

    let index = BrandIndex::build(&products);
    if ctx.output.is_json() {
        ctx.output.json(&index);
        return Ok(());
    }

    ctx.output.header(&View::Brands { brand: None }.title());
    for group in &index.groups {
        ctx.output.info(&group.letter.to_string());
        for (name, count) in &group.brands {
            ctx.output.list_item(&format!("{} ({})", name, count));
        }
    }
    ctx.output.info("");
    ctx.output
        .info(&format!("{} brands", index.brand_count()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_category_by_slug_or_name() {
        let tree = CategoryTree::standard();
        assert_eq!(
            resolve_category(&tree, "dental-chairs"),
            ("Dental Chairs", Some("Equipment"))
        );
        assert_eq!(
            resolve_category(&tree, "Compressors & Vacuums"),
            ("Compressors & Vacuums", Some("Equipment"))
        );
        assert_eq!(resolve_category(&tree, "Imaging"), ("Imaging", None));
        assert_eq!(resolve_category(&tree, "Widgets"), ("Widgets", None));
    }
}
