//! Route resolution: URL to view and back.

use anyhow::{Context as _, Result};
use dental_commerce::catalog::CategoryTree;
use dental_data::load_category_tree;
use dental_router::{split_url, url_to_view_in, view_to_url, View};
use serde::Serialize;

use super::RouteArgs;
use crate::context::Context;

#[derive(Debug, Serialize, PartialEq)]
struct Resolved {
    url: String,
    canonical_url: String,
    title: String,
    view: View,
}

/// Run the route command.
pub async fn run(args: RouteArgs, ctx: &Context) -> Result<()> {
    let resolved = match (&args.view, &args.url) {
        (Some(json), _) => from_view_json(json)?,
        (None, Some(url)) => {
            let tree = if args.live {
                let catalog = ctx.catalog()?;
                let spinner = ctx.output.spinner("Loading categories...");
                let tree = load_category_tree(catalog.as_ref(), &ctx.retry_policy()).await;
                spinner.finish_and_clear();
                tree.context("Failed to load categories")?
            } else {
                CategoryTree::standard()
            };
            resolve(&tree, url)
        }
        (None, None) => anyhow::bail!("Pass a URL or --view"),
    };

    if ctx.output.is_json() {
        ctx.output.json(&resolved);
        return Ok(());
    }

    ctx.output.header(&resolved.title);
    ctx.output.kv("kind", resolved.view.kind());
    ctx.output.kv("url", &resolved.canonical_url);
    if resolved.canonical_url != resolved.url {
        ctx.output.warn(&format!(
            "'{}' is not canonical; the storefront rewrites it to '{}'",
            resolved.url, resolved.canonical_url
        ));
    }
    ctx.output.kv("view", &serde_json::to_string(&resolved.view)?);
    Ok(())
}

fn resolve(tree: &CategoryTree, url: &str) -> Resolved {
    let url = strip_origin(url);
    let (path, query) = split_url(url);
    let view = url_to_view_in(tree, path, query);
    let canonical_url = view_to_url(&view);
    tracing::debug!(%url, kind = view.kind(), "Resolved route");
    Resolved {
        url: url.to_string(),
        canonical_url,
        title: view.title(),
        view,
    }
}

fn from_view_json(json: &str) -> Result<Resolved> {
    let view: View = serde_json::from_str(json)
        .with_context(|| format!("Invalid view JSON: {}", json))?;
    let url = view_to_url(&view);
    Ok(Resolved {
        canonical_url: url.clone(),
        url,
        title: view.title(),
        view,
    })
}

/// Drop `scheme://host` so full links can be pasted.
fn strip_origin(url: &str) -> &str {
    match url.split_once("://") {
        Some((_, rest)) => rest.find('/').map(|i| &rest[i..]).unwrap_or("/"),
        None => url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dental_router::CheckoutOutcome;

    #[test]
    fn test_resolve_full_link() {
        let resolved = resolve(
            &CategoryTree::standard(),
            "https://shop.example/category/equipment/dental-chairs",
        );
        assert_eq!(
            resolved.view,
            View::product_list("Dental Chairs", Some("Equipment"))
        );
        assert_eq!(resolved.canonical_url, "/category/equipment/dental-chairs");
    }

    #[test]
    fn test_resolve_unknown_is_home() {
        let resolved = resolve(&CategoryTree::standard(), "/nonexistent");
        assert_eq!(resolved.view, View::Home);
        assert_eq!(resolved.canonical_url, "/");
    }

    #[test]
    fn test_resolve_checkout_return() {
        let resolved = resolve(&CategoryTree::standard(), "/cart?canceled=true");
        assert_eq!(
            resolved.view,
            View::Cart {
                checkout: Some(CheckoutOutcome::Canceled)
            }
        );
    }

    #[test]
    fn test_view_json() {
        let json = serde_json::to_string(&View::product("GL-100")).unwrap();
        let resolved = from_view_json(&json).unwrap();
        assert_eq!(resolved.url, view_to_url(&View::product("GL-100")));
        assert!(from_view_json("{\"view\": \"nowhere\"}").is_err());
    }

    #[test]
    fn test_strip_origin() {
        assert_eq!(strip_origin("https://shop.example/blog"), "/blog");
        assert_eq!(strip_origin("https://shop.example"), "/");
        assert_eq!(strip_origin("/cart"), "/cart");
    }
}
