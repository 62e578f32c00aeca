//! Conversion between views and URLs.
//!
//! Both directions are pure. Malformed input never fails: anything that does
//! not match a known route resolves to [`View::Home`].

use crate::view::{CheckoutOutcome, ContentPage, View};
use dental_commerce::catalog::{slugify, CategoryTree};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::sync::OnceLock;

/// Characters escaped by `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn standard_tree() -> &'static CategoryTree {
    static TREE: OnceLock<CategoryTree> = OnceLock::new();
    TREE.get_or_init(CategoryTree::standard)
}

/// Percent-encode a single path segment or query value.
pub fn encode_segment(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Percent-decode a path segment. Invalid UTF-8 yields `None`.
pub fn decode_segment(segment: &str) -> Option<String> {
    percent_decode_str(segment)
        .decode_utf8()
        .ok()
        .map(|s| s.into_owned())
}

/// Title-case a slug word by word: `dental-chairs` becomes `Dental Chairs`.
pub fn slug_to_title(slug: &str) -> String {
    slug.split('-')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a URL into path and query, dropping any fragment.
pub fn split_url(url: &str) -> (&str, &str) {
    let url = url.split('#').next().unwrap_or_default();
    match url.split_once('?') {
        Some((path, query)) => (path, query),
        None => (url, ""),
    }
}

/// Build the URL for a view.
pub fn view_to_url(view: &View) -> String {
    match view {
        View::Home => "/".to_string(),
        View::AllProducts => "/products".to_string(),
        View::ProductList {
            category_name,
            parent_category: Some(parent),
        } => format!(
            "/category/{}/{}",
            encode_segment(&slugify(parent)),
            encode_segment(&slugify(category_name))
        ),
        View::ProductList {
            category_name,
            parent_category: None,
        } => format!("/category/{}", encode_segment(&slugify(category_name))),
        View::ProductDetail { item_number } => {
            format!("/product/{}", encode_segment(item_number))
        }
        View::Search { query } if query.is_empty() => "/search".to_string(),
        View::Search { query } => format!("/search?q={}", encode_segment(query)),
        View::Cart { checkout: None } => "/cart".to_string(),
        View::Cart {
            checkout: Some(outcome),
        } => format!("/cart?{}=true", outcome.query_key()),
        View::EverydayEssentials => "/everyday-essentials".to_string(),
        View::Promotions => "/promotions".to_string(),
        View::Brands { brand: None } => "/brands".to_string(),
        View::Brands { brand: Some(brand) } => format!("/brands/{}", encode_segment(brand)),
        View::Blog => "/blog".to_string(),
        View::BlogPost { post_id } => format!("/blog/{}", encode_segment(post_id)),
        View::Faq { category: None } => "/faq".to_string(),
        View::Faq {
            category: Some(category),
        } => format!("/faq/{}", encode_segment(category)),
        View::BuyingGuides => "/buying-guides".to_string(),
        View::BuyingGuide { guide } => format!("/buying-guides/{}", encode_segment(guide)),
        View::Contact => "/contact".to_string(),
        View::Account => "/account".to_string(),
        View::Page { page } => format!("/{}", page.slug()),
    }
}

/// Derive the view for a location, resolving category slugs against the
/// built-in category tree.
pub fn url_to_view(pathname: &str, query: &str) -> View {
    url_to_view_in(standard_tree(), pathname, query)
}

/// Derive the view for a location using a specific category tree.
pub fn url_to_view_in(tree: &CategoryTree, pathname: &str, query: &str) -> View {
    let trimmed = pathname.trim_start_matches('/').trim_end_matches('/');
    if trimmed.is_empty() {
        return View::Home;
    }

    let mut segments = Vec::new();
    for raw in trimmed.split('/') {
        match decode_segment(raw) {
            Some(s) if !s.is_empty() => segments.push(s),
            _ => {
                tracing::debug!(path = pathname, "Unroutable path, showing home");
                return View::Home;
            }
        }
    }

    let params = QueryParams::parse(query);
    let parts: Vec<&str> = segments.iter().map(String::as_str).collect();

    match parts.as_slice() {
        ["category", parent, category] => match tree.resolve_pair(parent, category) {
            Some((parent, category)) => View::product_list(category, Some(parent)),
            None => View::ProductList {
                category_name: category_name(tree, category),
                parent_category: Some(category_name(tree, parent)),
            },
        },
        ["category", category] => View::ProductList {
            category_name: category_name(tree, category),
            parent_category: None,
        },
        ["products"] => View::AllProducts,
        ["product", item_number] => View::product(*item_number),
        ["search"] => View::search(params.get("q").unwrap_or_default()),
        ["cart"] => View::Cart {
            checkout: if params.is_true(CheckoutOutcome::Succeeded.query_key()) {
                Some(CheckoutOutcome::Succeeded)
            } else if params.is_true(CheckoutOutcome::Canceled.query_key()) {
                Some(CheckoutOutcome::Canceled)
            } else {
                None
            },
        },
        ["everyday-essentials"] => View::EverydayEssentials,
        ["promotions"] => View::Promotions,
        ["brands"] => View::Brands { brand: None },
        ["brands", brand] => View::Brands {
            brand: Some(brand.to_string()),
        },
        ["blog"] => View::Blog,
        ["blog", post_id] => View::blog_post(*post_id),
        ["faq"] => View::Faq { category: None },
        ["faq", category] => View::Faq {
            category: Some(category.to_string()),
        },
        ["buying-guides"] => View::BuyingGuides,
        ["buying-guides", guide] => View::BuyingGuide {
            guide: guide.to_string(),
        },
        ["contact"] => View::Contact,
        ["account"] => View::Account,
        [slug] => match ContentPage::from_slug(slug) {
            Some(page) => View::page(page),
            None => View::Home,
        },
        _ => View::Home,
    }
}

fn category_name(tree: &CategoryTree, slug: &str) -> String {
    tree.name_for_slug(slug)
        .map(str::to_string)
        .unwrap_or_else(|| slug_to_title(slug))
}

/// Decoded `key=value` pairs from a query string.
struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    fn parse(query: &str) -> Self {
        let pairs = query
            .trim_start_matches('?')
            .split('&')
            .filter(|p| !p.is_empty())
            .filter_map(|pair| {
                let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
                Some((decode_query(k)?, decode_query(v)?))
            })
            .collect();
        Self(pairs)
    }

    fn get(&self, key: &str) -> Option<String> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    }

    fn is_true(&self, key: &str) -> bool {
        self.get(key).as_deref() == Some("true")
    }
}

fn decode_query(value: &str) -> Option<String> {
    decode_segment(&value.replace('+', " "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_views() -> Vec<View> {
        let mut views = vec![
            View::Home,
            View::AllProducts,
            View::product_list("Dental Chairs", Some("Equipment")),
            View::product_list("Infection Control & Sterilization", Some("Supplies")),
            View::product_list("Imaging", None),
            View::product("DC-1200/B"),
            View::search(""),
            View::search("nitrile gloves & masks"),
            View::cart(),
            View::Cart {
                checkout: Some(CheckoutOutcome::Succeeded),
            },
            View::Cart {
                checkout: Some(CheckoutOutcome::Canceled),
            },
            View::EverydayEssentials,
            View::Promotions,
            View::Brands { brand: None },
            View::Brands {
                brand: Some("Hu-Friedy".into()),
            },
            View::Blog,
            View::blog_post("choosing-a-dental-chair"),
            View::Faq { category: None },
            View::Faq {
                category: Some("shipping".into()),
            },
            View::BuyingGuides,
            View::BuyingGuide {
                guide: "intraoral-sensors".into(),
            },
            View::Contact,
            View::Account,
        ];
        views.extend(ContentPage::ALL.iter().map(|p| View::page(*p)));
        views
    }

    fn route(url: &str) -> View {
        let (path, query) = split_url(url);
        url_to_view(path, query)
    }

    #[test]
    fn test_round_trip_all_views() {
        for view in all_views() {
            let url = view_to_url(&view);
            assert_eq!(route(&url), view, "round trip through {}", url);
        }
    }

    #[test]
    fn test_home_fallbacks() {
        assert_eq!(url_to_view("/", ""), View::Home);
        assert_eq!(url_to_view("", ""), View::Home);
        assert_eq!(url_to_view("/nonexistent", ""), View::Home);
        assert_eq!(url_to_view("/product", ""), View::Home);
        assert_eq!(url_to_view("/product/a/b", ""), View::Home);
        assert_eq!(url_to_view("/category/a/b/c", ""), View::Home);
        assert_eq!(url_to_view("/blog//x", ""), View::Home);
        assert_eq!(url_to_view("/product/%FF", ""), View::Home);
    }

    #[test]
    fn test_nested_category() {
        assert_eq!(
            url_to_view("/category/equipment/dental-chairs", ""),
            View::ProductList {
                category_name: "Dental Chairs".into(),
                parent_category: Some("Equipment".into()),
            }
        );
    }

    #[test]
    fn test_category_slug_resolution() {
        assert_eq!(
            url_to_view("/category/supplies/infection-control-and-sterilization", ""),
            View::product_list("Infection Control & Sterilization", Some("Supplies"))
        );
        // unknown slugs are title-cased
        assert_eq!(
            url_to_view("/category/orthodontic-brackets", ""),
            View::product_list("Orthodontic Brackets", None)
        );
    }

    #[test]
    fn test_trailing_slash_ignored() {
        assert_eq!(url_to_view("/products/", ""), View::AllProducts);
        assert_eq!(url_to_view("/blog/post-1/", ""), View::blog_post("post-1"));
    }

    #[test]
    fn test_segments_are_encoded() {
        assert_eq!(view_to_url(&View::product("A B/C")), "/product/A%20B%2FC");
        assert_eq!(
            view_to_url(&View::search("gloves & masks")),
            "/search?q=gloves%20%26%20masks"
        );
        assert_eq!(route("/search?q=latex+free"), View::search("latex free"));
    }

    #[test]
    fn test_cart_outcomes() {
        assert_eq!(view_to_url(&View::cart()), "/cart");
        assert_eq!(
            route("/cart?success=true"),
            View::Cart {
                checkout: Some(CheckoutOutcome::Succeeded)
            }
        );
        assert_eq!(route("/cart?success=false"), View::cart());
    }

    #[test]
    fn test_custom_tree() {
        use dental_commerce::catalog::Category;
        let tree = CategoryTree::from_categories(&[
            Category::new("c1", "Orthodontics", None),
            Category::new("c2", "Aligners & Retainers", Some("Orthodontics")),
        ]);
        assert_eq!(
            url_to_view_in(&tree, "/category/orthodontics/aligners-and-retainers", ""),
            View::product_list("Aligners & Retainers", Some("Orthodontics"))
        );
    }

    #[test]
    fn test_slug_to_title() {
        assert_eq!(slug_to_title("dental-chairs"), "Dental Chairs");
        assert_eq!(slug_to_title("x--ray-"), "X Ray");
    }
}
