//! Page components, one per view kind, and the pieces they share.

mod cart;
mod catalog;
mod content;

pub use cart::{AccountPage, CartPage};
pub use catalog::{BrandsPage, HomePage, Listing, ListingPage, ProductPage};
pub use content::{
    BlogPage, BlogPostPage, BuyingGuidePage, BuyingGuidesPage, ContactPage, FaqPage, InfoPage,
};

use dental_commerce::catalog::Product;
use dental_router::{view_to_url, View};
use leptos::prelude::*;
use leptos::server_fn::error::ServerFnError;

/// The message to show for a failed server call.
pub fn error_message(error: &ServerFnError) -> String {
    match error {
        ServerFnError::ServerError(message) => message.clone(),
        other => other.to_string(),
    }
}

/// Sale price, struck regular price and discount, as display strings.
pub(crate) struct PriceLabel {
    pub current: String,
    pub regular: Option<String>,
    pub percent_off: Option<u32>,
}

impl PriceLabel {
    pub fn for_product(product: &Product) -> Self {
        let on_sale = product.is_on_sale();
        Self {
            current: product.effective_price().display(),
            regular: on_sale.then(|| product.price.display()),
            percent_off: if on_sale { product.percent_off() } else { None },
        }
    }
}

#[component]
fn Price(product: Product) -> impl IntoView {
    let label = PriceLabel::for_product(&product);

    view! {
        <p class="price">
            <span class=if label.regular.is_some() { "sale" } else { "" }>{label.current}</span>
            {label.regular.map(|regular| view! { <s class="regular">{regular}</s> })}
            {label.percent_off.map(|pct| view! { <span class="badge">{format!("-{}%", pct)}</span> })}
        </p>
    }
}

#[component]
fn ProductCard(product: Product) -> impl IntoView {
    let href = view_to_url(&View::product(product.item_number.as_str()));
    let image = product.primary_image().map(str::to_string);
    let in_stock = product.in_stock;

    view! {
        <div class="product-card">
            {match image {
                Some(src) => view! { <img src=src alt=product.name.clone() loading="lazy"/> }.into_any(),
                None => view! { <div class="image-placeholder"></div> }.into_any(),
            }}
            <div class="product-info">
                <p class="manufacturer">{product.manufacturer.clone()}</p>
                <h3>{product.name.clone()}</h3>
                <p class="item-number">"Item #" {product.item_number.to_string()}</p>
                <Price product=product/>
                <StockBadge in_stock=in_stock/>
                <a href=href class="btn" style="margin-top: 0.5rem; display: block; text-align: center;">
                    "View Details"
                </a>
            </div>
        </div>
    }
}

#[component]
fn StockBadge(in_stock: bool) -> impl IntoView {
    if in_stock {
        view! { <span class="stock in-stock">"In stock"</span> }.into_any()
    } else {
        view! { <span class="stock out-of-stock">"Backordered"</span> }.into_any()
    }
}

#[component]
fn ErrorMessage(#[prop(into)] context: String, error: ServerFnError) -> impl IntoView {
    view! {
        <p class="error">{context} ": " {error_message(&error)}</p>
    }
}

/// 404 page
#[component]
pub fn NotFound(#[prop(optional, into)] message: Option<String>) -> impl IntoView {
    #[cfg(feature = "ssr")]
    {
        if let Some(resp) = use_context::<leptos_wasi::response::ResponseOptions>() {
            resp.set_status(leptos_wasi::prelude::StatusCode::NOT_FOUND);
        }
    }

    view! {
        <div style="text-align: center; padding: 4rem;">
            <h1>"404"</h1>
            <p>{message.unwrap_or_else(|| "Page not found".to_string())}</p>
            <a href="/">"Back to Home"</a>
        </div>
    }
}

// ============================================================================
// Skeleton Components (Loading States)
// ============================================================================

#[component]
fn ProductGridSkeleton() -> impl IntoView {
    view! {
        <div class="products">
            <ProductCardSkeleton/>
            <ProductCardSkeleton/>
            <ProductCardSkeleton/>
            <ProductCardSkeleton/>
        </div>
    }
}

#[component]
fn ProductCardSkeleton() -> impl IntoView {
    view! {
        <div class="product-card">
            <div class="skeleton" style="width: 100%; height: 200px;"></div>
            <div class="product-info">
                <div class="skeleton" style="width: 80%; height: 1.5rem; margin-bottom: 0.5rem;"></div>
                <div class="skeleton" style="width: 40%; height: 1.25rem;"></div>
            </div>
        </div>
    }
}

#[component]
fn ProductDetailSkeleton() -> impl IntoView {
    view! {
        <div style="display: grid; grid-template-columns: 1fr 1fr; gap: 2rem;">
            <div class="skeleton" style="height: 400px; border-radius: 8px;"></div>
            <div>
                <div class="skeleton" style="width: 60%; height: 2rem; margin-bottom: 1rem;"></div>
                <div class="skeleton" style="width: 30%; height: 2rem; margin-bottom: 2rem;"></div>
                <div class="skeleton" style="width: 100%; height: 4rem; margin-bottom: 1rem;"></div>
                <div class="skeleton" style="width: 150px; height: 3rem;"></div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dental_commerce::{Currency, Money};

    fn usd(cents: i64) -> Money {
        Money::new(cents, Currency::USD)
    }

    #[test]
    fn test_price_label_on_sale() {
        let product = Product::new("p1", "GL-100", "Nitrile Gloves", usd(1000)).with_sale_price(usd(750));
        let label = PriceLabel::for_product(&product);
        assert_eq!(label.current, "$7.50");
        assert_eq!(label.regular.as_deref(), Some("$10.00"));
        assert_eq!(label.percent_off, Some(25));
    }

    #[test]
    fn test_price_label_ignores_higher_sale_price() {
        let product = Product::new("p2", "MK-200", "Masks", usd(500)).with_sale_price(usd(900));
        let label = PriceLabel::for_product(&product);
        assert_eq!(label.current, "$5.00");
        assert!(label.regular.is_none());
        assert!(label.percent_off.is_none());
    }

    #[test]
    fn test_error_message_unwraps_server_errors() {
        let error = ServerFnError::new("We couldn't load categories. Please refresh the page.");
        assert_eq!(
            error_message(&error),
            "We couldn't load categories. Please refresh the page."
        );
    }
}
