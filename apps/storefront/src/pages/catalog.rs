//! Home, product listings, brands and product detail.

use dental_commerce::catalog::Product;
use dental_commerce::search::{BrandIndex, Filter, Pagination, ProductQuery, SearchResults, SortOption};
use dental_router::{view_to_url, View};
use leptos::prelude::*;
use leptos::server_fn::error::ServerFnError;

use super::{
    error_message, ErrorMessage, NotFound, Price, ProductCard, ProductDetailSkeleton,
    ProductGridSkeleton, StockBadge,
};
use crate::api::{get_all_products, get_category_products, get_product, search_products};
use crate::state::{category_tree, use_cart, use_categories};

const PER_PAGE: i64 = 24;

/// Which products a listing page shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Listing {
    All,
    Category {
        name: String,
        parent: Option<String>,
    },
    Search(String),
    EverydayEssentials,
    Promotions,
    Brand(String),
}

impl Listing {
    pub fn title(&self) -> String {
        match self {
            Listing::All => View::AllProducts.title(),
            Listing::Category { name, .. } => name.clone(),
            Listing::Search(query) => View::search(query.as_str()).title(),
            Listing::EverydayEssentials => View::EverydayEssentials.title(),
            Listing::Promotions => View::Promotions.title(),
            Listing::Brand(brand) => brand.clone(),
        }
    }

    /// Filters applied in the browser on top of what was fetched.
    pub fn base_query(&self) -> ProductQuery {
        match self {
            Listing::EverydayEssentials => ProductQuery::everyday_essentials(),
            Listing::Promotions => ProductQuery::promotions(),
            Listing::Brand(brand) => ProductQuery::new().with_filter(Filter::manufacturer(brand.as_str())),
            Listing::All | Listing::Category { .. } | Listing::Search(_) => ProductQuery::new(),
        }
    }

    async fn fetch(self) -> Result<Vec<Product>, ServerFnError> {
        match self {
            Listing::Category { name, .. } => get_category_products(name).await,
            Listing::Search(query) => search_products(query).await,
            _ => get_all_products().await,
        }
    }
}

/// Apply the listing's filters plus the shopper's sort and page.
fn page_of(listing: &Listing, products: &[Product], sort: SortOption, page: i64) -> SearchResults<Product> {
    listing
        .base_query()
        .with_sort(sort)
        .with_pagination(page, PER_PAGE)
        .apply(products)
}

// ============================================================================
// Home
// ============================================================================

/// Home page with hero, departments and current promotions
#[component]
pub fn HomePage() -> impl IntoView {
    let categories = use_categories();
    let products = Resource::new(|| (), |_| get_all_products());

    view! {
        <div class="hero">
            <h2>"Everything your practice needs"</h2>
            <p>"Dental chairs, imaging, small equipment and everyday supplies with free shipping."</p>
            <a href=view_to_url(&View::AllProducts) class="btn" style="margin-top: 1rem; display: inline-block;">
                "Shop All Products"
            </a>
        </div>

        <h2>"Shop by Department"</h2>
        <Suspense fallback=move || view! { <div class="departments skeleton" style="height: 6rem;"></div> }>
            {move || categories.get().map(|result| match result {
                Ok(categories) => {
                    let tree = category_tree(&categories);
                    view! {
                        <div class="departments">
                            {tree.roots.into_iter().map(|root| {
                                let href = view_to_url(&View::product_list(root.name.as_str(), None));
                                let count = root.children.len();
                                view! {
                                    <a href=href class="department">
                                        <strong>{root.name}</strong>
                                        <span>{format!("{} categories", count)}</span>
                                    </a>
                                }
                            }).collect::<Vec<_>>()}
                        </div>
                    }.into_any()
                }
                Err(e) => view! { <p class="error">{error_message(&e)}</p> }.into_any(),
            })}
        </Suspense>

        <h2>"Current Promotions"</h2>
        <Suspense fallback=move || view! { <ProductGridSkeleton/> }>
            {move || products.get().map(|result| match result {
                Ok(products) => {
                    let featured = ProductQuery::promotions().with_pagination(1, 4).apply(&products);
                    view! {
                        <div class="products">
                            {featured.items.into_iter().map(|p| view! { <ProductCard product=p/> }).collect::<Vec<_>>()}
                        </div>
                        <a href=view_to_url(&View::Promotions)>"See all promotions"</a>
                    }.into_any()
                }
                Err(e) => view! { <ErrorMessage context="Error loading products" error=e/> }.into_any(),
            })}
        </Suspense>
    }
}

// ============================================================================
// Listings
// ============================================================================

/// Category, search, essentials, promotions and brand listings.
#[component]
pub fn ListingPage(listing: Listing) -> impl IntoView {
    let sort = RwSignal::new(listing.base_query().sort);
    let page = RwSignal::new(1_i64);

    let source = listing.clone();
    let products = Resource::new(move || source.clone(), |listing| listing.fetch());

    let breadcrumb = match &listing {
        Listing::Category {
            parent: Some(parent),
            ..
        } => Some((parent.clone(), view_to_url(&View::product_list(parent.as_str(), None)))),
        _ => None,
    };
    let title = listing.title();

    view! {
        {breadcrumb.map(|(label, href)| view! { <a href=href class="breadcrumb">{label}</a> })}
        <div class="listing-header">
            <h2>{title}</h2>
            <SortSelect sort=sort page=page/>
        </div>
        <Suspense fallback=move || view! { <ProductGridSkeleton/> }>
            {move || products.get().map(|result| match result {
                Ok(products) => {
                    let results = page_of(&listing, &products, sort.get(), page.get());
                    view! { <ProductResults results=results page=page/> }.into_any()
                }
                Err(e) => view! { <ErrorMessage context="Error loading products" error=e/> }.into_any(),
            })}
        </Suspense>
    }
}

#[component]
fn SortSelect(sort: RwSignal<SortOption>, page: RwSignal<i64>) -> impl IntoView {
    view! {
        <label class="sort">
            "Sort by "
            <select on:change=move |ev| {
                sort.set(SortOption::from_param(&event_target_value(&ev)));
                page.set(1);
            }>
                {SortOption::ALL.into_iter().map(|option| view! {
                    <option value=option.as_param() selected=move || sort.get() == option>
                        {option.display_name()}
                    </option>
                }).collect::<Vec<_>>()}
            </select>
        </label>
    }
}

#[component]
fn ProductResults(results: SearchResults<Product>, page: RwSignal<i64>) -> impl IntoView {
    if results.is_empty() {
        return view! {
            <p>"No products found."</p>
            <a href=view_to_url(&View::AllProducts)>"Browse all products"</a>
        }
        .into_any();
    }

    let pagination = results.pagination.clone();
    view! {
        <p class="summary">{pagination.summary()}</p>
        <div class="products">
            {results.items.into_iter().map(|p| view! { <ProductCard product=p/> }).collect::<Vec<_>>()}
        </div>
        <Pager pagination=pagination page=page/>
    }
    .into_any()
}

#[component]
fn Pager(pagination: Pagination, page: RwSignal<i64>) -> impl IntoView {
    if pagination.total_pages <= 1 {
        return ().into_any();
    }

    let current = pagination.page;
    view! {
        <nav class="pager">
            <button disabled=pagination.is_first() on:click=move |_| page.set(current - 1)>"Previous"</button>
            {pagination.page_numbers(7).into_iter().map(|n| view! {
                <button class:active=n == current on:click=move |_| page.set(n)>{n.to_string()}</button>
            }).collect::<Vec<_>>()}
            <button disabled=pagination.is_last() on:click=move |_| page.set(current + 1)>"Next"</button>
        </nav>
    }
    .into_any()
}

// ============================================================================
// Brands
// ============================================================================

/// A-Z brand directory.
#[component]
pub fn BrandsPage() -> impl IntoView {
    let products = Resource::new(|| (), |_| get_all_products());

    view! {
        <h2>{View::Brands { brand: None }.title()}</h2>
        <Suspense fallback=move || view! { <ProductGridSkeleton/> }>
            {move || products.get().map(|result| match result {
                Ok(products) => {
                    let index = BrandIndex::build(&products);
                    view! {
                        <p class="summary">{format!("{} brands", index.brand_count())}</p>
                        <nav class="letters">
                            {index.letters().into_iter().map(|letter| view! {
                                <a href=format!("#brands-{}", letter)>{letter.to_string()}</a>
                            }).collect::<Vec<_>>()}
                        </nav>
                        {index.groups.into_iter().map(|group| view! {
                            <section class="brand-group" id=format!("brands-{}", group.letter)>
                                <h3>{group.letter.to_string()}</h3>
                                <ul>
                                    {group.brands.into_iter().map(|(brand, count)| {
                                        let href = view_to_url(&View::Brands { brand: Some(brand.clone()) });
                                        view! { <li><a href=href>{brand}</a> {format!(" ({})", count)}</li> }
                                    }).collect::<Vec<_>>()}
                                </ul>
                            </section>
                        }).collect::<Vec<_>>()}
                    }.into_any()
                }
                Err(e) => view! { <ErrorMessage context="Error loading brands" error=e/> }.into_any(),
            })}
        </Suspense>
    }
}

// ============================================================================
// Product Detail
// ============================================================================

/// Single product page
#[component]
pub fn ProductPage(item_number: String) -> impl IntoView {
    let product = Resource::new(move || item_number.clone(), get_product);

    view! {
        <Suspense fallback=move || view! { <ProductDetailSkeleton/> }>
            {move || product.get().map(|result| match result {
                Ok(Some(p)) => view! { <ProductDetail product=p/> }.into_any(),
                Ok(None) => view! { <NotFound message="Product not found"/> }.into_any(),
                Err(e) => view! { <ErrorMessage context="Error loading product" error=e/> }.into_any(),
            })}
        </Suspense>
    }
}

#[component]
fn ProductDetail(product: Product) -> impl IntoView {
    let description = product
        .description
        .clone()
        .unwrap_or_else(|| "No description available.".to_string());
    let category_href = view_to_url(&View::product_list(
        product.category.as_str(),
        product.parent_category.as_deref(),
    ));
    let images = product.images.clone();

    view! {
        <div style="display: grid; grid-template-columns: 1fr 1fr; gap: 2rem;">
            <div class="gallery">
                {if images.is_empty() {
                    view! { <div class="image-placeholder" style="height: 400px;"></div> }.into_any()
                } else {
                    images.into_iter().map(|src| view! { <img src=src alt=""/> }).collect::<Vec<_>>().into_any()
                }}
            </div>
            <div>
                <a href=category_href class="breadcrumb">{product.category.clone()}</a>
                <h1>{product.name.clone()}</h1>
                <p class="manufacturer">{product.manufacturer.clone()}</p>
                <p class="item-number">"Item #" {product.item_number.to_string()}</p>
                <Price product=product.clone()/>
                <StockBadge in_stock=product.in_stock/>
                <p style="color: #666; margin: 1rem 0;">{description}</p>
                <AddToCart product=product/>
            </div>
        </div>
    }
}

#[component]
fn AddToCart(product: Product) -> impl IntoView {
    let cart = use_cart();
    let quantity = RwSignal::new(1_i64);
    let message = RwSignal::new(None::<Result<String, String>>);

    let on_add = move |_| {
        let qty = quantity.get_untracked();
        let result = cart
            .add(&product, qty)
            .map(|_| format!("Added {} to cart!", qty))
            .map_err(|e| e.to_string());
        message.set(Some(result));
    };

    view! {
        <div class="add-to-cart">
            <input
                type="number"
                min="1"
                prop:value=move || quantity.get().to_string()
                on:change=move |ev| {
                    if let Ok(qty) = event_target_value(&ev).parse::<i64>() {
                        quantity.set(qty.max(1));
                    }
                }
            />
            <button type="button" class="btn" on:click=on_add>"Add to Cart"</button>
        </div>
        {move || message.get().map(|result| match result {
            Ok(text) => view! {
                <p style="color: green; margin-top: 0.5rem;">
                    {text} " " <a href=view_to_url(&View::cart())>"View cart"</a>
                </p>
            }.into_any(),
            Err(e) => view! {
                <p style="color: red; margin-top: 0.5rem;">"Error: " {e}</p>
            }.into_any(),
        })}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dental_commerce::search::EVERYDAY_ESSENTIALS_TAG;
    use dental_commerce::{Currency, Money};

    fn products() -> Vec<Product> {
        let usd = |cents| Money::new(cents, Currency::USD);
        vec![
            Product::new("1", "GL-1", "Nitrile Gloves", usd(1200))
                .with_manufacturer("Acme")
                .with_tag(EVERYDAY_ESSENTIALS_TAG),
            Product::new("2", "MK-1", "Face Masks", usd(800))
                .with_manufacturer("Bright")
                .with_sale_price(usd(600)),
            Product::new("3", "DC-1", "Dental Chair", usd(450000)).with_manufacturer("Acme"),
        ]
    }

    #[test]
    fn test_listing_filters() {
        let all = products();

        let essentials = page_of(&Listing::EverydayEssentials, &all, SortOption::Featured, 1);
        assert_eq!(essentials.len(), 1);
        assert_eq!(essentials.items[0].item_number.as_str(), "GL-1");

        let promotions = page_of(&Listing::Promotions, &all, SortOption::PriceAsc, 1);
        assert_eq!(promotions.len(), 1);
        assert_eq!(promotions.items[0].item_number.as_str(), "MK-1");

        let acme = page_of(&Listing::Brand("acme".into()), &all, SortOption::PriceDesc, 1);
        assert_eq!(acme.len(), 2);
        assert_eq!(acme.items[0].item_number.as_str(), "DC-1");
    }

    #[test]
    fn test_listing_sort_and_page() {
        let all = products();
        let sorted = page_of(&Listing::All, &all, SortOption::NameAsc, 1);
        let names: Vec<&str> = sorted.items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Dental Chair", "Face Masks", "Nitrile Gloves"]);

        let past_end = page_of(&Listing::All, &all, SortOption::Featured, 5);
        assert!(past_end.is_empty());
        assert!(!past_end.pagination.has_next);
    }

    #[test]
    fn test_listing_titles() {
        assert_eq!(Listing::Search("gloves".into()).title(), "Search results for \"gloves\"");
        assert_eq!(
            Listing::Category {
                name: "Dental Chairs".into(),
                parent: Some("Equipment".into())
            }
            .title(),
            "Dental Chairs"
        );
    }
}
