//! Storefront shell, layout and view dispatch.

use dental_content::{MegaMenu, MenuSection};
use dental_router::{view_to_url, ContentPage, View};
use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::hooks::use_location;
use leptos_router::path;

use crate::pages::{
    error_message, AccountPage, BlogPage, BlogPostPage, BrandsPage, BuyingGuidePage,
    BuyingGuidesPage, CartPage, ContactPage, FaqPage, HomePage, InfoPage, Listing, ListingPage,
    NotFound, ProductPage,
};
use crate::state::{
    category_tree, clear_cart_on_checkout, location_url, use_cart, use_categories, use_go,
    use_navigation, CartState, Categories, Navigation,
};

pub const SITE_NAME: &str = "Dental Supply Co.";

#[cfg(feature = "ssr")]
pub fn shell(options: leptos::config::LeptosOptions) -> impl IntoView {
    use leptos::hydration::{AutoReload, HydrationScripts};
    use leptos::view;

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options=options.clone() root=""/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

// ============================================================================
// App Component
// ============================================================================

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    CartState::provide();
    Categories::provide();

    let fallback = || view! { <NotFound/> }.into_view();

    view! {
        <Stylesheet id="leptos" href="/pkg/dental_storefront.css"/>
        <Meta name="description" content="Dental equipment, imaging and supplies for modern practices"/>

        <Router>
            <Layout>
                <Routes fallback>
                    <Route path=path!("") view=Storefront/>
                    <Route path=path!("/*any") view=Storefront/>
                </Routes>
            </Layout>
        </Router>
    }
}

/// Tracks the router location and provides [`Navigation`] to every page.
#[component]
fn Layout(children: Children) -> impl IntoView {
    let location = use_location();
    let navigation = Navigation::provide(&location_url(
        &location.pathname.get_untracked(),
        &location.search.get_untracked(),
    ));
    clear_cart_on_checkout(&navigation, use_cart());

    let sync = navigation.clone();
    Effect::new(move |_| {
        let path = location.pathname.get();
        let search = location.search.get();
        sync.sync(&path, &search);
    });

    let current = navigation.view();

    view! {
        <Title text=move || format!("{} | {}", current.get().title(), SITE_NAME)/>
        <Header/>
        <MegaMenuNav/>
        <main>{children()}</main>
        <Footer/>
    }
}

/// Renders the page for the current view.
#[component]
fn Storefront() -> impl IntoView {
    let current = use_navigation().view();

    move || match current.get() {
        View::Home => view! { <HomePage/> }.into_any(),
        View::AllProducts => view! { <ListingPage listing=Listing::All/> }.into_any(),
        View::ProductList {
            category_name,
            parent_category,
        } => {
            let listing = Listing::Category {
                name: category_name,
                parent: parent_category,
            };
            view! { <ListingPage listing=listing/> }.into_any()
        }
        View::ProductDetail { item_number } => {
            view! { <ProductPage item_number=item_number/> }.into_any()
        }
        View::Search { query } => view! { <ListingPage listing=Listing::Search(query)/> }.into_any(),
        View::Cart { checkout } => view! { <CartPage checkout=checkout/> }.into_any(),
        View::EverydayEssentials => {
            view! { <ListingPage listing=Listing::EverydayEssentials/> }.into_any()
        }
        View::Promotions => view! { <ListingPage listing=Listing::Promotions/> }.into_any(),
        View::Brands { brand: Some(brand) } => {
            view! { <ListingPage listing=Listing::Brand(brand)/> }.into_any()
        }
        View::Brands { brand: None } => view! { <BrandsPage/> }.into_any(),
        View::Blog => view! { <BlogPage/> }.into_any(),
        View::BlogPost { post_id } => view! { <BlogPostPage post_id=post_id/> }.into_any(),
        View::Faq { category } => view! { <FaqPage category=category/> }.into_any(),
        View::BuyingGuides => view! { <BuyingGuidesPage/> }.into_any(),
        View::BuyingGuide { guide } => view! { <BuyingGuidePage slug=guide/> }.into_any(),
        View::Contact => view! { <ContactPage/> }.into_any(),
        View::Account => view! { <AccountPage/> }.into_any(),
        View::Page { page } => view! { <InfoPage page=page/> }.into_any(),
    }
}

// ============================================================================
// Layout Components
// ============================================================================

#[component]
fn Header() -> impl IntoView {
    let cart = use_cart();

    view! {
        <header>
            <a href="/" class="brand"><h1>{SITE_NAME}</h1></a>
            <SearchBox/>
            <nav>
                <a href=view_to_url(&View::AllProducts)>"Shop All"</a>
                <a href=view_to_url(&View::Promotions)>"Promotions"</a>
                <a href=view_to_url(&View::Account)>"Account"</a>
                <a href=view_to_url(&View::cart()) class="cart-link">
                    "Cart (" {move || cart.item_count()} ")"
                </a>
            </nav>
        </header>
    }
}

#[component]
fn SearchBox() -> impl IntoView {
    let go = use_go();
    let query = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let term = query.get_untracked();
        go(&View::search(term.trim()), false);
    };

    view! {
        <form class="search" role="search" on:submit=on_submit>
            <input
                type="search"
                name="q"
                placeholder="Search by name, brand or item number"
                prop:value=move || query.get()
                on:input=move |ev| query.set(event_target_value(&ev))
            />
            <button type="submit" class="btn">"Search"</button>
        </form>
    }
}

#[component]
fn MegaMenuNav() -> impl IntoView {
    let categories = use_categories();

    view! {
        <nav class="mega-menu">
            <Suspense fallback=move || view! { <MenuSkeleton/> }>
                {move || categories.get().map(|result| match result {
                    Ok(categories) => {
                        let menu = MegaMenu::from_tree(&category_tree(&categories));
                        view! {
                            <ul class="menu-sections">
                                {menu.sections.into_iter().map(|section| {
                                    view! { <MenuSectionItem section=section/> }
                                }).collect::<Vec<_>>()}
                            </ul>
                        }.into_any()
                    }
                    Err(e) => view! {
                        <p class="error">{error_message(&e)}</p>
                    }.into_any(),
                })}
            </Suspense>
        </nav>
    }
}

#[component]
fn MenuSectionItem(section: MenuSection) -> impl IntoView {
    let title = match &section.view {
        Some(view) => view! { <a href=view_to_url(view) class="menu-title">{section.title.clone()}</a> }.into_any(),
        None => view! { <span class="menu-title">{section.title.clone()}</span> }.into_any(),
    };

    view! {
        <li class="menu-section">
            {title}
            <div class="menu-columns">
                {section.columns.into_iter().map(|column| view! {
                    <ul class="menu-column">
                        {column.heading.map(|heading| view! { <li class="menu-heading">{heading}</li> })}
                        {column.links.into_iter().map(|link| {
                            let href = link.href();
                            view! { <li><a href=href>{link.label}</a></li> }
                        }).collect::<Vec<_>>()}
                    </ul>
                }).collect::<Vec<_>>()}
            </div>
        </li>
    }
}

#[component]
fn Footer() -> impl IntoView {
    let resources = [
        ("Blog", View::Blog),
        ("Buying Guides", View::BuyingGuides),
        ("FAQ", View::Faq { category: None }),
        ("Contact Us", View::Contact),
    ];

    view! {
        <footer>
            <div class="footer-links">
                <ul>
                    {resources.into_iter().map(|(label, target)| view! {
                        <li><a href=view_to_url(&target)>{label}</a></li>
                    }).collect::<Vec<_>>()}
                </ul>
                <ul>
                    {ContentPage::ALL.into_iter().map(|page| view! {
                        <li><a href=view_to_url(&View::page(page))>{page.title()}</a></li>
                    }).collect::<Vec<_>>()}
                </ul>
            </div>
            <p>"Free shipping on every order. Tax is calculated at checkout."</p>
            <p style="font-size: 0.8rem; color: #888;">{format!("© {}", SITE_NAME)}</p>
        </footer>
    }
}

#[component]
fn MenuSkeleton() -> impl IntoView {
    view! {
        <ul class="menu-sections">
            <li class="skeleton" style="width: 8rem; height: 1.25rem;"></li>
            <li class="skeleton" style="width: 8rem; height: 1.25rem;"></li>
            <li class="skeleton" style="width: 8rem; height: 1.25rem;"></li>
            <li class="skeleton" style="width: 8rem; height: 1.25rem;"></li>
        </ul>
    }
}
