//! Client state shared through context: the cart, categories and navigation.

use dental_commerce::cart::Cart;
use dental_commerce::catalog::{Category, CategoryTree, Product};
use dental_commerce::{CommerceError, ProductId};
use dental_router::{view_to_url, CheckoutOutcome, Navigator, View};
use leptos::prelude::*;
use leptos::server_fn::error::ServerFnError;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

/// Local storage key for the cart snapshot.
pub const CART_STORAGE_KEY: &str = "dental-storefront.cart";

// ============================================================================
// Cart
// ============================================================================

/// The shopper's cart, persisted to local storage in the browser.
#[derive(Debug, Clone, Copy)]
pub struct CartState {
    cart: RwSignal<Cart>,
}

impl CartState {
    /// Create the cart, restore any saved snapshot, and provide it as context.
    pub fn provide() -> Self {
        let state = Self {
            cart: RwSignal::new(Cart::new()),
        };
        let cart = state.cart;

        // Effects only run in the browser, after hydration.
        Effect::new(move |restored: Option<bool>| {
            if restored.is_none() {
                if let Some(saved) = storage::load(CART_STORAGE_KEY).and_then(|t| restore(&t)) {
                    cart.set(saved);
                }
            }
            cart.with(|c| match c.to_json() {
                Ok(json) => storage::save(CART_STORAGE_KEY, &json),
                Err(e) => tracing::warn!(error = %e, "Cart not saved"),
            });
            true
        });

        provide_context(state);
        state
    }

    pub fn item_count(&self) -> i64 {
        self.cart.with(|c| c.item_count())
    }

    pub fn is_empty(&self) -> bool {
        self.cart.with(|c| c.is_empty())
    }

    pub fn snapshot(&self) -> Cart {
        self.cart.get()
    }

    pub fn add(&self, product: &Product, quantity: i64) -> Result<(), CommerceError> {
        let mut result = Ok(());
        self.cart.update(|c| result = c.add_product(product, quantity));
        result
    }

    /// Set a line's quantity; zero or less removes it.
    pub fn set_quantity(&self, id: &ProductId, quantity: i64) -> Result<(), CommerceError> {
        let mut result = Ok(());
        self.cart
            .update(|c| result = c.update_quantity(id, quantity).map(|_| ()));
        result
    }

    pub fn remove(&self, id: &ProductId) {
        self.cart.update(|c| {
            c.remove_item(id);
        });
    }

    pub fn clear(&self) {
        self.cart.update(|c| c.clear());
    }
}

pub fn use_cart() -> CartState {
    expect_context::<CartState>()
}

/// Parse a saved snapshot, dropping it if it no longer loads.
fn restore(text: &str) -> Option<Cart> {
    match Cart::from_json(text) {
        Ok(cart) => Some(cart),
        Err(e) => {
            tracing::warn!(error = %e, "Discarding saved cart");
            None
        }
    }
}

#[cfg(feature = "hydrate")]
mod storage {
    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    pub fn load(key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    pub fn save(key: &str, value: &str) {
        if let Some(storage) = local_storage() {
            if storage.set_item(key, value).is_err() {
                tracing::warn!(key, "Local storage write failed");
            }
        }
    }
}

#[cfg(not(feature = "hydrate"))]
mod storage {
    pub fn load(_key: &str) -> Option<String> {
        None
    }

    pub fn save(_key: &str, _value: &str) {}
}

/// Send the browser to an external page, such as hosted checkout.
pub fn redirect_to(url: &str) {
    #[cfg(feature = "hydrate")]
    {
        let result = web_sys::window()
            .map(|w| w.location().set_href(url))
            .transpose();
        if result.is_err() {
            tracing::error!(url, "Redirect failed");
        }
    }

    #[cfg(not(feature = "hydrate"))]
    {
        tracing::debug!(url, "Redirect skipped outside the browser");
    }
}

// ============================================================================
// Categories
// ============================================================================

/// The category load, shared by the mega menu and the home page.
#[derive(Clone, Copy)]
pub struct Categories(pub Resource<Result<Vec<Category>, ServerFnError>>);

impl Categories {
    pub fn provide() -> Self {
        let categories = Self(Resource::new(|| (), |_| crate::api::get_categories()));
        provide_context(categories);
        categories
    }
}

pub fn use_categories() -> Resource<Result<Vec<Category>, ServerFnError>> {
    expect_context::<Categories>().0
}

/// Tree from live categories, or the built-in tree when there are none.
pub fn category_tree(categories: &[Category]) -> CategoryTree {
    if categories.is_empty() {
        CategoryTree::standard()
    } else {
        CategoryTree::from_categories(categories)
    }
}

// ============================================================================
// Navigation
// ============================================================================

/// Current view, kept in step with the router location.
///
/// The Leptos router owns browser history; the [`Navigator`] re-derives the
/// view on every location change and notifies listeners.
#[derive(Clone)]
pub struct Navigation {
    navigator: Navigator,
    view: RwSignal<View>,
}

impl Navigation {
    pub fn provide(initial_url: &str) -> Self {
        let navigator = Navigator::in_memory(initial_url);
        let view = RwSignal::new(navigator.current_view());

        let subscription = navigator.subscribe(move |next: &View| {
            tracing::debug!(kind = next.kind(), "View changed");
            view.set(next.clone());
        });
        let handle = navigator.clone();
        on_cleanup(move || {
            handle.unsubscribe(subscription);
        });

        let navigation = Self { navigator, view };
        provide_context(navigation.clone());
        navigation
    }

    pub fn view(&self) -> RwSignal<View> {
        self.view
    }

    /// Re-derive the view after the location changed.
    pub fn sync(&self, path: &str, search: &str) -> View {
        self.navigator.sync_from_location(path, search)
    }

    /// Run `f` after every navigation.
    pub fn on_navigate(&self, f: impl Fn(&View) + Send + Sync + 'static) {
        let subscription = self.navigator.subscribe(f);
        let handle = self.navigator.clone();
        on_cleanup(move || {
            handle.unsubscribe(subscription);
        });
    }
}

/// `path?search` as the navigator stores it.
pub fn location_url(path: &str, search: &str) -> String {
    let search = search.trim_start_matches('?');
    if search.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{search}")
    }
}

pub fn use_navigation() -> Navigation {
    expect_context::<Navigation>()
}

/// Navigate to a view through the router.
pub fn use_go() -> impl Fn(&View, bool) + Clone {
    let navigate = use_navigate();
    move |view: &View, replace: bool| {
        navigate(
            &view_to_url(view),
            NavigateOptions {
                replace,
                ..Default::default()
            },
        );
    }
}

/// Empty the cart once checkout reports success.
pub fn clear_cart_on_checkout(navigation: &Navigation, cart: CartState) {
    navigation.on_navigate(move |view| {
        if checkout_succeeded(view) {
            tracing::info!("Checkout completed; clearing cart");
            cart.clear();
        }
    });
}

fn checkout_succeeded(view: &View) -> bool {
    matches!(
        view,
        View::Cart {
            checkout: Some(CheckoutOutcome::Succeeded)
        }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_normalizes_snapshot() {
        let cart = restore(
            r#"{"currency": "USD", "items": [
                {"id": "a", "name": "Gloves", "price": {"amount_cents": 1000, "currency": "USD"}, "quantity": 2},
                {"id": "a", "name": "Gloves", "price": {"amount_cents": 1000, "currency": "USD"}, "quantity": 1}
            ]}"#,
        )
        .unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_restore_discards_garbage() {
        assert!(restore("not json").is_none());
    }

    #[test]
    fn test_category_tree_fallback() {
        assert_eq!(category_tree(&[]), CategoryTree::standard());

        let live = vec![
            Category::new("1", "Equipment", None),
            Category::new("2", "Dental Chairs", Some("Equipment")),
        ];
        let tree = category_tree(&live);
        assert_eq!(tree.roots.len(), 1);
        assert_eq!(tree.parent_of("Dental Chairs"), Some("Equipment"));
    }

    #[test]
    fn test_location_url() {
        assert_eq!(location_url("/cart", ""), "/cart");
        assert_eq!(location_url("/cart", "?success=true"), "/cart?success=true");
        assert_eq!(location_url("/search", "q=gloves"), "/search?q=gloves");
    }

    #[test]
    fn test_checkout_succeeded() {
        assert!(checkout_succeeded(&dental_router::url_to_view(
            "/cart",
            "success=true"
        )));
        assert!(!checkout_succeeded(&dental_router::url_to_view(
            "/cart",
            "canceled=true"
        )));
        assert!(!checkout_succeeded(&View::cart()));
    }
}
