//! Dental supply storefront.
//!
//! Every page is derived from the browser location through
//! [`dental_router::url_to_view`], so a URL always reproduces the page it
//! names. Data comes from server functions backed by Firestore and Firebase
//! callable functions; the cart lives in the browser.

mod api;
mod app;
mod pages;
mod state;

#[cfg(feature = "ssr")]
mod backend;
#[cfg(feature = "ssr")]
mod server;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use app::App;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
