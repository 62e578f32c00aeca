//! URL routing for the dental supply storefront.
//!
//! Every page of the storefront is described by a [`View`]. The URL is a
//! mirror of the current view, so the two are kept interchangeable:
//!
//! ```text
//! /                                  -> Home
//! /category/equipment/dental-chairs  -> ProductList { "Dental Chairs", Some("Equipment") }
//! /product/DC-1200                   -> ProductDetail { "DC-1200" }
//! /search?q=gloves                   -> Search { "gloves" }
//! /cart?success=true                 -> Cart { Some(Succeeded) }
//! ```
//!
//! # Usage
//!
//! ```
//! use dental_router::prelude::*;
//!
//! let view = url_to_view("/category/supplies/gloves", "");
//! assert_eq!(view, View::product_list("Gloves", Some("Supplies")));
//! assert_eq!(view_to_url(&view), "/category/supplies/gloves");
//! ```
//!
//! The [`Navigator`] keeps a history stack in sync with the current view and
//! notifies listeners after every navigation.

mod navigator;
pub mod prelude;
mod url;
mod view;

pub use navigator::{HistoryBackend, MemoryHistory, Navigator, Subscription};
pub use url::{
    decode_segment, encode_segment, slug_to_title, split_url, url_to_view, url_to_view_in,
    view_to_url,
};
pub use view::{CheckoutOutcome, ContentPage, View};
