//! Outbound adapters for the dental supply storefront.
//!
//! - [`FetchClient`]: HTTP over Spin outbound HTTP (wasm32) or `reqwest`
//! - [`FirestoreCatalog`]: products and categories from Firestore
//! - [`CheckoutClient`] and [`ContactClient`]: Firebase callable functions
//!   for hosted checkout, the billing portal and contact email
//! - [`RetryPolicy`]: bounded retry for the category load
//!
//! # Example
//!
//! ```rust,ignore
//! use dental_data::prelude::*;
//!
//! let settings = FirebaseSettings::new("my-project");
//! let catalog = FirestoreCatalog::new(FetchClient::new(), settings.clone())?;
//! let categories = load_categories(&catalog, &RetryPolicy::category_load()).await?;
//!
//! let checkout = CheckoutClient::new(
//!     CallableClient::new(FetchClient::new(), &settings),
//!     StripeSettings::default(),
//! );
//! let session = checkout
//!     .create_checkout_session(&cart, &CheckoutUrls::for_origin("https://shop.example"))
//!     .await?;
//! ```

mod callable;
mod catalog;
mod checkout;
mod client;
mod contact;
mod error;
mod firestore;
mod request;
mod response;
mod retry;
mod transport;

pub use callable::CallableClient;
pub use catalog::{load_categories, load_category_tree, InMemoryCatalog, ProductCatalog};
pub use checkout::{
    CheckoutClient, CheckoutSession, CheckoutSessionRequest, CheckoutUrls, LineItem, PortalLink,
    StripeSettings, CREATE_CHECKOUT_SESSION, CREATE_PORTAL_LINK,
};
pub use client::{ClientRequestBuilder, FetchClient};
pub use contact::{ContactClient, ContactRequest, ContactResponse, SEND_CONTACT_EMAIL};
pub use error::FetchError;
pub use firestore::{decode_document, decode_value, FirebaseSettings, FirestoreCatalog};
pub use request::{Method, RequestBuilder};
pub use response::Response;
pub use retry::{BackoffStrategy, RetryPolicy};
pub use transport::{default_transport, Transport};

#[cfg(target_arch = "wasm32")]
pub use transport::SpinTransport;
#[cfg(not(target_arch = "wasm32"))]
pub use transport::ReqwestTransport;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        load_categories, CallableClient, CheckoutClient, CheckoutUrls, ContactClient,
        ContactRequest, FetchClient, FetchError, FirebaseSettings, FirestoreCatalog,
        InMemoryCatalog, ProductCatalog, RetryPolicy, StripeSettings,
    };
}
