//! Catalog, cart and pricing types for the dental supply storefront.
//!
//! This crate holds the storefront's domain model:
//!
//! - **Catalog**: Products as read from the product database, and the static
//!   two-level category tree that backs the mega menu and category URLs
//! - **Cart**: Line items, quantity rules and totals (shipping is free, tax is
//!   left to the hosted checkout)
//! - **Search**: In-memory filtering, sorting and pagination used by the
//!   listing pages, plus the brand directory
//!
//! # Example
//!
//! ```rust
//! use dental_commerce::prelude::*;
//!
//! let mut cart = Cart::new();
//! cart.add_item(CartItem::new(
//!     "prod-1",
//!     "Nitrile Exam Gloves",
//!     Money::from_decimal(10.0, Currency::USD),
//!     2,
//! ))
//! .unwrap();
//!
//! assert_eq!(cart.subtotal().unwrap().display(), "$20.00");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod cart;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Category, CategoryNode, CategoryTree, Product};

    // Cart
    pub use crate::cart::{Cart, CartItem, CartTotals, TaxTreatment, MAX_QUANTITY_PER_ITEM};

    // Search
    pub use crate::search::{
        BrandGroup, BrandIndex, Filter, Pagination, ProductQuery, SearchResults, SortOption,
    };
}
