//! Shopping cart module.
//!
//! Contains the cart, its line items and the totals shown before checkout.

mod cart;
mod pricing;

pub use cart::{Cart, CartItem, MAX_QUANTITY_PER_ITEM};
pub use pricing::{CartTotals, LineTotal, TaxTreatment};
