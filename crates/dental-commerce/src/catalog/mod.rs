//! Product catalog module.
//!
//! Contains the product record and the category tree.

mod category;
mod product;

pub use category::{slugify, Category, CategoryNode, CategoryTree};
pub use product::Product;
