//! Search module.
//!
//! In-memory filtering, sorting and pagination over product lists fetched
//! from the product database, plus the brand directory.

mod brands;
mod filter;
mod query;
mod results;

pub use brands::{BrandGroup, BrandIndex};
pub use filter::Filter;
pub use query::{ProductQuery, SortOption, EVERYDAY_ESSENTIALS_TAG};
pub use results::{Pagination, SearchResults};
