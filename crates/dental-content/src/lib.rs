//! Editorial content for the dental supply storefront.
//!
//! - [`blog`]: posts from the bundled JSON document, with a built-in fallback
//! - [`faq`]: frequently asked questions grouped by section
//! - [`guides`]: buying guides linked to catalog categories
//! - [`menu`]: the mega menu, derived from the category tree

pub mod blog;
mod error;
pub mod faq;
pub mod guides;
pub mod menu;

pub use blog::{BlogPost, BlogService};
pub use error::ContentError;
pub use faq::{faq_section, faq_sections, FaqEntry, FaqSection};
pub use guides::{buying_guides, guide, BuyingGuide, GuideSection};
pub use menu::{MegaMenu, MenuColumn, MenuLink, MenuSection};
