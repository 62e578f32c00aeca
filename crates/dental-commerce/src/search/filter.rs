//! Product filters.

use crate::catalog::Product;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product filter, evaluated in memory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Filter {
    /// Leaf or parent category, case-insensitive.
    Category(String),
    /// Parent category only.
    ParentCategory(String),
    /// Single manufacturer, case-insensitive.
    Manufacturer(String),
    /// Any of several manufacturers (OR).
    Manufacturers(Vec<String>),
    /// Carries the tag.
    Tag(String),
    /// Effective price within bounds (inclusive).
    PriceRange {
        min: Option<Money>,
        max: Option<Money>,
    },
    /// Flagged as a promotion or discounted.
    OnPromotion,
    /// Only show in-stock items.
    InStock,
    /// Text match on name, item number, manufacturer, category, description.
    Text(String),
}

impl Filter {
    pub fn category(name: impl Into<String>) -> Self {
        Filter::Category(name.into())
    }

    pub fn manufacturer(name: impl Into<String>) -> Self {
        Filter::Manufacturer(name.into())
    }

    pub fn price_range(min: Option<Money>, max: Option<Money>) -> Self {
        Filter::PriceRange { min, max }
    }

    pub fn tag(tag: impl Into<String>) -> Self {
        Filter::Tag(tag.into())
    }

    pub fn text(query: impl Into<String>) -> Self {
        Filter::Text(query.into())
    }

    /// Check whether a product passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::Category(name) => product.in_category(name),
            Filter::ParentCategory(name) => product
                .parent_category
                .as_deref()
                .map(|p| p.eq_ignore_ascii_case(name))
                .unwrap_or(false),
            Filter::Manufacturer(name) => product.manufacturer.eq_ignore_ascii_case(name),
            Filter::Manufacturers(names) => {
                names.is_empty()
                    || names
                        .iter()
                        .any(|n| product.manufacturer.eq_ignore_ascii_case(n))
            }
            Filter::Tag(tag) => product.has_tag(tag),
            Filter::PriceRange { min, max } => {
                let price = product.effective_price().amount_cents;
                min.map(|m| price >= m.amount_cents).unwrap_or(true)
                    && max.map(|m| price <= m.amount_cents).unwrap_or(true)
            }
            Filter::OnPromotion => product.is_promotion(),
            Filter::InStock => product.in_stock,
            Filter::Text(term) => product.matches_text(term),
        }
    }
}
