//! Product query builder.

use crate::catalog::Product;
use crate::search::{Filter, Pagination, SearchResults};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Tag that places a product on the Everyday Essentials page.
pub const EVERYDAY_ESSENTIALS_TAG: &str = "everyday-essentials";

/// Sort options for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortOption {
    /// Order as returned by the product database.
    #[default]
    Featured,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Sort by name A-Z.
    NameAsc,
    /// Sort by name Z-A.
    NameDesc,
    /// Sort by manufacturer, then name.
    Manufacturer,
}

impl SortOption {
    pub const ALL: [SortOption; 6] = [
        SortOption::Featured,
        SortOption::PriceAsc,
        SortOption::PriceDesc,
        SortOption::NameAsc,
        SortOption::NameDesc,
        SortOption::Manufacturer,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Featured => "Featured",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
            SortOption::NameAsc => "Name: A-Z",
            SortOption::NameDesc => "Name: Z-A",
            SortOption::Manufacturer => "Brand",
        }
    }

    /// Value used in `<select>` options and query strings.
    pub fn as_param(&self) -> &'static str {
        match self {
            SortOption::Featured => "featured",
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
            SortOption::NameAsc => "name-asc",
            SortOption::NameDesc => "name-desc",
            SortOption::Manufacturer => "brand",
        }
    }

    /// Parse a parameter value; unknown values fall back to Featured.
    pub fn from_param(value: &str) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.as_param() == value)
            .unwrap_or_default()
    }

    /// Compare two products under this ordering.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOption::Featured => Ordering::Equal,
            SortOption::PriceAsc => a.effective_price().cmp(&b.effective_price()),
            SortOption::PriceDesc => b.effective_price().cmp(&a.effective_price()),
            SortOption::NameAsc => compare_names(a, b),
            SortOption::NameDesc => compare_names(b, a),
            SortOption::Manufacturer => a
                .manufacturer
                .to_lowercase()
                .cmp(&b.manufacturer.to_lowercase())
                .then_with(|| compare_names(a, b)),
        }
    }
}

fn compare_names(a: &Product, b: &Product) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

/// A product listing query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductQuery {
    /// Free-text query.
    pub text: Option<String>,
    /// Filters to apply (AND).
    pub filters: Vec<Filter>,
    /// Sort option.
    pub sort: SortOption,
    /// Current page (1-indexed).
    pub page: i64,
    /// Items per page.
    pub per_page: i64,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductQuery {
    pub fn new() -> Self {
        Self {
            text: None,
            filters: Vec::new(),
            sort: SortOption::Featured,
            page: 1,
            per_page: 24,
        }
    }

    /// Products tagged for the Everyday Essentials page.
    pub fn everyday_essentials() -> Self {
        Self::new().with_filter(Filter::tag(EVERYDAY_ESSENTIALS_TAG))
    }

    /// Flagged or discounted products, cheapest first.
    pub fn promotions() -> Self {
        Self::new()
            .with_filter(Filter::OnPromotion)
            .with_sort(SortOption::PriceAsc)
    }

    /// Products in a leaf or parent category.
    pub fn in_category(name: impl Into<String>) -> Self {
        Self::new().with_filter(Filter::category(name))
    }

    /// Set the text query. Blank text is ignored.
    pub fn with_text(mut self, q: impl Into<String>) -> Self {
        let q = q.into();
        let trimmed = q.trim();
        self.text = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Set pagination; page is at least 1 and per-page is clamped to 1..=100.
    pub fn with_pagination(mut self, page: i64, per_page: i64) -> Self {
        self.page = page.max(1);
        self.per_page = per_page.clamp(1, 100);
        self
    }

    /// Check a product against text and every filter.
    pub fn matches(&self, product: &Product) -> bool {
        let text_ok = self
            .text
            .as_deref()
            .map(|t| product.matches_text(t))
            .unwrap_or(true);
        text_ok && self.filters.iter().all(|f| f.matches(product))
    }

    /// All matching products, sorted, without pagination.
    pub fn matching<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let mut matched: Vec<&Product> = products.iter().filter(|p| self.matches(p)).collect();
        // sort_by is stable, so Featured keeps database order
        matched.sort_by(|a, b| self.sort.compare(a, b));
        matched
    }

    /// Filter, sort and paginate.
    pub fn apply(&self, products: &[Product]) -> SearchResults<Product> {
        let matched = self.matching(products);
        let pagination = Pagination::new(self.page, self.per_page, matched.len() as i64);
        let items = matched
            .into_iter()
            .skip(usize::try_from(pagination.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(self.per_page).unwrap_or(0))
            .cloned()
            .collect();
        SearchResults::new(items, pagination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("1", "GL-1", "Nitrile Gloves", Money::new(1299, Currency::USD))
                .with_category("Gloves", Some("Supplies"))
                .with_manufacturer("Medline")
                .with_tag(EVERYDAY_ESSENTIALS_TAG),
            Product::new("2", "MK-1", "Ear Loop Masks", Money::new(899, Currency::USD))
                .with_category("Masks & Face Shields", Some("Supplies"))
                .with_manufacturer("Crosstex")
                .with_tag(EVERYDAY_ESSENTIALS_TAG),
            Product::new("3", "DC-1", "Patient Chair", Money::new(1249900, Currency::USD))
                .with_category("Dental Chairs", Some("Equipment"))
                .with_manufacturer("A-dec")
                .with_sale_price(Money::new(1099900, Currency::USD)),
            Product::new("4", "CL-1", "LED Curing Light", Money::new(49900, Currency::USD))
                .with_category("Curing Lights", Some("Small Equipment"))
                .with_manufacturer("Ivoclar"),
        ]
    }

    #[test]
    fn test_everyday_essentials() {
        let products = catalog();
        let results = ProductQuery::everyday_essentials()
            .with_sort(SortOption::PriceAsc)
            .apply(&products);
        let names: Vec<&str> = results.items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Ear Loop Masks", "Nitrile Gloves"]);
    }

    #[test]
    fn test_promotions() {
        let products = catalog();
        let results = ProductQuery::promotions().apply(&products);
        assert_eq!(results.len(), 1);
        assert_eq!(results.items[0].item_number.as_str(), "DC-1");
    }

    #[test]
    fn test_featured_keeps_input_order() {
        let products = catalog();
        let results = ProductQuery::in_category("Supplies").apply(&products);
        let ids: Vec<&str> = results.items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_sort_by_brand_and_name() {
        let products = catalog();
        let sorted = ProductQuery::new()
            .with_sort(SortOption::Manufacturer)
            .matching(&products);
        let brands: Vec<&str> = sorted.iter().map(|p| p.manufacturer.as_str()).collect();
        assert_eq!(brands, vec!["A-dec", "Crosstex", "Ivoclar", "Medline"]);

        let sorted = ProductQuery::new().with_sort(SortOption::NameDesc).matching(&products);
        assert_eq!(sorted[0].name, "Patient Chair");
    }

    #[test]
    fn test_text_query() {
        let products = catalog();
        let results = ProductQuery::new().with_text("  light ").apply(&products);
        assert_eq!(results.len(), 1);
        assert_eq!(ProductQuery::new().with_text("   ").text, None);
    }

    #[test]
    fn test_pagination_applies() {
        let products = catalog();
        let results = ProductQuery::new().with_pagination(2, 3).apply(&products);
        assert_eq!(results.len(), 1);
        assert_eq!(results.pagination.total, 4);
        assert_eq!(results.pagination.total_pages, 2);

        let clamped = ProductQuery::new().with_pagination(0, 1000);
        assert_eq!(clamped.page, 1);
        assert_eq!(clamped.per_page, 100);
    }

    #[test]
    fn test_page_far_past_the_end() {
        let products = catalog();
        let results = ProductQuery::new()
            .with_pagination(i64::MAX, 100)
            .apply(&products);
        assert!(results.is_empty());
        assert_eq!(results.pagination.total, 4);
        assert!(!results.pagination.has_next);
    }

    #[test]
    fn test_sort_param_round_trip() {
        for sort in SortOption::ALL {
            assert_eq!(SortOption::from_param(sort.as_param()), sort);
        }
        assert_eq!(SortOption::from_param("bogus"), SortOption::Featured);
    }
}
