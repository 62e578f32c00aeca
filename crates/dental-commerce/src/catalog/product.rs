//! Product type.

use crate::ids::{ItemNumber, ProductId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// Products are owned by the external product database; the storefront only
/// reads and displays them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Document id in the product database.
    pub id: ProductId,
    /// Supplier item number (unique, used in product URLs).
    pub item_number: ItemNumber,
    /// Product name.
    pub name: String,
    /// Long description (plain text).
    #[serde(default)]
    pub description: Option<String>,
    /// Regular price.
    pub price: Money,
    /// Promotional price, when lower than `price`.
    #[serde(default)]
    pub sale_price: Option<Money>,
    /// Image URLs, primary first.
    #[serde(default)]
    pub images: Vec<String>,
    /// Leaf category name (e.g. "Dental Chairs").
    pub category: String,
    /// Top-level category name (e.g. "Equipment").
    #[serde(default)]
    pub parent_category: Option<String>,
    /// Manufacturer / brand.
    #[serde(default)]
    pub manufacturer: String,
    /// Free-form tags (e.g. "everyday-essentials").
    #[serde(default)]
    pub tags: Vec<String>,
    /// Listed on the promotions page.
    #[serde(default)]
    pub on_promotion: bool,
    /// Whether the supplier reports stock.
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

impl Product {
    /// Create a product with the required fields.
    pub fn new(
        id: impl Into<ProductId>,
        item_number: impl Into<ItemNumber>,
        name: impl Into<String>,
        price: Money,
    ) -> Self {
        Self {
            id: id.into(),
            item_number: item_number.into(),
            name: name.into(),
            description: None,
            price,
            sale_price: None,
            images: Vec::new(),
            category: String::new(),
            parent_category: None,
            manufacturer: String::new(),
            tags: Vec::new(),
            on_promotion: false,
            in_stock: true,
        }
    }

    /// Set leaf and parent category.
    pub fn with_category(mut self, category: impl Into<String>, parent: Option<&str>) -> Self {
        self.category = category.into();
        self.parent_category = parent.map(str::to_string);
        self
    }

    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = manufacturer.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        if !self.has_tag(&tag) {
            self.tags.push(tag);
        }
        self
    }

    pub fn with_sale_price(mut self, sale_price: Money) -> Self {
        self.sale_price = Some(sale_price);
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.images.push(url.into());
        self
    }

    /// Price the customer pays: the sale price when it undercuts the regular
    /// price, otherwise the regular price.
    pub fn effective_price(&self) -> Money {
        match self.sale_price {
            Some(sale) if self.is_on_sale() => sale,
            _ => self.price,
        }
    }

    /// Check if a lower sale price is set.
    pub fn is_on_sale(&self) -> bool {
        self.sale_price
            .map(|sale| sale.currency == self.price.currency && sale.amount_cents < self.price.amount_cents)
            .unwrap_or(false)
    }

    /// Whole-percent discount when on sale.
    pub fn percent_off(&self) -> Option<u32> {
        self.sale_price.and_then(|sale| self.price.percent_off(&sale))
    }

    /// A product counts as a promotion when flagged or discounted.
    pub fn is_promotion(&self) -> bool {
        self.on_promotion || self.is_on_sale()
    }

    /// First image, if any.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Case-insensitive tag check.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Case-insensitive membership in a leaf or parent category.
    pub fn in_category(&self, name: &str) -> bool {
        self.category.eq_ignore_ascii_case(name)
            || self
                .parent_category
                .as_deref()
                .map(|p| p.eq_ignore_ascii_case(name))
                .unwrap_or(false)
    }

    /// Case-insensitive substring match over the searchable fields.
    pub fn matches_text(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&term)
            || self.item_number.as_str().to_lowercase().contains(&term)
            || self.manufacturer.to_lowercase().contains(&term)
            || self.category.to_lowercase().contains(&term)
            || self
                .description
                .as_deref()
                .map(|d| d.to_lowercase().contains(&term))
                .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn chair() -> Product {
        Product::new("p1", "DC-100", "Patient Chair Model 100", Money::new(1249900, Currency::USD))
            .with_category("Dental Chairs", Some("Equipment"))
            .with_manufacturer("A-dec")
    }

    #[test]
    fn test_product_creation() {
        let product = chair();
        assert_eq!(product.item_number.as_str(), "DC-100");
        assert!(product.in_stock);
        assert!(!product.is_promotion());
    }

    #[test]
    fn test_effective_price_prefers_lower_sale() {
        let product = chair().with_sale_price(Money::new(999900, Currency::USD));
        assert!(product.is_on_sale());
        assert_eq!(product.effective_price().amount_cents, 999900);
        assert_eq!(product.percent_off(), Some(20));
        assert!(product.is_promotion());
    }

    #[test]
    fn test_higher_sale_price_is_ignored() {
        let product = chair().with_sale_price(Money::new(1500000, Currency::USD));
        assert!(!product.is_on_sale());
        assert_eq!(product.effective_price().amount_cents, 1249900);
    }

    #[test]
    fn test_category_membership() {
        let product = chair();
        assert!(product.in_category("dental chairs"));
        assert!(product.in_category("Equipment"));
        assert!(!product.in_category("Imaging"));
    }

    #[test]
    fn test_text_match() {
        let product = chair().with_tag("chairs");
        assert!(product.matches_text("model 100"));
        assert!(product.matches_text("dc-1"));
        assert!(product.matches_text("a-DEC"));
        assert!(product.matches_text("  "));
        assert!(!product.matches_text("sensor"));
    }

    #[test]
    fn test_tags_dedup_case_insensitive() {
        let product = chair().with_tag("Everyday-Essentials").with_tag("everyday-essentials");
        assert_eq!(product.tags.len(), 1);
        assert!(product.has_tag("EVERYDAY-ESSENTIALS"));
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{
            "id": "p9",
            "itemNumber": "GL-1",
            "name": "Gloves",
            "price": {"amount_cents": 1299, "currency": "USD"},
            "category": "Gloves"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.in_stock);
        assert!(product.tags.is_empty());
        assert_eq!(product.parent_category, None);
    }
}
