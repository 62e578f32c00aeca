//! Cart and cart item types.

use crate::cart::{CartTotals, LineTotal, TaxTreatment};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::{ItemNumber, ProductId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per cart item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// A shopping cart.
///
/// Items are keyed by product id: adding a product that is already in the
/// cart raises its quantity instead of adding a second line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Items in the cart, in the order they were first added.
    pub items: Vec<CartItem>,
    /// Cart currency.
    pub currency: Currency,
}

impl Cart {
    /// Create an empty USD cart.
    pub fn new() -> Self {
        Self::with_currency(Currency::USD)
    }

    pub fn with_currency(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            currency,
        }
    }

    /// Add an item to the cart.
    ///
    /// Returns an error if:
    /// - Quantity is not positive
    /// - The item is priced in another currency
    /// - The resulting quantity would exceed MAX_QUANTITY_PER_ITEM
    pub fn add_item(&mut self, item: CartItem) -> Result<(), CommerceError> {
        if item.quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(item.quantity));
        }
        if item.price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: item.price.currency.code().to_string(),
            });
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            let new_quantity = existing
                .quantity
                .checked_add(item.quantity)
                .ok_or(CommerceError::Overflow)?;
            if new_quantity > MAX_QUANTITY_PER_ITEM {
                return Err(CommerceError::QuantityExceedsLimit(
                    new_quantity,
                    MAX_QUANTITY_PER_ITEM,
                ));
            }
            existing.quantity = new_quantity;
            tracing::debug!(product_id = %existing.id, quantity = new_quantity, "cart quantity raised");
            return Ok(());
        }

        if item.quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                item.quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        tracing::debug!(product_id = %item.id, quantity = item.quantity, "cart item added");
        self.items.push(item);
        Ok(())
    }

    /// Add `quantity` units of a catalog product at its effective price.
    pub fn add_product(&mut self, product: &Product, quantity: i64) -> Result<(), CommerceError> {
        self.add_item(CartItem::from_product(product, quantity))
    }

    /// Set an item's quantity.
    ///
    /// A quantity of zero or less removes the item. Returns whether an item
    /// was affected.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) -> Result<bool, CommerceError> {
        if quantity <= 0 {
            return Ok(self.remove_item(id));
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        match self.items.iter_mut().find(|i| &i.id == id) {
            Some(item) => {
                item.quantity = quantity;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove an item from the cart.
    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != id);
        let removed = self.items.len() < len_before;
        if removed {
            tracing::debug!(product_id = %id, "cart item removed");
        }
        removed
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get_item(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Sum of price x quantity.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        self.items.iter().try_fold(Money::zero(self.currency), |acc, item| {
            let line = item.line_total()?;
            acc.try_add(&line).ok_or(CommerceError::Overflow)
        })
    }

    /// Shipping is free on every order.
    pub fn shipping(&self) -> Money {
        Money::zero(self.currency)
    }

    /// Subtotal plus shipping. Tax is added by the hosted checkout.
    pub fn total(&self) -> Result<Money, CommerceError> {
        self.subtotal()?
            .try_add(&self.shipping())
            .ok_or(CommerceError::Overflow)
    }

    /// Full totals breakdown.
    pub fn totals(&self) -> Result<CartTotals, CommerceError> {
        let lines = self
            .items
            .iter()
            .map(|item| {
                Ok(LineTotal {
                    product_id: item.id.clone(),
                    unit_price: item.price,
                    quantity: item.quantity,
                    total: item.line_total()?,
                })
            })
            .collect::<Result<Vec<_>, CommerceError>>()?;

        Ok(CartTotals {
            subtotal: self.subtotal()?,
            shipping: self.shipping(),
            tax: TaxTreatment::CalculatedAtCheckout,
            total: self.total()?,
            item_count: self.item_count(),
            lines,
        })
    }

    /// Serialize for persistence between visits.
    pub fn to_json(&self) -> Result<String, CommerceError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restore a persisted cart.
    ///
    /// Items with a non-positive quantity are dropped, repeated ids are folded
    /// into one line, and quantities are capped at MAX_QUANTITY_PER_ITEM.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let stored: Cart = serde_json::from_str(json)?;
        let mut cart = Cart::with_currency(stored.currency);
        for mut item in stored.items {
            if item.quantity <= 0 || item.price.currency != cart.currency {
                tracing::warn!(product_id = %item.id, "dropping invalid stored cart item");
                continue;
            }
            match cart.items.iter_mut().find(|i| i.id == item.id) {
                Some(existing) => {
                    existing.quantity = existing
                        .quantity
                        .saturating_add(item.quantity)
                        .min(MAX_QUANTITY_PER_ITEM);
                }
                None => {
                    item.quantity = item.quantity.min(MAX_QUANTITY_PER_ITEM);
                    cart.items.push(item);
                }
            }
        }
        Ok(cart)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// An item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product id; unique within a cart.
    pub id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Quantity, at least 1.
    pub quantity: i64,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default = "empty_item_number")]
    pub item_number: ItemNumber,
    #[serde(default)]
    pub image: Option<String>,
    /// Accessory offered alongside a main product (e.g. a chair's stool).
    #[serde(default)]
    pub is_add_on: bool,
}

fn empty_item_number() -> ItemNumber {
    ItemNumber::new("")
}

impl CartItem {
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Money,
        quantity: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            quantity,
            manufacturer: String::new(),
            item_number: empty_item_number(),
            image: None,
            is_add_on: false,
        }
    }

    /// Snapshot a catalog product at its effective price.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.effective_price(),
            quantity,
            manufacturer: product.manufacturer.clone(),
            item_number: product.item_number.clone(),
            image: product.primary_image().map(str::to_string),
            is_add_on: false,
        }
    }

    pub fn as_add_on(mut self) -> Self {
        self.is_add_on = true;
        self
    }

    /// unit price x quantity
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, cents: i64, quantity: i64) -> CartItem {
        CartItem::new(id, format!("Item {}", id), Money::new(cents, Currency::USD), quantity)
    }

    #[test]
    fn test_subtotal_of_two_items() {
        let mut cart = Cart::new();
        cart.add_item(item("a", 1000, 2)).unwrap();
        cart.add_item(item("b", 500, 1)).unwrap();

        assert_eq!(cart.subtotal().unwrap().amount_cents, 2500);
        assert_eq!(cart.total().unwrap().amount_cents, 2500);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let mut cart = Cart::new();
        cart.add_item(item("a", 1000, 1)).unwrap();
        cart.add_item(item("a", 1000, 2)).unwrap();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new();
        cart.add_item(item("a", 1000, 1)).unwrap();

        assert!(cart.update_quantity(&ProductId::new("a"), 5).unwrap());
        assert_eq!(cart.item_count(), 5);
        assert!(!cart.update_quantity(&ProductId::new("missing"), 5).unwrap());
    }

    #[test]
    fn test_update_quantity_to_zero_or_negative_removes() {
        let mut cart = Cart::new();
        cart.add_item(item("a", 1000, 1)).unwrap();
        cart.add_item(item("b", 1000, 1)).unwrap();

        assert!(cart.update_quantity(&ProductId::new("a"), 0).unwrap());
        assert!(cart.update_quantity(&ProductId::new("b"), -3).unwrap());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add_item(item("a", 1000, 1)).unwrap();

        assert!(cart.remove_item(&ProductId::new("a")));
        assert!(!cart.remove_item(&ProductId::new("a")));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear_cart() {
        let mut cart = Cart::new();
        cart.add_item(item("a", 1000, 2)).unwrap();
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.subtotal().unwrap(), Money::zero(Currency::USD));
    }

    #[test]
    fn test_invalid_quantity() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.add_item(item("a", 1000, 0)),
            Err(CommerceError::InvalidQuantity(0))
        );
    }

    #[test]
    fn test_quantity_limit() {
        let mut cart = Cart::new();
        assert!(cart.add_item(item("a", 1000, MAX_QUANTITY_PER_ITEM + 1)).is_err());

        cart.add_item(item("b", 1000, MAX_QUANTITY_PER_ITEM)).unwrap();
        assert!(cart.add_item(item("b", 1000, 1)).is_err());
        assert!(cart.update_quantity(&ProductId::new("b"), MAX_QUANTITY_PER_ITEM + 1).is_err());
    }

    #[test]
    fn test_currency_mismatch_rejected() {
        let mut cart = Cart::new();
        let eur = CartItem::new("a", "Euro item", Money::new(100, Currency::EUR), 1);
        assert!(matches!(
            cart.add_item(eur),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_totals_defer_tax() {
        let mut cart = Cart::new();
        cart.add_item(item("a", 1999, 3)).unwrap();
        let totals = cart.totals().unwrap();

        assert_eq!(totals.subtotal.amount_cents, 5997);
        assert!(totals.has_free_shipping());
        assert_eq!(totals.tax, TaxTreatment::CalculatedAtCheckout);
        assert_eq!(totals.lines.len(), 1);
        assert_eq!(totals.lines[0].total.amount_cents, 5997);
    }

    #[test]
    fn test_add_product_uses_sale_price() {
        let product = Product::new("p1", "SN-1", "Sensor", Money::new(800000, Currency::USD))
            .with_sale_price(Money::new(650000, Currency::USD))
            .with_image("https://cdn.example.com/sn-1.jpg");
        let mut cart = Cart::new();
        cart.add_product(&product, 1).unwrap();

        let line = cart.get_item(&ProductId::new("p1")).unwrap();
        assert_eq!(line.price.amount_cents, 650000);
        assert_eq!(line.item_number.as_str(), "SN-1");
        assert_eq!(line.image.as_deref(), Some("https://cdn.example.com/sn-1.jpg"));
    }

    #[test]
    fn test_json_round_trip_repairs_invalid_items() {
        let json = r#"{
            "items": [
                {"id": "a", "name": "A", "price": {"amount_cents": 100, "currency": "USD"}, "quantity": 2},
                {"id": "a", "name": "A", "price": {"amount_cents": 100, "currency": "USD"}, "quantity": 3},
                {"id": "b", "name": "B", "price": {"amount_cents": 100, "currency": "USD"}, "quantity": 0}
            ],
            "currency": "USD"
        }"#;
        let cart = Cart::from_json(json).unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.item_count(), 5);

        let again = Cart::from_json(&cart.to_json().unwrap()).unwrap();
        assert_eq!(again, cart);
    }
}
