//! Cart totals.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// How tax appears on the cart page.
///
/// Tax is never computed in the storefront; the hosted checkout computes it
/// from the shipping address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TaxTreatment {
    #[default]
    CalculatedAtCheckout,
}

impl TaxTreatment {
    pub fn label(&self) -> &'static str {
        match self {
            TaxTreatment::CalculatedAtCheckout => "Calculated at checkout",
        }
    }
}

/// Totals breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    /// Sum of price x quantity over all items.
    pub subtotal: Money,
    /// Shipping cost (always free).
    pub shipping: Money,
    /// Tax is deferred to the hosted checkout.
    pub tax: TaxTreatment,
    /// Subtotal plus shipping.
    pub total: Money,
    /// Sum of quantities.
    pub item_count: i64,
    /// Per-item breakdown, in cart order.
    pub lines: Vec<LineTotal>,
}

impl CartTotals {
    pub fn has_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}

/// Totals for a single cart item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineTotal {
    pub product_id: ProductId,
    pub unit_price: Money,
    pub quantity: i64,
    /// unit_price x quantity
    pub total: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_free_shipping_flag() {
        let totals = CartTotals {
            subtotal: Money::new(2500, Currency::USD),
            shipping: Money::zero(Currency::USD),
            tax: TaxTreatment::CalculatedAtCheckout,
            total: Money::new(2500, Currency::USD),
            item_count: 3,
            lines: vec![],
        };
        assert!(totals.has_free_shipping());
        assert_eq!(totals.tax.label(), "Calculated at checkout");
    }
}
