//! Line items and order totals derived from a cart.
//!
//! Nothing here is stored: line items and the summary are recomputed from the
//! cart state and the catalog on every render.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::cart::CartState;
use crate::catalog::{self, Product};
use crate::types::Price;

/// Flat shipping charge applied to any non-empty order.
pub const FLAT_SHIPPING_UNITS: i64 = 10;

/// Sales tax rate, 8%.
#[must_use]
pub fn tax_rate() -> Decimal {
    Decimal::new(8, 2)
}

/// A catalog product paired with its cart quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineItem<'a> {
    pub product: &'a Product,
    pub quantity: u32,
}

impl CartLineItem<'_> {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price * self.quantity
    }
}

/// Join cart entries against `products`, in cart (product id) order.
///
/// Entries whose id isn't in `products` are dropped.
#[must_use]
pub fn line_items<'a>(state: &CartState, products: &'a [Product]) -> Vec<CartLineItem<'a>> {
    state
        .iter()
        .filter_map(|(id, quantity)| {
            products
                .iter()
                .find(|product| product.id == id)
                .map(|product| CartLineItem { product, quantity })
        })
        .collect()
}

/// Join cart entries against the built-in catalog.
#[must_use]
pub fn catalog_line_items(state: &CartState) -> Vec<CartLineItem<'static>> {
    line_items(state, catalog::products())
}

/// Order totals for a set of line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct OrderSummary {
    pub subtotal: Price,
    pub shipping: Price,
    pub tax: Price,
    pub total: Price,
}

impl OrderSummary {
    /// Compute totals. Shipping is waived only when the subtotal is zero.
    #[must_use]
    pub fn from_line_items(items: &[CartLineItem<'_>]) -> Self {
        let subtotal: Price = items.iter().map(CartLineItem::line_total).sum();
        let shipping = if subtotal > Price::ZERO {
            Price::from_whole(FLAT_SHIPPING_UNITS)
        } else {
            Price::ZERO
        };
        let tax = subtotal.scaled_by(tax_rate());

        Self {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }
}
