//! JSON API handlers.

use axum::Json;
use modern_shop_core::{CartStore, OrderSummary, ProductId, order::catalog_line_items};
use serde::Serialize;
use tracing::instrument;

use crate::cart_cookie::CookieCartStorage;

/// One cart line in the JSON summary.
#[derive(Debug, Serialize)]
pub struct LineItemResponse {
    pub product_id: ProductId,
    pub name: &'static str,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

/// Cart contents and totals. Amounts are two-decimal strings.
#[derive(Debug, Serialize)]
pub struct CartSummaryResponse {
    pub items: Vec<LineItemResponse>,
    pub item_count: u64,
    pub subtotal: String,
    pub shipping: String,
    pub tax: String,
    pub total: String,
}

/// Return the visitor's cart joined with the catalog, plus order totals.
#[instrument(skip(storage))]
pub async fn cart_summary(storage: CookieCartStorage) -> Json<CartSummaryResponse> {
    let cart = CartStore::new(storage).hydrate();
    let lines = catalog_line_items(&cart);
    let summary = OrderSummary::from_line_items(&lines);

    Json(CartSummaryResponse {
        items: lines
            .iter()
            .map(|line| LineItemResponse {
                product_id: line.product.id,
                name: line.product.name,
                quantity: line.quantity,
                unit_price: line.product.price.to_fixed(),
                line_total: line.line_total().to_fixed(),
            })
            .collect(),
        item_count: cart.total_item_count(),
        subtotal: summary.subtotal.to_fixed(),
        shipping: summary.shipping.to_fixed(),
        tax: summary.tax.to_fixed(),
        total: summary.total.to_fixed(),
    })
}
