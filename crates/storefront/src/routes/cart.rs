//! Cart route handlers.
//!
//! The cart lives in the visitor's `cart` cookie. Every handler hydrates it
//! once from the request, and mutating handlers write the full new cart back
//! with `Set-Cookie` before redirecting (Post/Redirect/Get).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    response::{IntoResponse, Redirect, Response},
};
use modern_shop_core::{
    CartState, CartStore, OrderSummary, ProductId, catalog, order::catalog_line_items,
};
use serde::Deserialize;
use tracing::instrument;

use crate::cart_cookie::CookieCartStorage;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: i32,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Order totals display data for templates.
#[derive(Clone)]
pub struct SummaryView {
    pub subtotal: String,
    pub shipping: String,
    pub tax: String,
    pub total: String,
}

impl From<&OrderSummary> for SummaryView {
    fn from(summary: &OrderSummary) -> Self {
        Self {
            subtotal: summary.subtotal.display(),
            shipping: summary.shipping.display(),
            tax: summary.tax.display(),
            total: summary.total.display(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub summary: SummaryView,
    pub item_count: u64,
}

impl CartView {
    /// Join the cart against the catalog and compute totals.
    ///
    /// Entries for products no longer in the catalog are left out.
    #[must_use]
    pub fn from_state(state: &CartState) -> Self {
        let lines = catalog_line_items(state);
        let summary = OrderSummary::from_line_items(&lines);

        Self {
            items: lines
                .iter()
                .map(|line| CartItemView {
                    id: line.product.id.as_i32(),
                    name: line.product.name,
                    description: line.product.description,
                    icon: line.product.icon,
                    quantity: line.quantity,
                    price: line.product.price.display_compact(),
                    line_price: line.line_total().display(),
                })
                .collect(),
            summary: SummaryView::from(&summary),
            item_count: state.total_item_count(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
    /// Local path to return to; defaults to the listing page.
    pub return_to: Option<String>,
}

/// Update quantity form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    pub delta: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: ProductId,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub cart_count: u64,
    pub query: String,
}

/// Reject ids that can't belong to any product.
fn require_valid_id(id: ProductId) -> Result<ProductId> {
    if id.as_i32() > 0 {
        Ok(id)
    } else {
        Err(AppError::BadRequest(format!(
            "product id must be positive, got {id}"
        )))
    }
}

/// Accept only same-site relative paths as redirect targets.
fn safe_return_path(return_to: Option<&str>) -> &str {
    match return_to {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path
        }
        _ => "/",
    }
}

/// Display cart page.
#[instrument(skip(storage))]
pub async fn show(storage: CookieCartStorage) -> impl IntoResponse {
    let cart = CartStore::new(storage).hydrate();

    CartShowTemplate {
        cart_count: cart.total_item_count(),
        cart: CartView::from_state(&cart),
        query: String::new(),
    }
}

/// Add one of a catalog product, then go back where the shopper was.
#[instrument(skip(storage))]
pub async fn add(storage: CookieCartStorage, Form(form): Form<AddToCartForm>) -> Result<Response> {
    let id = require_valid_id(form.product_id)?;
    let product =
        catalog::find(id).ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let mut store = CartStore::new(storage);
    let cart = store.hydrate();
    let cart = store.increment(&cart, product.id);

    tracing::info!(
        product_id = %product.id,
        quantity = cart.quantity(product.id),
        item_count = cart.total_item_count(),
        "Added to cart"
    );
    add_breadcrumb("cart", "Added to cart", &[("product_id", &id.to_string())]);

    let target = safe_return_path(form.return_to.as_deref());
    Ok(store.storage().apply(Redirect::to(target)))
}

/// Change a line's quantity; reaching zero removes it.
#[instrument(skip(storage))]
pub async fn update(
    storage: CookieCartStorage,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let id = require_valid_id(form.product_id)?;

    let mut store = CartStore::new(storage);
    let cart = store.hydrate();
    let cart = store.adjust(&cart, id, form.delta);

    tracing::info!(
        product_id = %id,
        delta = form.delta,
        quantity = cart.quantity(id),
        "Updated cart quantity"
    );
    add_breadcrumb(
        "cart",
        "Updated quantity",
        &[("product_id", &id.to_string()), ("delta", &form.delta.to_string())],
    );

    Ok(store.storage().apply(Redirect::to("/cart")))
}

/// Remove a line regardless of its quantity.
#[instrument(skip(storage))]
pub async fn remove(
    storage: CookieCartStorage,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let id = require_valid_id(form.product_id)?;

    let mut store = CartStore::new(storage);
    let cart = store.hydrate();
    let cart = store.remove(&cart, id);

    tracing::info!(product_id = %id, item_count = cart.total_item_count(), "Removed from cart");
    add_breadcrumb("cart", "Removed from cart", &[("product_id", &id.to_string())]);

    Ok(store.storage().apply(Redirect::to("/cart")))
}

/// Checkout is not wired to any backend: note the attempt and return to the
/// cart unchanged.
#[instrument(skip(storage))]
pub async fn checkout(storage: CookieCartStorage) -> Redirect {
    let cart = CartStore::new(storage).hydrate();
    tracing::info!(
        item_count = cart.total_item_count(),
        "Checkout requested; no checkout backend configured"
    );
    Redirect::to("/cart")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cart(entries: &[(i32, u32)]) -> CartState {
        entries
            .iter()
            .map(|(n, q)| (ProductId::new(*n), *q))
            .collect()
    }

    #[test]
    fn test_cart_view_reference_totals() {
        let view = CartView::from_state(&cart(&[(1, 2), (4, 1)]));

        assert_eq!(view.item_count, 3);
        assert_eq!(view.items.len(), 2);
        assert_eq!(view.summary.subtotal, "$647.00");
        assert_eq!(view.summary.shipping, "$10.00");
        assert_eq!(view.summary.tax, "$51.76");
        assert_eq!(view.summary.total, "$708.76");

        let first = view.items.first().map(|item| (item.name, item.line_price.as_str()));
        assert_eq!(first, Some(("Premium Headphones", "$598.00")));
    }

    #[test]
    fn test_cart_view_drops_unknown_products() {
        let view = CartView::from_state(&cart(&[(999, 3)]));
        assert!(view.items.is_empty());
        assert_eq!(view.summary.total, "$0.00");
        assert_eq!(view.summary.shipping, "$0.00");
        // badge still counts what's stored
        assert_eq!(view.item_count, 3);
    }

    #[test]
    fn test_safe_return_path() {
        assert_eq!(safe_return_path(None), "/");
        assert_eq!(safe_return_path(Some("/?q=lamp")), "/?q=lamp");
        assert_eq!(safe_return_path(Some("/cart")), "/cart");
        assert_eq!(safe_return_path(Some("https://evil.example")), "/");
        assert_eq!(safe_return_path(Some("//evil.example")), "/");
        assert_eq!(safe_return_path(Some("/\\evil.example")), "/");
    }

    #[test]
    fn test_require_valid_id() {
        assert!(require_valid_id(ProductId::new(1)).is_ok());
        assert!(matches!(
            require_valid_id(ProductId::new(0)),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            require_valid_id(ProductId::new(-4)),
            Err(AppError::BadRequest(_))
        ));
    }
}
