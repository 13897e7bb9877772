//! Listing page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::Query, response::IntoResponse};
use modern_shop_core::{
    CartStore, Category, Product,
    catalog::{self, CATEGORIES},
};
use serde::Deserialize;
use tracing::instrument;

use crate::cart_cookie::CookieCartStorage;
use crate::filters;

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: i32,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub price: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name,
            description: product.description,
            icon: product.icon,
            price: product.price.display_compact(),
        }
    }
}

/// Listing page query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    /// Search term from the header search box.
    #[serde(default)]
    pub q: String,
}

/// Listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub cart_count: u64,
    pub query: String,
    /// Where "Add to Cart" should land afterwards, so a search survives it.
    pub return_to: String,
    pub categories: &'static [Category],
    pub products: Vec<ProductView>,
}

/// Path of the listing page for `query`.
fn listing_path(query: &str) -> String {
    if query.is_empty() {
        "/".to_string()
    } else {
        let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
        format!("/?q={encoded}")
    }
}

/// Display the product listing.
#[instrument(skip(storage))]
pub async fn home(
    storage: CookieCartStorage,
    Query(params): Query<ListingQuery>,
) -> impl IntoResponse {
    let cart = CartStore::new(storage).hydrate();
    let query = params.q.trim().to_string();

    let products: Vec<ProductView> = catalog::search(&query)
        .into_iter()
        .map(ProductView::from)
        .collect();
    if !query.is_empty() {
        tracing::debug!(query = %query, matches = products.len(), "Catalog search");
    }

    HomeTemplate {
        cart_count: cart.total_item_count(),
        return_to: listing_path(&query),
        query,
        categories: &CATEGORIES,
        products,
    }
}
