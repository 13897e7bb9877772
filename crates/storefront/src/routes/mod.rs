//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Product listing (optional ?q= search)
//! GET  /health                 - Health check
//!
//! # Cart (plain HTML forms, Post/Redirect/Get)
//! GET  /cart                   - Cart page with order summary
//! POST /cart/add               - Add one of a product, redirect back
//! POST /cart/update            - Change quantity by delta, redirect to /cart
//! POST /cart/remove            - Remove a product, redirect to /cart
//!
//! # Checkout
//! POST /checkout               - No checkout backend; redirects to /cart
//!
//! # API
//! GET  /api/cart               - Cart contents and totals as JSON
//!
//! # Assets
//! GET  /static/*               - Static files
//! GET  /assets/*               - Fingerprinted stylesheet (immutable)
//! ```

pub mod api;
pub mod cart;
pub mod home;

use axum::{
    Router,
    http::{HeaderValue, Request, Uri, header::CACHE_CONTROL},
    middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};

use crate::error::AppError;
use crate::middleware::{request_id_middleware, security_headers_middleware};
use crate::state::AppState;

/// Cache policy for content-addressed assets.
const IMMUTABLE_CACHE: &str = "public, max-age=31536000, immutable";

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
}

/// Create the JSON API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/cart", get(api::cart_summary))
}

/// Create all page routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Listing page
        .route("/", get(home::home))
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout dead end
        .route("/checkout", post(cart::checkout))
        // JSON API
        .nest("/api", api_routes())
        .route("/health", get(health))
}

/// Build the complete application: routes, static assets and middleware.
pub fn app(state: AppState) -> Router {
    let static_dir = state.config().static_dir.clone();
    let assets = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(IMMUTABLE_CACHE),
        ))
        .service(ServeDir::new(static_dir.join("css/derived")));

    Router::new()
        .merge(routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .nest_service("/assets", assets)
        .fallback(not_found)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Fallback for unknown routes.
async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
