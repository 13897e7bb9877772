//! Integration tests for ModernShop.
//!
//! Each test boots the storefront on an ephemeral local port and talks to it
//! over HTTP, the same way a browser would. No external services are needed.
//!
//! ```bash
//! cargo test -p modern-shop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_pages` - Listing, search and cart page rendering
//! - `cart_flow` - Add/update/remove/checkout round trips through the cookie
//! - `cart_api` - JSON cart summary
//! - `middleware` - Health, request IDs and security headers

#![allow(clippy::missing_panics_doc)]

use cookie::Cookie;
use modern_shop_storefront::{
    cart_cookie::CART_COOKIE_NAME, config::StorefrontConfig, routes, state::AppState,
};
use reqwest::{Client, Response, header};

/// A storefront running in the background for the duration of a test.
pub struct TestServer {
    pub base_url: String,
    pub client: Client,
}

impl TestServer {
    /// Start a storefront with default configuration.
    pub async fn start() -> Self {
        let config = StorefrontConfig::from_lookup(|_| None).expect("default config is valid");
        Self::start_with(config).await
    }

    /// Start a storefront with the given configuration.
    pub async fn start_with(config: StorefrontConfig) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("listener has an address");
        let app = routes::app(AppState::new(config));

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("test server error");
        });

        // Redirects are asserted on, not followed
        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: format!("http://{addr}"),
            client,
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET `path`, optionally sending a cart cookie holding `cart_json`.
    pub async fn get(&self, path: &str, cart_json: Option<&str>) -> Response {
        let mut request = self.client.get(self.url(path));
        if let Some(json) = cart_json {
            request = request.header(header::COOKIE, cart_cookie_header(json));
        }
        request.send().await.expect("GET request failed")
    }

    /// POST a form to `path`, optionally sending a cart cookie holding `cart_json`.
    pub async fn post_form(
        &self,
        path: &str,
        form: &[(&str, &str)],
        cart_json: Option<&str>,
    ) -> Response {
        let mut request = self.client.post(self.url(path)).form(form);
        if let Some(json) = cart_json {
            request = request.header(header::COOKIE, cart_cookie_header(json));
        }
        request.send().await.expect("POST request failed")
    }
}

/// `Cookie` header value carrying `json` in the cart cookie.
#[must_use]
pub fn cart_cookie_header(json: &str) -> String {
    Cookie::new(CART_COOKIE_NAME, json.to_string()).encoded().to_string()
}

/// The cart cookie a response set, if any.
#[must_use]
pub fn set_cart_cookie(response: &Response) -> Option<Cookie<'static>> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| Cookie::parse_encoded(value.to_string()).ok())
        .find(|cookie| cookie.name() == CART_COOKIE_NAME)
}

/// Decoded JSON stored in the cart cookie a response set.
#[must_use]
pub fn set_cart_json(response: &Response) -> Option<serde_json::Value> {
    let cookie = set_cart_cookie(response)?;
    serde_json::from_str(cookie.value()).ok()
}

/// `Location` header of a redirect.
#[must_use]
pub fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}
