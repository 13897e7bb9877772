//! Integration tests for the listing and cart pages.

use modern_shop_core::catalog;
use modern_shop_integration_tests::TestServer;
use reqwest::StatusCode;

#[tokio::test]
async fn test_listing_renders_whole_catalog() {
    let server = TestServer::start().await;

    let resp = server.get("/", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("body");

    assert!(body.contains("Shop the Latest Products"));
    assert!(body.contains("Shop by Category"));
    assert_eq!(catalog::products().len(), 8);
    for product in catalog::products() {
        assert!(body.contains(product.name), "listing is missing {}", product.name);
        assert!(
            body.contains(&product.price.display_compact()),
            "listing is missing the price of {}",
            product.name
        );
    }
    assert!(body.contains("Laptop Backpack"));
    assert!(body.contains("Phone Stand"));
    assert!(body.contains("action=\"/cart/add\""));
    // empty cart: no badge
    assert!(!body.contains("cart-count"));
}

#[tokio::test]
async fn test_listing_badge_counts_stored_quantities() {
    let server = TestServer::start().await;

    let body = server
        .get("/", Some(r#"{"1":2,"4":1}"#))
        .await
        .text()
        .await
        .expect("body");

    assert!(body.contains(r#"<span class="cart-count">3</span>"#));
}

#[tokio::test]
async fn test_listing_search_filters_products() {
    let server = TestServer::start().await;

    let body = server.get("/?q=lamp", None).await.text().await.expect("body");

    assert!(body.contains("Desk Lamp"));
    assert!(!body.contains("Premium Headphones"));
    // add-to-cart returns to the filtered listing
    assert!(body.contains(r#"name="return_to" value="/?q=lamp""#));
}

#[tokio::test]
async fn test_listing_search_without_matches() {
    let server = TestServer::start().await;

    let resp = server.get("/?q=teapot", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("body");

    assert!(body.contains("No products match"));
    assert!(!body.contains("action=\"/cart/add\""));
}

#[tokio::test]
async fn test_cart_page_empty_state() {
    let server = TestServer::start().await;

    let body = server.get("/cart", None).await.text().await.expect("body");

    assert!(body.contains("Your cart is empty"));
    assert!(body.contains("Continue Shopping"));
    assert!(!body.contains("Order Summary"));
}

#[tokio::test]
async fn test_cart_page_reference_totals() {
    let server = TestServer::start().await;

    let body = server
        .get("/cart", Some(r#"{"1":2,"4":1}"#))
        .await
        .text()
        .await
        .expect("body");

    assert!(body.contains("Premium Headphones"));
    assert!(body.contains("Wireless Mouse"));
    assert!(body.contains("$598.00"));
    assert!(body.contains("$647.00"));
    assert!(body.contains("$10.00"));
    assert!(body.contains("$51.76"));
    assert!(body.contains("$708.76"));
    assert!(body.contains("Proceed to Checkout"));
}

#[tokio::test]
async fn test_cart_page_survives_corrupt_cookie() {
    let server = TestServer::start().await;

    let resp = server.get("/cart", Some("not json")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.expect("body").contains("Your cart is empty"));
}

#[tokio::test]
async fn test_cart_page_skips_unknown_products() {
    let server = TestServer::start().await;

    let body = server
        .get("/cart", Some(r#"{"999":1}"#))
        .await
        .text()
        .await
        .expect("body");

    // nothing to list, but the stored entry still drives the badge
    assert!(body.contains("Your cart is empty"));
    assert!(body.contains(r#"<span class="cart-count">1</span>"#));
}

#[tokio::test]
async fn test_pages_link_stylesheet_and_footer() {
    let server = TestServer::start().await;

    let body = server.get("/", None).await.text().await.expect("body");

    assert!(body.contains("rel=\"stylesheet\""));
    assert!(body.contains("ModernShop. All rights reserved."));
    assert!(!body.contains("<script"));
}
