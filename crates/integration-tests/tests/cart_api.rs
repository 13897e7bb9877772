//! Integration tests for the JSON cart summary.

use modern_shop_integration_tests::TestServer;
use reqwest::StatusCode;
use serde_json::{Value, json};

async fn summary(server: &TestServer, cart_json: Option<&str>) -> Value {
    let resp = server.get("/api/cart", cart_json).await;
    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.expect("JSON body")
}

#[tokio::test]
async fn test_summary_reference_order() {
    let server = TestServer::start().await;

    let body = summary(&server, Some(r#"{"1":2,"4":1}"#)).await;

    assert_eq!(body["item_count"], 3);
    assert_eq!(body["subtotal"], "647.00");
    assert_eq!(body["shipping"], "10.00");
    assert_eq!(body["tax"], "51.76");
    assert_eq!(body["total"], "708.76");
    assert_eq!(
        body["items"][0],
        json!({
            "product_id": 1,
            "name": "Premium Headphones",
            "quantity": 2,
            "unit_price": "299.00",
            "line_total": "598.00",
        })
    );
}

#[tokio::test]
async fn test_summary_empty_cart() {
    let server = TestServer::start().await;

    let body = summary(&server, None).await;

    assert_eq!(body["items"], json!([]));
    assert_eq!(body["item_count"], 0);
    assert_eq!(body["shipping"], "0.00");
    assert_eq!(body["total"], "0.00");
}

#[tokio::test]
async fn test_summary_ignores_unknown_products() {
    let server = TestServer::start().await;

    let body = summary(&server, Some(r#"{"999":1}"#)).await;

    assert_eq!(body["items"], json!([]));
    assert_eq!(body["item_count"], 1);
    assert_eq!(body["subtotal"], "0.00");
    assert_eq!(body["shipping"], "0.00");
}

#[tokio::test]
async fn test_summary_corrupt_cookie_is_empty_cart() {
    let server = TestServer::start().await;

    let body = summary(&server, Some("[1,2,3]")).await;

    assert_eq!(body["item_count"], 0);
    assert_eq!(body["total"], "0.00");
}
