//! Integration tests for the contact form.
//!
//! A successful submission hands the cart to the contact sink and empties
//! it; a failed delivery leaves it in place.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use reqwest::StatusCode;
use tienda_integration_tests::{TestContext, WebhookRecorder, hx_trigger};

const VALID_FORM: [(&str, &str); 4] = [
    ("name", "Ana Pérez"),
    ("email", "Ana@Example.com"),
    ("phone", "+34 600 000 000"),
    ("message", "¿Hacen envíos a Sevilla?"),
];

#[tokio::test]
async fn test_contact_clears_cart() {
    let ctx = TestContext::start().await;
    ctx.post_form("/cart/add", &[("product_id", "2")]).await;
    assert_eq!(ctx.cart_count().await, 1);

    let resp = ctx.post_form("/contact", &VALID_FORM).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let events = hx_trigger(&resp);
    assert_eq!(events["notify"]["level"], "success");
    assert_eq!(events["contact-sent"], true);
    assert_eq!(events["cart-updated"], true);

    // The form comes back empty
    let form = resp.text().await.unwrap();
    assert!(!form.contains("Ana Pérez"));

    assert_eq!(ctx.cart_count().await, 0);
}

#[tokio::test]
async fn test_contact_without_cart() {
    let ctx = TestContext::start().await;

    let resp = ctx.post_form("/contact", &VALID_FORM).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let events = hx_trigger(&resp);
    assert_eq!(events["contact-sent"], true);
    assert!(events.get("cart-updated").is_none());
}

#[tokio::test]
async fn test_invalid_contact_keeps_values_and_cart() {
    let ctx = TestContext::start().await;
    ctx.post_form("/cart/add", &[("product_id", "1")]).await;

    let resp = ctx
        .post_form(
            "/contact",
            &[
                ("name", "   "),
                ("email", "ana@example.com"),
                ("message", "Hola"),
            ],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(hx_trigger(&resp)["notify"]["level"], "warning");

    let form = resp.text().await.unwrap();
    assert!(form.contains("ana@example.com"));
    assert!(form.contains("nombre"));

    assert_eq!(ctx.cart_count().await, 1);
}

#[tokio::test]
async fn test_webhook_receives_submission() {
    let webhook = WebhookRecorder::start(StatusCode::OK).await;
    let ctx = TestContext::with_webhook(&webhook.url).await;
    ctx.post_form("/cart/add", &[("product_id", "3")]).await;
    ctx.post_form("/cart/add", &[("product_id", "3")]).await;

    let resp = ctx.post_form("/contact", &VALID_FORM).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let received = webhook.received();
    assert_eq!(received.len(), 1);
    let record = &received[0];
    assert_eq!(record["name"], "Ana Pérez");
    assert_eq!(record["email"], "ana@example.com");
    assert_eq!(record["cart"][0]["id"], 3);
    assert_eq!(record["cart"][0]["quantity"], 2);
    let total = record["total"].as_f64().unwrap();
    assert!((total - 299.98).abs() < 1e-9);
    assert!(record["timestamp"].is_string());

    assert_eq!(ctx.cart_count().await, 0);
}

#[tokio::test]
async fn test_webhook_failure_keeps_cart() {
    let webhook = WebhookRecorder::start(StatusCode::SERVICE_UNAVAILABLE).await;
    let ctx = TestContext::with_webhook(&webhook.url).await;
    ctx.post_form("/cart/add", &[("product_id", "1")]).await;

    let resp = ctx.post_form("/contact", &VALID_FORM).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(hx_trigger(&resp)["notify"]["level"], "error");

    assert_eq!(webhook.received().len(), 1);
    assert_eq!(ctx.cart_count().await, 1);
}
