//! Integration tests for webhook receipt: signature gating, event
//! storage, and order upsert idempotency.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, TEST_SECRET};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

use shopsync_core::credentials::PlatformType;
use shopsync_core::signature::compute_hmac_base64;
use shopsync_db::models::platform::CreatePlatform;
use shopsync_db::repositories::PlatformRepo;

const USER: i64 = 1;

async fn connect_shopify(pool: &PgPool, shop_domain: &str) -> i64 {
    let platform = PlatformRepo::create(
        pool,
        USER,
        &CreatePlatform {
            platform_type: PlatformType::Shopify,
            platform_name: "Main store".to_string(),
            api_credentials: json!({ "shopDomain": shop_domain, "accessToken": "shpat_test" }),
        },
    )
    .await
    .unwrap();
    platform.id
}

async fn connect_woocommerce(pool: &PgPool, store_url: &str) -> i64 {
    let platform = PlatformRepo::create(
        pool,
        USER,
        &CreatePlatform {
            platform_type: PlatformType::Woocommerce,
            platform_name: "Woo store".to_string(),
            api_credentials: json!({
                "storeUrl": store_url,
                "consumerKey": "ck_test",
                "consumerSecret": "cs_test"
            }),
        },
    )
    .await
    .unwrap();
    platform.id
}

fn shopify_delivery(shop: &str, topic: &str, body: &str, signature: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/v1/webhooks/shopify")
        .header("content-type", "application/json")
        .header("x-shopify-shop-domain", shop)
        .header("x-shopify-topic", topic)
        .header("x-shopify-hmac-sha256", signature)
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn event_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM webhook_events")
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn order_rows(pool: &PgPool) -> Vec<(String, String)> {
    sqlx::query_as("SELECT platform_order_id, status FROM orders ORDER BY id")
        .fetch_all(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Signature gating
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn invalid_signature_is_rejected_without_storing_anything(pool: PgPool) {
    connect_shopify(&pool, "acme").await;

    let body = json!({ "id": 1001 }).to_string();
    let app = common::build_test_app(pool.clone());
    let response = app
        .oneshot(shopify_delivery("acme", "orders/create", &body, "not-the-signature"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_SIGNATURE");

    // A forged delivery must leave no trace.
    assert_eq!(event_count(&pool).await, 0);
    assert!(order_rows(&pool).await.is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn unknown_shop_domain_is_rejected(pool: PgPool) {
    let body = json!({ "id": 1 }).to_string();
    let signature = compute_hmac_base64(TEST_SECRET, body.as_bytes());

    let app = common::build_test_app(pool.clone());
    let response = app
        .oneshot(shopify_delivery("nobody", "orders/create", &body, &signature))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(event_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn missing_topic_header_is_a_bad_request(pool: PgPool) {
    connect_shopify(&pool, "acme").await;

    let body = json!({ "id": 1 }).to_string();
    let signature = compute_hmac_base64(TEST_SECRET, body.as_bytes());
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/webhooks/shopify")
        .header("x-shopify-shop-domain", "acme")
        .header("x-shopify-hmac-sha256", signature)
        .body(Body::from(body))
        .unwrap();

    let app = common::build_test_app(pool);
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Order deliveries
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn order_webhook_stores_event_and_upserts_order(pool: PgPool) {
    connect_shopify(&pool, "acme").await;

    let body = json!({
        "id": 1001,
        "order_number": 42,
        "financial_status": "paid",
        "total_price": "19.99",
        "currency": "EUR",
        "email": "buyer@example.com",
        "updated_at": "2026-08-01T10:00:00Z",
        "line_items": [{ "sku": "ABC", "quantity": 1 }]
    })
    .to_string();
    let signature = compute_hmac_base64(TEST_SECRET, body.as_bytes());

    let app = common::build_test_app(pool.clone());
    let response = app
        .oneshot(shopify_delivery("acme", "orders/create", &body, &signature))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["event_id"].is_i64());

    // Event stored and marked processed.
    let processed: bool = sqlx::query_scalar("SELECT processed FROM webhook_events LIMIT 1")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(processed);

    assert_eq!(
        order_rows(&pool).await,
        vec![("1001".to_string(), "paid".to_string())]
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn redelivered_order_webhook_does_not_duplicate_the_order(pool: PgPool) {
    connect_shopify(&pool, "acme").await;

    let body = json!({
        "id": 1001,
        "order_number": 42,
        "financial_status": "paid",
        "total_price": "19.99",
        "updated_at": "2026-08-01T10:00:00Z"
    })
    .to_string();
    let signature = compute_hmac_base64(TEST_SECRET, body.as_bytes());

    for _ in 0..2 {
        let app = common::build_test_app(pool.clone());
        let response = app
            .oneshot(shopify_delivery("acme", "orders/create", &body, &signature))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    // Each delivery is stored for audit, but the order row is unique per
    // (platform, platform_order_id).
    assert_eq!(event_count(&pool).await, 2);
    assert_eq!(order_rows(&pool).await.len(), 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn stale_order_delivery_does_not_overwrite_newer_state(pool: PgPool) {
    connect_shopify(&pool, "acme").await;

    let newer = json!({
        "id": 1001,
        "financial_status": "refunded",
        "total_price": "0.00",
        "updated_at": "2026-08-02T12:00:00Z"
    })
    .to_string();
    let older = json!({
        "id": 1001,
        "financial_status": "paid",
        "total_price": "19.99",
        "updated_at": "2026-08-01T10:00:00Z"
    })
    .to_string();

    for body in [&newer, &older] {
        let signature = compute_hmac_base64(TEST_SECRET, body.as_bytes());
        let app = common::build_test_app(pool.clone());
        let response = app
            .oneshot(shopify_delivery("acme", "orders/updated", body, &signature))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    // The out-of-order redelivery is accepted (stored, acked) but the
    // newer snapshot wins.
    assert_eq!(
        order_rows(&pool).await,
        vec![("1001".to_string(), "refunded".to_string())]
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn woocommerce_order_webhook_resolves_platform_by_store_url(pool: PgPool) {
    connect_woocommerce(&pool, "https://shop.example.com").await;

    let body = json!({
        "id": 77,
        "number": "77",
        "status": "processing",
        "total": "45.50",
        "currency": "USD",
        "date_modified": "2026-08-01T09:30:00"
    })
    .to_string();
    let signature = compute_hmac_base64(TEST_SECRET, body.as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/webhooks/woocommerce")
        .header("content-type", "application/json")
        // Trailing slash, as WooCommerce sends it.
        .header("x-wc-webhook-source", "https://shop.example.com/")
        .header("x-wc-webhook-event", "created")
        .header("x-wc-webhook-resource", "order")
        .header("x-wc-webhook-signature", signature)
        .body(Body::from(body))
        .unwrap();

    let app = common::build_test_app(pool.clone());
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        order_rows(&pool).await,
        vec![("77".to_string(), "processing".to_string())]
    );
}

// ---------------------------------------------------------------------------
// Unhandled topics
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn unhandled_topic_is_stored_and_acknowledged(pool: PgPool) {
    connect_shopify(&pool, "acme").await;

    let body = json!({ "id": 5 }).to_string();
    let signature = compute_hmac_base64(TEST_SECRET, body.as_bytes());

    let app = common::build_test_app(pool.clone());
    let response = app
        .oneshot(shopify_delivery("acme", "app/uninstalled", &body, &signature))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(event_count(&pool).await, 1);
    assert!(order_rows(&pool).await.is_empty());
}
