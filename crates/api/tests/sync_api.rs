//! Integration tests for the `/sync` trigger and history endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, error_code, request_as};
use serde_json::json;
use sqlx::PgPool;

use shopsync_core::credentials::PlatformType;
use shopsync_db::models::platform::CreatePlatform;
use shopsync_db::repositories::PlatformRepo;

const USER: i64 = 1;

async fn connect_shopify(pool: &PgPool, user_id: i64, name: &str) -> i64 {
    let platform = PlatformRepo::create(
        pool,
        user_id,
        &CreatePlatform {
            platform_type: PlatformType::Shopify,
            platform_name: name.to_string(),
            api_credentials: json!({ "shopDomain": name, "accessToken": "shpat_test" }),
        },
    )
    .await
    .unwrap();
    platform.id
}

async fn ledger_count(pool: &PgPool, user_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM sync_logs WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn sync_requires_user_identity(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::get(app, "/api/v1/sync/history").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// SyncAll preconditions (fewer than two active platforms)
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn sync_all_with_one_platform_is_rejected_without_ledger_row(pool: PgPool) {
    connect_shopify(&pool, USER, "solo-shop").await;

    let app = common::build_test_app(pool.clone());
    let response = request_as(app, Method::POST, "/api/v1/sync/all", USER, None).await;

    let code = error_code(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(code, "INSUFFICIENT_PLATFORMS");

    // Precondition failures are surfaced immediately, never recorded as
    // a sync attempt.
    assert_eq!(ledger_count(&pool, USER).await, 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn sync_all_ignores_inactive_platforms(pool: PgPool) {
    let first = connect_shopify(&pool, USER, "shop-a").await;
    connect_shopify(&pool, USER, "shop-b").await;

    sqlx::query("UPDATE platforms SET status = 'disabled' WHERE id = $1")
        .bind(first)
        .execute(&pool)
        .await
        .unwrap();

    let app = common::build_test_app(pool.clone());
    let response = request_as(app, Method::POST, "/api/v1/sync/all", USER, None).await;

    let code = error_code(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(code, "INSUFFICIENT_PLATFORMS");
    assert_eq!(ledger_count(&pool, USER).await, 0);
}

// ---------------------------------------------------------------------------
// SyncPair preconditions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn sync_pair_rejects_same_platform_twice(pool: PgPool) {
    let id = connect_shopify(&pool, USER, "shop-a").await;

    let app = common::build_test_app(pool.clone());
    let response = request_as(
        app,
        Method::POST,
        "/api/v1/sync/pair",
        USER,
        Some(json!({ "source_platform_id": id, "target_platform_id": id })),
    )
    .await;

    let code = error_code(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(code, "VALIDATION_ERROR");
    assert_eq!(ledger_count(&pool, USER).await, 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn sync_pair_with_unknown_platform_is_404(pool: PgPool) {
    let id = connect_shopify(&pool, USER, "shop-a").await;

    let app = common::build_test_app(pool.clone());
    let response = request_as(
        app,
        Method::POST,
        "/api/v1/sync/pair",
        USER,
        Some(json!({ "source_platform_id": id, "target_platform_id": id + 999 })),
    )
    .await;

    let code = error_code(response, StatusCode::NOT_FOUND).await;
    assert_eq!(code, "NOT_FOUND");
    assert_eq!(ledger_count(&pool, USER).await, 0);
}

/// Cross-user platforms must be indistinguishable from missing ones.
#[sqlx::test(migrations = "../../migrations")]
async fn sync_pair_cannot_reach_another_users_platform(pool: PgPool) {
    let mine = connect_shopify(&pool, USER, "shop-mine").await;
    let theirs = connect_shopify(&pool, 2, "shop-theirs").await;

    let app = common::build_test_app(pool.clone());
    let response = request_as(
        app,
        Method::POST,
        "/api/v1/sync/pair",
        USER,
        Some(json!({ "source_platform_id": mine, "target_platform_id": theirs })),
    )
    .await;

    let code = error_code(response, StatusCode::NOT_FOUND).await;
    assert_eq!(code, "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn history_starts_empty(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = request_as(app, Method::GET, "/api/v1/sync/history", USER, None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"], json!([]));
}
