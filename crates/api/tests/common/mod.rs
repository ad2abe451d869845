use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use shopsync_api::config::ServerConfig;
use shopsync_api::router::build_app_router;
use shopsync_api::state::AppState;
use shopsync_engine::{EngineConfig, SyncEngine, WebhookIngestor};

/// Webhook secret used by all webhook tests.
pub const TEST_SECRET: &str = "whsec_test";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shopify_webhook_secret: TEST_SECRET.to_string(),
        woocommerce_webhook_secret: TEST_SECRET.to_string(),
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool. Mirrors the construction in `main.rs` so
/// integration tests exercise the production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let engine = Arc::new(SyncEngine::new(pool.clone(), EngineConfig::default()));
    let ingestor = Arc::new(WebhookIngestor::new(pool.clone(), Arc::clone(&engine)));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        engine,
        ingestor,
    };

    build_app_router(state, &config)
}

/// Send a GET request without a user identity header.
#[allow(dead_code)]
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a request carrying the `X-User-Id` identity header, with an
/// optional JSON body.
#[allow(dead_code)]
pub async fn request_as(
    app: Router,
    method: Method,
    uri: &str,
    user_id: i64,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-user-id", user_id.to_string());

    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

/// Collect a response body into JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the standard error envelope and return its `code`.
#[allow(dead_code)]
pub async fn error_code(response: Response<Body>, expected_status: StatusCode) -> String {
    assert_eq!(response.status(), expected_status);
    let json = body_json(response).await;
    assert!(json["error"].is_string(), "error body: {json}");
    json["code"].as_str().unwrap_or_default().to_string()
}
