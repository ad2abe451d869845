//! Webhook receipt handlers.
//!
//! These endpoints are vendor-facing: no user identity header, the
//! platform is resolved from the vendor's identity header and the
//! delivery authenticates by HMAC signature over the exact raw bytes.
//! The body is therefore taken as [`Bytes`], never pre-parsed JSON.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use shopsync_core::types::DbId;
use shopsync_db::models::platform::Platform;
use shopsync_db::repositories::PlatformRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// Shopify delivery headers.
const SHOPIFY_SHOP_HEADER: &str = "x-shopify-shop-domain";
const SHOPIFY_TOPIC_HEADER: &str = "x-shopify-topic";
const SHOPIFY_HMAC_HEADER: &str = "x-shopify-hmac-sha256";

// WooCommerce delivery headers.
const WC_SOURCE_HEADER: &str = "x-wc-webhook-source";
const WC_EVENT_HEADER: &str = "x-wc-webhook-event";
const WC_RESOURCE_HEADER: &str = "x-wc-webhook-resource";
const WC_SIGNATURE_HEADER: &str = "x-wc-webhook-signature";

/// Acknowledgement payload for an accepted delivery.
#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub event_id: DbId,
}

/// POST /api/v1/webhooks/shopify
pub async fn shopify_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let shop_domain = required_header(&headers, SHOPIFY_SHOP_HEADER)?;
    let topic = required_header(&headers, SHOPIFY_TOPIC_HEADER)?;
    let signature = required_header(&headers, SHOPIFY_HMAC_HEADER)?;

    let platform = PlatformRepo::find_by_shop_domain(&state.pool, &shop_domain)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Unknown webhook source".to_string()))?;

    let ack = ingest(
        &state,
        &platform,
        &topic,
        None,
        &body,
        &signature,
        &state.config.shopify_webhook_secret,
    )
    .await?;
    Ok(Json(DataResponse { data: ack }))
}

/// POST /api/v1/webhooks/woocommerce
pub async fn woocommerce_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let source = required_header(&headers, WC_SOURCE_HEADER)?;
    let event = required_header(&headers, WC_EVENT_HEADER)?;
    let resource = required_header(&headers, WC_RESOURCE_HEADER)?;
    let signature = required_header(&headers, WC_SIGNATURE_HEADER)?;

    // The source header usually carries a trailing slash the stored
    // store URL does not.
    let platform = match PlatformRepo::find_by_store_url(&state.pool, &source).await? {
        Some(platform) => platform,
        None => PlatformRepo::find_by_store_url(&state.pool, source.trim_end_matches('/'))
            .await?
            .ok_or_else(|| AppError::Unauthorized("Unknown webhook source".to_string()))?,
    };

    let ack = ingest(
        &state,
        &platform,
        &event,
        Some(&resource),
        &body,
        &signature,
        &state.config.woocommerce_webhook_secret,
    )
    .await?;
    Ok(Json(DataResponse { data: ack }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn ingest(
    state: &AppState,
    platform: &Platform,
    topic: &str,
    resource: Option<&str>,
    body: &[u8],
    signature: &str,
    secret: &str,
) -> AppResult<WebhookAck> {
    let outcome = state
        .ingestor
        .ingest(platform, topic, resource, body, signature, secret)
        .await?;
    Ok(WebhookAck {
        event_id: outcome.event_id,
    })
}

fn required_header(headers: &HeaderMap, name: &str) -> Result<String, AppError> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .ok_or_else(|| AppError::BadRequest(format!("Missing {name} header")))
}
