//! Route definitions for the `/webhooks` resource.
//!
//! Vendor-facing: no user identity, signature-authenticated raw bodies.

use axum::routing::post;
use axum::Router;

use crate::handlers::webhooks;
use crate::state::AppState;

/// Routes mounted at `/webhooks`.
///
/// ```text
/// POST   /shopify        -> shopify_webhook
/// POST   /woocommerce    -> woocommerce_webhook
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/shopify", post(webhooks::shopify_webhook))
        .route("/woocommerce", post(webhooks::woocommerce_webhook))
}
