pub mod health;
pub mod orders;
pub mod platforms;
pub mod products;
pub mod sync;
pub mod webhooks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /platforms                       list, connect
/// /platforms/{id}                  get, disconnect
/// /platforms/{id}/credentials      rotate credentials (PUT)
///
/// /products                        list, upsert
/// /products/stats                  inventory stats
///
/// /orders                          list
/// /orders/stats                    order stats
/// /orders/{id}                     get
///
/// /sync/pair                       trigger pairwise sync (POST)
/// /sync/all                        trigger full-set sync (POST)
/// /sync/history                    ledger history
///
/// /webhooks/shopify                Shopify receipt (POST, raw body)
/// /webhooks/woocommerce            WooCommerce receipt (POST, raw body)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/platforms", platforms::router())
        .nest("/products", products::router())
        .nest("/orders", orders::router())
        .nest("/sync", sync::router())
        .nest("/webhooks", webhooks::router())
}
