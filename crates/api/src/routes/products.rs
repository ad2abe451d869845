//! Route definitions for the `/products` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

/// Routes mounted at `/products`.
///
/// ```text
/// GET    /          -> list_products
/// POST   /          -> upsert_product
/// GET    /stats     -> inventory_stats
/// GET    /{sku}     -> get_product
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(products::list_products).post(products::upsert_product),
        )
        .route("/stats", get(products::inventory_stats))
        .route("/{sku}", get(products::get_product))
}
