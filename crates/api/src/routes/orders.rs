//! Route definitions for the `/orders` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::orders;
use crate::state::AppState;

/// Routes mounted at `/orders`.
///
/// ```text
/// GET    /          -> list_orders
/// GET    /stats     -> order_stats
/// GET    /{id}      -> get_order
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::list_orders))
        .route("/stats", get(orders::order_stats))
        .route("/{id}", get(orders::get_order))
}
