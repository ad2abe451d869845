//! Handlers for the `/orders` resource.
//!
//! Read-only: the order store is populated by webhook ingestion, never
//! by direct API writes.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;

use shopsync_core::error::CoreError;
use shopsync_core::types::DbId;
use shopsync_db::models::order::OrderListQuery;
use shopsync_db::repositories::OrderRepo;

use crate::error::AppResult;
use crate::identity::CurrentUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/orders
///
/// List the user's orders, newest first, with optional `status` and
/// `platform_id` filters.
pub async fn list_orders(
    user: CurrentUser,
    State(state): State<AppState>,
    Query(params): Query<OrderListQuery>,
) -> AppResult<impl IntoResponse> {
    let orders = OrderRepo::list(&state.pool, user.user_id, &params).await?;
    Ok(Json(DataResponse { data: orders }))
}

/// GET /api/v1/orders/stats
pub async fn order_stats(
    user: CurrentUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let stats = OrderRepo::stats(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: stats }))
}

/// GET /api/v1/orders/{id}
pub async fn get_order(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(order_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let order = OrderRepo::find_by_id(&state.pool, order_id, user.user_id)
        .await?
        .ok_or_else(|| CoreError::not_found("order", order_id))?;
    Ok(Json(DataResponse { data: order }))
}
