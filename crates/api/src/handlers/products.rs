//! Handlers for the `/products` resource.
//!
//! The write surface is a single upsert keyed on `(user, sku)`; the
//! read surface is the catalog listing, a single-SKU fetch, and
//! aggregate inventory stats.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use shopsync_db::models::product::{ProductListQuery, UpsertProduct};
use shopsync_db::repositories::ProductRepo;

use crate::error::{AppError, AppResult};
use crate::identity::CurrentUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/products
///
/// Create or refresh a product. Upserts on `(user, sku)`, so resubmitting
/// the same SKU updates the existing row instead of conflicting.
pub async fn upsert_product(
    user: CurrentUser,
    State(state): State<AppState>,
    Json(input): Json<UpsertProduct>,
) -> AppResult<impl IntoResponse> {
    if input.sku.trim().is_empty() {
        return Err(AppError::BadRequest("SKU must not be empty".to_string()));
    }
    if input.current_stock.is_some_and(|s| s < 0) {
        return Err(AppError::BadRequest(
            "Stock must be non-negative".to_string(),
        ));
    }

    let product = ProductRepo::upsert(&state.pool, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: product })))
}

/// GET /api/v1/products
///
/// List the user's catalog with optional `sku` substring and `low_stock`
/// threshold filters.
pub async fn list_products(
    user: CurrentUser,
    State(state): State<AppState>,
    Query(params): Query<ProductListQuery>,
) -> AppResult<impl IntoResponse> {
    let products = ProductRepo::list(&state.pool, user.user_id, &params).await?;
    Ok(Json(DataResponse { data: products }))
}

/// GET /api/v1/products/{sku}
///
/// Fetch one product by its exact SKU.
pub async fn get_product(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(sku): Path<String>,
) -> AppResult<impl IntoResponse> {
    let product = ProductRepo::find_by_sku(&state.pool, user.user_id, &sku)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product with SKU {sku:?} not found")))?;
    Ok(Json(DataResponse { data: product }))
}

/// GET /api/v1/products/stats
pub async fn inventory_stats(
    user: CurrentUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let stats = ProductRepo::inventory_stats(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: stats }))
}
