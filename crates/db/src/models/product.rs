//! Canonical product entity, platform links, and inventory stats.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use shopsync_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Product entity
// ---------------------------------------------------------------------------

/// Canonical inventory unit, one row per `(user_id, sku)`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub user_id: DbId,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub current_stock: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for the product upsert keyed on `(user_id, sku)`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertProduct {
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub current_stock: Option<i32>,
}

/// Filter parameters for listing products.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductListQuery {
    /// Case-insensitive substring match on the SKU.
    pub sku: Option<String>,
    /// Only products with stock at or below this threshold.
    pub low_stock: Option<i32>,
    pub limit: Option<i64>,
}

/// Aggregate inventory counts for a user's catalog.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InventoryStats {
    pub total_products: i64,
    pub total_stock: Option<i64>,
    pub out_of_stock: i64,
    pub low_stock: i64,
}

// ---------------------------------------------------------------------------
// Product-platform link
// ---------------------------------------------------------------------------

/// External identifiers for one product on one platform.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductPlatformLink {
    pub id: DbId,
    pub product_id: DbId,
    pub platform_id: DbId,
    pub external_product_id: String,
    pub external_variant_id: Option<String>,
    pub external_inventory_item_id: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating or refreshing a product-platform link.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertProductLink {
    pub product_id: DbId,
    pub platform_id: DbId,
    pub external_product_id: String,
    pub external_variant_id: Option<String>,
    pub external_inventory_item_id: Option<String>,
}

/// A link joined with its product's SKU, used by the engine to address
/// target writes without re-resolving each item.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SkuLink {
    pub sku: String,
    pub external_product_id: String,
    pub external_variant_id: Option<String>,
    pub external_inventory_item_id: Option<String>,
}
