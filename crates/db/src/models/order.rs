//! Order snapshot entity and DTOs.
//!
//! Identity is `(platform_id, platform_order_id)`. Later webhooks for the
//! same identity update status/total/timestamp fields only.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use shopsync_core::types::{DbId, Timestamp};
use shopsync_core::webhook::NormalizedOrder;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A platform sale snapshot.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: DbId,
    pub user_id: DbId,
    pub platform_id: DbId,
    pub order_number: String,
    pub platform_order_id: String,
    pub status: String,
    pub total: Decimal,
    pub currency: String,
    pub customer_email: Option<String>,
    pub customer_name: Option<String>,
    pub shipping_address: serde_json::Value,
    pub order_items: serde_json::Value,
    pub payment_status: String,
    /// The vendor's own last-modified timestamp, used as the monotonic
    /// guard on upserts.
    pub platform_updated_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Upsert DTO
// ---------------------------------------------------------------------------

/// DTO for the order upsert keyed on `(platform_id, platform_order_id)`.
#[derive(Debug, Clone)]
pub struct UpsertOrder {
    pub user_id: DbId,
    pub platform_id: DbId,
    pub order_number: String,
    pub platform_order_id: String,
    pub status: String,
    pub total: Decimal,
    pub currency: String,
    pub customer_email: Option<String>,
    pub customer_name: Option<String>,
    pub shipping_address: serde_json::Value,
    pub order_items: serde_json::Value,
    pub payment_status: String,
    pub platform_updated_at: Option<Timestamp>,
}

impl UpsertOrder {
    /// Build an upsert DTO from a normalized webhook order.
    pub fn from_normalized(user_id: DbId, platform_id: DbId, order: NormalizedOrder) -> Self {
        Self {
            user_id,
            platform_id,
            order_number: order.order_number,
            platform_order_id: order.platform_order_id,
            status: order.status,
            total: order.total,
            currency: order.currency,
            customer_email: order.customer_email,
            customer_name: order.customer_name,
            shipping_address: order.shipping_address,
            order_items: order.line_items,
            payment_status: order.payment_status,
            platform_updated_at: order.platform_updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Query parameters / stats
// ---------------------------------------------------------------------------

/// Filter parameters for listing orders.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<String>,
    pub platform_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Aggregate order counts and revenue for a user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderStats {
    pub total_orders: i64,
    pub total_revenue: Option<Decimal>,
    pub completed_orders: i64,
    pub pending_orders: i64,
}
