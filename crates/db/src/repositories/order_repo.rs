//! Repository for the `orders` table.
//!
//! The upsert is the webhook idempotency mechanism: retried deliveries
//! for the same `(platform_id, platform_order_id)` update mutable fields
//! in place instead of creating duplicate rows. Identity fields
//! (`order_number`, `platform_order_id`, ownership) are never rewritten.

use sqlx::PgPool;

use shopsync_core::types::DbId;

use crate::models::order::{Order, OrderListQuery, OrderStats, UpsertOrder};

/// Column list for `orders` queries.
const COLUMNS: &str = "\
    id, user_id, platform_id, order_number, platform_order_id, status, \
    total, currency, customer_email, customer_name, shipping_address, \
    order_items, payment_status, platform_updated_at, created_at, updated_at";

/// Maximum page size for order listing.
const MAX_LIMIT: i64 = 250;

/// Default page size for order listing.
const DEFAULT_LIMIT: i64 = 100;

/// Provides the webhook upsert and read operations for orders.
pub struct OrderRepo;

impl OrderRepo {
    /// Insert or update an order snapshot.
    ///
    /// The conflict update carries a monotonic guard: when both the
    /// incoming and stored rows have a vendor `platform_updated_at`, an
    /// older delivery does not overwrite a newer snapshot. Returns `None`
    /// when the guard rejected the write (stale delivery, state kept).
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertOrder,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!(
            "INSERT INTO orders \
                 (user_id, platform_id, order_number, platform_order_id, status, \
                  total, currency, customer_email, customer_name, shipping_address, \
                  order_items, payment_status, platform_updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             ON CONFLICT ON CONSTRAINT uq_orders_platform_order DO UPDATE SET \
                 status = EXCLUDED.status, \
                 total = EXCLUDED.total, \
                 payment_status = EXCLUDED.payment_status, \
                 platform_updated_at = EXCLUDED.platform_updated_at, \
                 updated_at = NOW() \
             WHERE EXCLUDED.platform_updated_at IS NULL \
                OR orders.platform_updated_at IS NULL \
                OR EXCLUDED.platform_updated_at >= orders.platform_updated_at \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(input.user_id)
            .bind(input.platform_id)
            .bind(&input.order_number)
            .bind(&input.platform_order_id)
            .bind(&input.status)
            .bind(input.total)
            .bind(&input.currency)
            .bind(&input.customer_email)
            .bind(&input.customer_name)
            .bind(&input.shipping_address)
            .bind(&input.order_items)
            .bind(&input.payment_status)
            .bind(input.platform_updated_at)
            .fetch_optional(pool)
            .await
    }

    /// Find one order by id, scoped to its owner.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// The stored snapshot for a platform's own order id.
    pub async fn find_by_platform_order(
        pool: &PgPool,
        platform_id: DbId,
        platform_order_id: &str,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM orders \
             WHERE platform_id = $1 AND platform_order_id = $2"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(platform_id)
            .bind(platform_order_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's orders, newest first, with optional filters.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        params: &OrderListQuery,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        let offset = params.offset.unwrap_or(0);

        let mut conditions = vec!["user_id = $1".to_string()];
        let mut bind_idx: u32 = 2;

        if params.status.is_some() {
            conditions.push(format!("status = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.platform_id.is_some() {
            conditions.push(format!("platform_id = ${bind_idx}"));
            bind_idx += 1;
        }

        let query = format!(
            "SELECT {COLUMNS} FROM orders \
             WHERE {} \
             ORDER BY created_at DESC \
             LIMIT ${bind_idx} OFFSET ${}",
            conditions.join(" AND "),
            bind_idx + 1,
        );

        let mut q = sqlx::query_as::<_, Order>(&query).bind(user_id);
        if let Some(status) = &params.status {
            q = q.bind(status);
        }
        if let Some(platform_id) = params.platform_id {
            q = q.bind(platform_id);
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Aggregate order counts and revenue for a user.
    pub async fn stats(pool: &PgPool, user_id: DbId) -> Result<OrderStats, sqlx::Error> {
        sqlx::query_as::<_, OrderStats>(
            "SELECT \
                 COUNT(*) AS total_orders, \
                 SUM(total) AS total_revenue, \
                 COUNT(*) FILTER (WHERE status = 'completed') AS completed_orders, \
                 COUNT(*) FILTER (WHERE status = 'pending') AS pending_orders \
             FROM orders WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }
}
