//! Repository for the `products` table.
//!
//! Writes are upserts keyed on `(user_id, sku)` — the table never holds
//! two rows for the same SKU under one user.

use sqlx::PgPool;

use shopsync_core::types::DbId;

use crate::models::product::{InventoryStats, Product, ProductListQuery, UpsertProduct};

/// Column list for `products` queries.
const COLUMNS: &str = "\
    id, user_id, sku, name, description, current_stock, created_at, updated_at";

/// Maximum page size for product listing.
const MAX_LIMIT: i64 = 250;

/// Default page size for product listing.
const DEFAULT_LIMIT: i64 = 100;

/// Provides upsert and read operations for canonical products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert or refresh a product keyed on `(user_id, sku)`.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        input: &UpsertProduct,
    ) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products (user_id, sku, name, description, current_stock) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT ON CONSTRAINT uq_products_user_sku DO UPDATE SET \
                 name = EXCLUDED.name, \
                 description = EXCLUDED.description, \
                 current_stock = EXCLUDED.current_stock, \
                 updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(user_id)
            .bind(&input.sku)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.current_stock.unwrap_or(0))
            .fetch_one(pool)
            .await
    }

    /// Find one product by its exact SKU.
    pub async fn find_by_sku(
        pool: &PgPool,
        user_id: DbId,
        sku: &str,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE user_id = $1 AND sku = $2");
        sqlx::query_as::<_, Product>(&query)
            .bind(user_id)
            .bind(sku)
            .fetch_optional(pool)
            .await
    }

    /// List a user's products with optional SKU and low-stock filters.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        params: &ProductListQuery,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);

        let mut conditions = vec!["user_id = $1".to_string()];
        let mut bind_idx: u32 = 2;

        if params.sku.is_some() {
            conditions.push(format!("sku ILIKE ${bind_idx}"));
            bind_idx += 1;
        }
        if params.low_stock.is_some() {
            conditions.push(format!("current_stock <= ${bind_idx}"));
            bind_idx += 1;
        }

        let query = format!(
            "SELECT {COLUMNS} FROM products \
             WHERE {} \
             ORDER BY created_at DESC \
             LIMIT ${bind_idx}",
            conditions.join(" AND "),
        );

        let mut q = sqlx::query_as::<_, Product>(&query).bind(user_id);
        if let Some(sku) = &params.sku {
            q = q.bind(format!("%{sku}%"));
        }
        if let Some(low) = params.low_stock {
            q = q.bind(low);
        }
        q.bind(limit).fetch_all(pool).await
    }

    /// Aggregate inventory counts for a user's catalog.
    ///
    /// "Low stock" is 1..=10 units, matching the dashboard's threshold.
    pub async fn inventory_stats(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<InventoryStats, sqlx::Error> {
        sqlx::query_as::<_, InventoryStats>(
            "SELECT \
                 COUNT(*) AS total_products, \
                 SUM(current_stock)::BIGINT AS total_stock, \
                 COUNT(*) FILTER (WHERE current_stock = 0) AS out_of_stock, \
                 COUNT(*) FILTER (WHERE current_stock > 0 AND current_stock <= 10) AS low_stock \
             FROM products WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }
}
