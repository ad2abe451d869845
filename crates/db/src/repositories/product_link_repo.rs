//! Repository for the `product_platform_links` table.
//!
//! Links let the engine address a write on the target platform directly
//! by external identifier instead of re-resolving by SKU per call.

use sqlx::PgPool;

use shopsync_core::types::DbId;

use crate::models::product::{ProductPlatformLink, SkuLink, UpsertProductLink};

/// Column list for `product_platform_links` queries.
const COLUMNS: &str = "\
    id, product_id, platform_id, external_product_id, external_variant_id, \
    external_inventory_item_id, created_at";

/// Provides link maintenance and the engine's batch lookup.
pub struct ProductLinkRepo;

impl ProductLinkRepo {
    /// Create or refresh the link for `(product_id, platform_id)`.
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertProductLink,
    ) -> Result<ProductPlatformLink, sqlx::Error> {
        let query = format!(
            "INSERT INTO product_platform_links \
                 (product_id, platform_id, external_product_id, \
                  external_variant_id, external_inventory_item_id) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT ON CONSTRAINT uq_links_product_platform DO UPDATE SET \
                 external_product_id = EXCLUDED.external_product_id, \
                 external_variant_id = EXCLUDED.external_variant_id, \
                 external_inventory_item_id = EXCLUDED.external_inventory_item_id \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductPlatformLink>(&query)
            .bind(input.product_id)
            .bind(input.platform_id)
            .bind(&input.external_product_id)
            .bind(&input.external_variant_id)
            .bind(&input.external_inventory_item_id)
            .fetch_one(pool)
            .await
    }

    /// All links for one platform, keyed by SKU.
    ///
    /// The engine prefetches this once per pairwise sync so the bounded
    /// item loop holds no database handle.
    pub async fn sku_links_for_platform(
        pool: &PgPool,
        user_id: DbId,
        platform_id: DbId,
    ) -> Result<Vec<SkuLink>, sqlx::Error> {
        sqlx::query_as::<_, SkuLink>(
            "SELECT p.sku, l.external_product_id, l.external_variant_id, \
                    l.external_inventory_item_id \
             FROM product_platform_links l \
             JOIN products p ON p.id = l.product_id \
             WHERE l.platform_id = $1 AND p.user_id = $2",
        )
        .bind(platform_id)
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
