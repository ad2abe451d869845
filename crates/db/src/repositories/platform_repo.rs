//! Repository for the `platforms` table.
//!
//! Every read and write is scoped by `(id, user_id)` — a platform owned
//! by another user is indistinguishable from one that does not exist.

use sqlx::PgPool;

use shopsync_core::credentials::PlatformType;
use shopsync_core::types::{DbId, Timestamp};

use crate::models::platform::{CreatePlatform, Platform, PlatformStatus};

/// Column list for `platforms` queries.
const COLUMNS: &str = "\
    id, user_id, platform_type, platform_name, api_credentials, status, \
    last_sync_at, created_at, updated_at";

/// Provides CRUD operations for connected platforms.
pub struct PlatformRepo;

impl PlatformRepo {
    /// Persist a newly connected platform. Call only after a successful
    /// connect-test against the live API.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreatePlatform,
    ) -> Result<Platform, sqlx::Error> {
        let query = format!(
            "INSERT INTO platforms (user_id, platform_type, platform_name, api_credentials, status) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Platform>(&query)
            .bind(user_id)
            .bind(input.platform_type.as_str())
            .bind(&input.platform_name)
            .bind(&input.api_credentials)
            .bind(PlatformStatus::Active.as_str())
            .fetch_one(pool)
            .await
    }

    /// All platforms for a user, newest first (dashboard listing).
    pub async fn find_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Platform>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM platforms WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Platform>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Active platforms for a user in stable ascending id order.
    ///
    /// `SyncAll` derives its deterministic pair sequence from this order.
    pub async fn find_active_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Platform>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM platforms \
             WHERE user_id = $1 AND status = $2 \
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Platform>(&query)
            .bind(user_id)
            .bind(PlatformStatus::Active.as_str())
            .fetch_all(pool)
            .await
    }

    /// Find a platform by id, scoped to its owner.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Platform>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM platforms WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Platform>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a Shopify platform by its shop domain (webhook receipt path;
    /// the caller has no user context yet, only the vendor identity header).
    pub async fn find_by_shop_domain(
        pool: &PgPool,
        shop_domain: &str,
    ) -> Result<Option<Platform>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM platforms \
             WHERE platform_type = $1 AND api_credentials->>'shopDomain' = $2"
        );
        sqlx::query_as::<_, Platform>(&query)
            .bind(PlatformType::Shopify.as_str())
            .bind(shop_domain)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a WooCommerce platform by its store URL (webhook receipt path).
    pub async fn find_by_store_url(
        pool: &PgPool,
        store_url: &str,
    ) -> Result<Option<Platform>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM platforms \
             WHERE platform_type = $1 AND api_credentials->>'storeUrl' = $2"
        );
        sqlx::query_as::<_, Platform>(&query)
            .bind(PlatformType::Woocommerce.as_str())
            .bind(store_url)
            .fetch_optional(pool)
            .await
    }

    /// Update `last_sync_at` after a reconciliation attempt.
    ///
    /// Best-effort from the engine's point of view: a failure here never
    /// fails the sync itself.
    pub async fn update_last_sync(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE platforms SET last_sync_at = $3, updated_at = NOW() \
             WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .bind(at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Flip a platform's status (e.g. to `error` on revoked credentials).
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        status: PlatformStatus,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE platforms SET status = $3, updated_at = NOW() \
             WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .bind(status.as_str())
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Rotate the stored credential blob. Type and identity stay fixed.
    pub async fn update_credentials(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        api_credentials: &serde_json::Value,
    ) -> Result<Option<Platform>, sqlx::Error> {
        let query = format!(
            "UPDATE platforms SET api_credentials = $3, updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Platform>(&query)
            .bind(id)
            .bind(user_id)
            .bind(api_credentials)
            .fetch_optional(pool)
            .await
    }

    /// Disconnect (delete) a platform. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM platforms WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
