//! Repository for the `sync_logs` ledger.
//!
//! Append-only: one insert per completed (or aborted) sync attempt,
//! never updated afterward. Only the reconciliation engine and the
//! webhook ingestor's error paths write here.

use sqlx::PgPool;

use shopsync_core::types::DbId;

use crate::models::sync_log::{CreateSyncLog, SyncLog, SyncLogWithPlatforms};

/// Column list for `sync_logs` queries.
const COLUMNS: &str = "\
    id, user_id, source_platform_id, target_platform_id, sync_type, status, \
    items_synced, items_failed, error_detail, duration_ms, created_at";

/// Maximum page size for history listing.
const MAX_LIMIT: i64 = 200;

/// Default page size for history listing.
const DEFAULT_LIMIT: i64 = 50;

/// Append-only writer/reader for the sync ledger.
pub struct SyncLogRepo;

impl SyncLogRepo {
    /// Append one ledger row.
    pub async fn insert(pool: &PgPool, input: &CreateSyncLog) -> Result<SyncLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO sync_logs \
                 (user_id, source_platform_id, target_platform_id, sync_type, \
                  status, items_synced, items_failed, error_detail, duration_ms) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SyncLog>(&query)
            .bind(input.user_id)
            .bind(input.source_platform_id)
            .bind(input.target_platform_id)
            .bind(input.sync_type.as_str())
            .bind(input.status.as_str())
            .bind(input.items_synced)
            .bind(input.items_failed)
            .bind(&input.error_detail)
            .bind(input.duration_ms)
            .fetch_one(pool)
            .await
    }

    /// Most-recent-first history for a user, joined with platform display
    /// metadata. `limit` is clamped to [`MAX_LIMIT`].
    pub async fn list_recent(
        pool: &PgPool,
        user_id: DbId,
        limit: Option<i64>,
    ) -> Result<Vec<SyncLogWithPlatforms>, sqlx::Error> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        sqlx::query_as::<_, SyncLogWithPlatforms>(
            "SELECT sl.id, sl.user_id, sl.source_platform_id, sl.target_platform_id, \
                    sl.sync_type, sl.status, sl.items_synced, sl.items_failed, \
                    sl.error_detail, sl.duration_ms, sl.created_at, \
                    sp.platform_name AS source_platform_name, \
                    sp.platform_type AS source_platform_type, \
                    tp.platform_name AS target_platform_name, \
                    tp.platform_type AS target_platform_type \
             FROM sync_logs sl \
             LEFT JOIN platforms sp ON sp.id = sl.source_platform_id \
             LEFT JOIN platforms tp ON tp.id = sl.target_platform_id \
             WHERE sl.user_id = $1 \
             ORDER BY sl.created_at DESC \
             LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Total number of ledger rows for a user (history pagination).
    pub async fn count_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sync_logs WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
