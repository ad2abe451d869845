//! Repository for the `webhook_events` table.
//!
//! Insert-then-mark-processed, nothing else: events are stored before any
//! processing so a crash between storage and processing is recoverable by
//! replaying unprocessed rows, and they are never deleted.

use sqlx::PgPool;

use shopsync_core::types::DbId;

use crate::models::webhook_event::{CreateWebhookEvent, WebhookEvent};

/// Column list for `webhook_events` queries.
const COLUMNS: &str = "\
    id, platform_id, event_type, event_data, processed, processed_at, created_at";

/// Provides the ingest log operations.
pub struct WebhookEventRepo;

impl WebhookEventRepo {
    /// Persist a verified delivery, unprocessed.
    pub async fn insert(
        pool: &PgPool,
        input: &CreateWebhookEvent,
    ) -> Result<WebhookEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO webhook_events (platform_id, event_type, event_data) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WebhookEvent>(&query)
            .bind(input.platform_id)
            .bind(&input.event_type)
            .bind(&input.event_data)
            .fetch_one(pool)
            .await
    }

    /// Mark an event processed. Monotonic: returns `false` when the event
    /// was already processed (the row is left untouched).
    pub async fn mark_processed(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE webhook_events \
             SET processed = TRUE, processed_at = NOW() \
             WHERE id = $1 AND processed = FALSE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Find one event by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<WebhookEvent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM webhook_events WHERE id = $1");
        sqlx::query_as::<_, WebhookEvent>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Unprocessed events for a platform, oldest first (replay/backfill).
    pub async fn list_unprocessed(
        pool: &PgPool,
        platform_id: DbId,
        limit: i64,
    ) -> Result<Vec<WebhookEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM webhook_events \
             WHERE platform_id = $1 AND processed = FALSE \
             ORDER BY created_at ASC \
             LIMIT $2"
        );
        sqlx::query_as::<_, WebhookEvent>(&query)
            .bind(platform_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
