//! Sync ledger entity models.
//!
//! One row per reconciliation attempt. Rows are immutable after insert
//! (no `updated_at`): this is the system's audit trail and the input to
//! backoff/alerting policy.

use serde::Serialize;
use sqlx::FromRow;

use shopsync_core::outcome::SyncStatus;
use shopsync_core::types::{DbId, Timestamp};

/// One ledger row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SyncLog {
    pub id: DbId,
    pub user_id: DbId,
    pub source_platform_id: Option<DbId>,
    pub target_platform_id: Option<DbId>,
    pub sync_type: String,
    pub status: String,
    pub items_synced: i32,
    pub items_failed: i32,
    pub error_detail: Option<serde_json::Value>,
    pub duration_ms: i64,
    pub created_at: Timestamp,
}

/// Kind of reconciliation an attempt covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncType {
    Inventory,
    Order,
}

impl SyncType {
    /// Database representation. Matches the `sync_logs.sync_type` CHECK set.
    pub fn as_str(self) -> &'static str {
        match self {
            SyncType::Inventory => "inventory",
            SyncType::Order => "order",
        }
    }
}

/// DTO for appending a ledger row.
#[derive(Debug, Clone)]
pub struct CreateSyncLog {
    pub user_id: DbId,
    pub source_platform_id: Option<DbId>,
    pub target_platform_id: Option<DbId>,
    pub sync_type: SyncType,
    pub status: SyncStatus,
    pub items_synced: i32,
    pub items_failed: i32,
    /// Structured per-item failures, or a top-level error message for
    /// attempts that aborted before iterating.
    pub error_detail: Option<serde_json::Value>,
    pub duration_ms: i64,
}

/// Ledger row joined with platform display metadata for presentation.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SyncLogWithPlatforms {
    pub id: DbId,
    pub user_id: DbId,
    pub source_platform_id: Option<DbId>,
    pub target_platform_id: Option<DbId>,
    pub sync_type: String,
    pub status: String,
    pub items_synced: i32,
    pub items_failed: i32,
    pub error_detail: Option<serde_json::Value>,
    pub duration_ms: i64,
    pub created_at: Timestamp,
    pub source_platform_name: Option<String>,
    pub source_platform_type: Option<String>,
    pub target_platform_name: Option<String>,
    pub target_platform_type: Option<String>,
}
