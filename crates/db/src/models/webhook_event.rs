//! Raw webhook ingestion records.
//!
//! Rows are created on receipt, marked processed exactly once after
//! successful handling, and never deleted. The table is the audit trail
//! that makes crash recovery by replay possible.

use serde::Serialize;
use sqlx::FromRow;

use shopsync_core::types::{DbId, Timestamp};

/// One stored webhook delivery.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WebhookEvent {
    pub id: DbId,
    pub platform_id: DbId,
    pub event_type: String,
    pub event_data: serde_json::Value,
    pub processed: bool,
    pub processed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for persisting a verified delivery before it is processed.
#[derive(Debug, Clone)]
pub struct CreateWebhookEvent {
    pub platform_id: DbId,
    pub event_type: String,
    pub event_data: serde_json::Value,
}
