use std::sync::Arc;

use shopsync_engine::{SyncEngine, WebhookIngestor};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: shopsync_db::DbPool,
    /// Server configuration (webhook secrets, timeouts).
    pub config: Arc<ServerConfig>,
    /// Reconciliation engine. One instance per process; all sync paths
    /// must share it so per-platform locks actually exclude each other.
    pub engine: Arc<SyncEngine>,
    /// Webhook ingestion pipeline, built over the same engine.
    pub ingestor: Arc<WebhookIngestor>,
}
