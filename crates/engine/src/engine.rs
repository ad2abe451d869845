//! Pairwise and full-set inventory reconciliation.
//!
//! One attempt, one ledger row. The ledger insert is mandatory: a sync
//! whose outcome cannot be recorded fails as a whole. The only requests
//! that never reach the ledger are the ones rejected before any platform
//! work starts (same-platform pairs, fewer than two active platforms).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use shopsync_adapters::{AdapterError, AdapterFactory, AdapterRegistry};
use shopsync_core::error::CoreError;
use shopsync_core::outcome::{ItemFailure, SyncStatus, REASON_AUTH_ERROR};
use shopsync_core::pairing::unordered_pairs;
use shopsync_core::types::DbId;
use shopsync_db::models::platform::{Platform, PlatformStatus};
use shopsync_db::models::product::SkuLink;
use shopsync_db::models::sync_log::{CreateSyncLog, SyncLogWithPlatforms, SyncType};
use shopsync_db::repositories::platform_repo::PlatformRepo;
use shopsync_db::repositories::product_link_repo::ProductLinkRepo;
use shopsync_db::repositories::sync_log_repo::SyncLogRepo;

use crate::batch::{self, BatchOutcome};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::locks::PlatformLocks;

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// Outcome of one pairwise sync, mirrored in its ledger row.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub source_platform_id: DbId,
    pub target_platform_id: DbId,
    pub status: SyncStatus,
    pub items_synced: u32,
    pub items_failed: u32,
    pub failures: Vec<ItemFailure>,
    pub duration_ms: i64,
}

/// One pair's result within a full-set sync. Pairs are isolated: a
/// failed pair never aborts the remaining pairs.
#[derive(Debug)]
pub struct PairOutcome {
    pub source_platform_id: DbId,
    pub target_platform_id: DbId,
    pub result: Result<SyncReport, EngineError>,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// The reconciliation engine.
///
/// Cheap to clone; all state is shared. The lock table must be the same
/// instance for every path that syncs (manual, scheduled, webhook-
/// triggered), otherwise mutual exclusion does not hold.
#[derive(Clone)]
pub struct SyncEngine {
    pool: PgPool,
    adapters: Arc<dyn AdapterFactory>,
    locks: Arc<PlatformLocks>,
    config: EngineConfig,
}

impl SyncEngine {
    pub fn new(pool: PgPool, config: EngineConfig) -> Self {
        let registry = AdapterRegistry::new(config.adapter_timeout);
        Self::with_adapter_factory(pool, config, Arc::new(registry))
    }

    /// Build an engine over a custom adapter source instead of the live
    /// [`AdapterRegistry`].
    pub fn with_adapter_factory(
        pool: PgPool,
        config: EngineConfig,
        adapters: Arc<dyn AdapterFactory>,
    ) -> Self {
        Self {
            pool,
            adapters,
            locks: Arc::new(PlatformLocks::new()),
            config,
        }
    }

    /// Push the source platform's inventory onto the target platform.
    ///
    /// Holds both platform locks for the full attempt. Every attempt that
    /// reaches platform resolution appends exactly one ledger row, on the
    /// success path and on every abort path alike.
    pub async fn sync_pair(
        &self,
        user_id: DbId,
        source_id: DbId,
        target_id: DbId,
        cancel: &CancellationToken,
    ) -> Result<SyncReport, EngineError> {
        if source_id == target_id {
            return Err(CoreError::Validation(
                "Source and target platforms must differ".to_string(),
            )
            .into());
        }

        let source = PlatformRepo::find_by_id(&self.pool, source_id, user_id)
            .await?
            .ok_or_else(|| CoreError::not_found("platform", source_id))?;
        let target = PlatformRepo::find_by_id(&self.pool, target_id, user_id)
            .await?
            .ok_or_else(|| CoreError::not_found("platform", target_id))?;

        let started = Instant::now();
        let (_source_guard, _target_guard) = self.locks.lock_pair(source_id, target_id).await;

        tracing::info!(user_id, source_id, target_id, "Starting inventory sync");

        match self.reconcile(user_id, &source, &target, cancel).await {
            Ok(outcome) => {
                let duration_ms = started.elapsed().as_millis() as i64;
                let status = outcome.status();
                let tally = outcome.tally;

                let error_detail = if tally.failures.is_empty() {
                    None
                } else {
                    serde_json::to_value(&tally.failures).ok()
                };
                self.append_ledger(
                    user_id,
                    source_id,
                    target_id,
                    status,
                    tally.items_synced as i32,
                    tally.items_failed as i32,
                    error_detail,
                    duration_ms,
                )
                .await?;

                // Item-level auth failures mean the target's credentials
                // are no longer valid.
                if tally.failures.iter().any(|f| f.reason == REASON_AUTH_ERROR) {
                    self.flag_platform_error(user_id, target_id).await;
                }

                let now = Utc::now();
                for id in [source_id, target_id] {
                    if let Err(error) =
                        PlatformRepo::update_last_sync(&self.pool, id, user_id, now).await
                    {
                        tracing::warn!(%error, platform_id = id, "Failed to update last_sync_at");
                    }
                }

                tracing::info!(
                    user_id,
                    source_id,
                    target_id,
                    status = status.as_str(),
                    items_synced = tally.items_synced,
                    items_failed = tally.items_failed,
                    duration_ms,
                    "Inventory sync finished"
                );

                Ok(SyncReport {
                    source_platform_id: source_id,
                    target_platform_id: target_id,
                    status,
                    items_synced: tally.items_synced,
                    items_failed: tally.items_failed,
                    failures: tally.failures,
                    duration_ms,
                })
            }
            Err(abort) => {
                let duration_ms = started.elapsed().as_millis() as i64;

                // A rejected listing call means the source's credentials
                // are no longer valid.
                if matches!(&abort, EngineError::Adapter(AdapterError::Auth(_))) {
                    self.flag_platform_error(user_id, source_id).await;
                }

                self.append_ledger(
                    user_id,
                    source_id,
                    target_id,
                    SyncStatus::Failed,
                    0,
                    0,
                    Some(json!({ "error": abort.to_string() })),
                    duration_ms,
                )
                .await?;

                tracing::error!(
                    user_id,
                    source_id,
                    target_id,
                    error = %abort,
                    "Inventory sync aborted"
                );
                Err(abort)
            }
        }
    }

    /// Reconcile every unordered pair of the user's active platforms.
    ///
    /// The pair sequence is deterministic (active platforms in ascending
    /// id order, each unordered pair once, lower id as source). Pairs are
    /// isolated; cancellation stops between pairs and mid-batch.
    pub async fn sync_all(
        &self,
        user_id: DbId,
        cancel: &CancellationToken,
    ) -> Result<Vec<PairOutcome>, EngineError> {
        let active = PlatformRepo::find_active_by_user(&self.pool, user_id).await?;
        if active.len() < 2 {
            return Err(CoreError::InsufficientPlatforms(active.len()).into());
        }

        let ids: Vec<DbId> = active.iter().map(|p| p.id).collect();
        let mut outcomes = Vec::new();
        for (source_id, target_id) in unordered_pairs(&ids) {
            if cancel.is_cancelled() {
                break;
            }
            let result = self.sync_pair(user_id, source_id, target_id, cancel).await;
            outcomes.push(PairOutcome {
                source_platform_id: source_id,
                target_platform_id: target_id,
                result,
            });
        }
        Ok(outcomes)
    }

    /// Recent ledger rows for a user, newest first.
    pub async fn history(
        &self,
        user_id: DbId,
        limit: Option<i64>,
    ) -> Result<Vec<SyncLogWithPlatforms>, EngineError> {
        Ok(SyncLogRepo::list_recent(&self.pool, user_id, limit).await?)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn adapters(&self) -> &Arc<dyn AdapterFactory> {
        &self.adapters
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// List the source, prefetch target links, run the bounded item loop.
    async fn reconcile(
        &self,
        user_id: DbId,
        source: &Platform,
        target: &Platform,
        cancel: &CancellationToken,
    ) -> Result<BatchOutcome, EngineError> {
        let source_adapter = self.adapters.for_credentials(source.credentials()?);
        let target_adapter = self.adapters.for_credentials(target.credentials()?);

        let snapshots = source_adapter.list_products(self.config.page_size).await?;
        tracing::debug!(
            source_id = source.id,
            count = snapshots.len(),
            "Listed source products"
        );

        let links: HashMap<String, SkuLink> =
            ProductLinkRepo::sku_links_for_platform(&self.pool, user_id, target.id)
                .await?
                .into_iter()
                .map(|link| (link.sku.clone(), link))
                .collect();

        Ok(batch::run_batch(
            snapshots,
            &links,
            target_adapter,
            self.config.write_concurrency,
            cancel,
        )
        .await)
    }

    /// Append the ledger row for one attempt. Failure here is fatal: an
    /// unrecorded sync is treated as a failed sync.
    #[allow(clippy::too_many_arguments)]
    async fn append_ledger(
        &self,
        user_id: DbId,
        source_id: DbId,
        target_id: DbId,
        status: SyncStatus,
        items_synced: i32,
        items_failed: i32,
        error_detail: Option<serde_json::Value>,
        duration_ms: i64,
    ) -> Result<(), EngineError> {
        SyncLogRepo::insert(
            &self.pool,
            &CreateSyncLog {
                user_id,
                source_platform_id: Some(source_id),
                target_platform_id: Some(target_id),
                sync_type: SyncType::Inventory,
                status,
                items_synced,
                items_failed,
                error_detail,
                duration_ms,
            },
        )
        .await?;
        Ok(())
    }

    /// Best-effort flip of a platform to `error` status.
    async fn flag_platform_error(&self, user_id: DbId, platform_id: DbId) {
        tracing::warn!(user_id, platform_id, "Marking platform as errored");
        if let Err(error) =
            PlatformRepo::set_status(&self.pool, platform_id, user_id, PlatformStatus::Error).await
        {
            tracing::warn!(%error, platform_id, "Failed to update platform status");
        }
    }
}
