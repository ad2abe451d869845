//! Handlers for the `/sync` resource.
//!
//! Thin HTTP shims over [`shopsync_engine::SyncEngine`]: pairwise
//! trigger, full-set trigger, and ledger history.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use shopsync_core::types::DbId;
use shopsync_engine::{PairOutcome, SyncReport};

use crate::error::AppResult;
use crate::identity::CurrentUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response DTOs
// ---------------------------------------------------------------------------

/// Request body for a pairwise sync trigger.
#[derive(Debug, Deserialize)]
pub struct SyncPairRequest {
    pub source_platform_id: DbId,
    pub target_platform_id: DbId,
}

/// Query parameters for the history listing.
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

/// One pair's outcome in a full-set sync response. Failed pairs are
/// entries with an `error` message, never a failed request.
#[derive(Debug, Serialize)]
pub struct PairResult {
    pub source_platform_id: DbId,
    pub target_platform_id: DbId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<SyncReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<PairOutcome> for PairResult {
    fn from(outcome: PairOutcome) -> Self {
        let (report, error) = match outcome.result {
            Ok(report) => (Some(report), None),
            Err(err) => (None, Some(err.to_string())),
        };
        Self {
            source_platform_id: outcome.source_platform_id,
            target_platform_id: outcome.target_platform_id,
            report,
            error,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/sync/pair
///
/// Reconcile one platform pair now. Aborts (resolution or listing
/// faults) surface as error responses; item-level failures come back in
/// the report.
pub async fn trigger_pair(
    user: CurrentUser,
    State(state): State<AppState>,
    Json(input): Json<SyncPairRequest>,
) -> AppResult<impl IntoResponse> {
    let report = state
        .engine
        .sync_pair(
            user.user_id,
            input.source_platform_id,
            input.target_platform_id,
            &CancellationToken::new(),
        )
        .await?;
    Ok(Json(DataResponse { data: report }))
}

/// POST /api/v1/sync/all
///
/// Reconcile every unordered pair of active platforms. Requires at least
/// two active platforms (400 otherwise); individual pair failures are
/// reported inline.
pub async fn trigger_all(
    user: CurrentUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let outcomes = state
        .engine
        .sync_all(user.user_id, &CancellationToken::new())
        .await?;
    let results: Vec<PairResult> = outcomes.into_iter().map(PairResult::from).collect();
    Ok(Json(DataResponse { data: results }))
}

/// GET /api/v1/sync/history
///
/// Recent ledger rows with platform display metadata, newest first.
pub async fn history(
    user: CurrentUser,
    State(state): State<AppState>,
    Query(params): Query<HistoryQuery>,
) -> AppResult<impl IntoResponse> {
    let entries = state.engine.history(user.user_id, params.limit).await?;
    Ok(Json(DataResponse { data: entries }))
}
