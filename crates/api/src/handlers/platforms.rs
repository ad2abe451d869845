//! Handlers for the `/platforms` resource.
//!
//! Connecting a platform runs a live connect-test before anything is
//! persisted: bad credentials come back as a 400 and leave no row
//! behind.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use shopsync_adapters::AdapterFactory;
use shopsync_core::credentials::{PlatformCredentials, PlatformType};
use shopsync_core::error::CoreError;
use shopsync_core::types::DbId;
use shopsync_db::models::platform::CreatePlatform;
use shopsync_db::repositories::PlatformRepo;

use crate::error::{AppError, AppResult};
use crate::identity::CurrentUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Request body for connecting a new platform.
#[derive(Debug, Deserialize, Validate)]
pub struct ConnectPlatformRequest {
    /// `shopify` or `woocommerce`.
    pub platform_type: String,
    #[validate(length(min = 1, max = 100))]
    pub platform_name: String,
    /// Type-specific credential blob (shape checked on decode).
    pub credentials: serde_json::Value,
}

/// Request body for rotating a platform's credentials.
#[derive(Debug, Deserialize)]
pub struct UpdateCredentialsRequest {
    pub credentials: serde_json::Value,
}

// ---------------------------------------------------------------------------
// Connect / disconnect
// ---------------------------------------------------------------------------

/// POST /api/v1/platforms
///
/// Connect a new platform. Decodes the credential blob, runs a live
/// connect-test, and only then persists the row (status `active`).
pub async fn connect_platform(
    user: CurrentUser,
    State(state): State<AppState>,
    Json(input): Json<ConnectPlatformRequest>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let platform_type = PlatformType::parse(&input.platform_type)?;
    let credentials = PlatformCredentials::decode(platform_type, &input.credentials)?;

    connect_test(&state, credentials).await?;

    let platform = PlatformRepo::create(
        &state.pool,
        user.user_id,
        &CreatePlatform {
            platform_type,
            platform_name: input.platform_name,
            api_credentials: input.credentials,
        },
    )
    .await?;

    tracing::info!(
        platform_id = platform.id,
        platform_type = %platform_type,
        user_id = user.user_id,
        "Platform connected",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: platform })))
}

/// DELETE /api/v1/platforms/{id}
///
/// Disconnect a platform. Returns 204 on success.
pub async fn disconnect_platform(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(platform_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let removed = PlatformRepo::delete(&state.pool, platform_id, user.user_id).await?;
    if !removed {
        return Err(CoreError::not_found("platform", platform_id).into());
    }

    tracing::info!(platform_id, user_id = user.user_id, "Platform disconnected");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

/// GET /api/v1/platforms
pub async fn list_platforms(
    user: CurrentUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let platforms = PlatformRepo::find_by_user(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: platforms }))
}

/// GET /api/v1/platforms/{id}
pub async fn get_platform(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(platform_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let platform = PlatformRepo::find_by_id(&state.pool, platform_id, user.user_id)
        .await?
        .ok_or_else(|| CoreError::not_found("platform", platform_id))?;
    Ok(Json(DataResponse { data: platform }))
}

// ---------------------------------------------------------------------------
// Credential rotation
// ---------------------------------------------------------------------------

/// PUT /api/v1/platforms/{id}/credentials
///
/// Rotate a platform's credentials. The platform's type and identity are
/// immutable; the new blob must decode for the existing type and pass a
/// connect-test before being stored.
pub async fn update_credentials(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(platform_id): Path<DbId>,
    Json(input): Json<UpdateCredentialsRequest>,
) -> AppResult<impl IntoResponse> {
    let platform = PlatformRepo::find_by_id(&state.pool, platform_id, user.user_id)
        .await?
        .ok_or_else(|| CoreError::not_found("platform", platform_id))?;

    let credentials = PlatformCredentials::decode(platform.platform_type()?, &input.credentials)?;
    connect_test(&state, credentials).await?;

    let updated =
        PlatformRepo::update_credentials(&state.pool, platform_id, user.user_id, &input.credentials)
            .await?
            .ok_or_else(|| CoreError::not_found("platform", platform_id))?;

    tracing::info!(platform_id, user_id = user.user_id, "Platform credentials rotated");
    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Run the adapter's minimal live call; a failure rejects the request
/// with 400 before any persistence.
async fn connect_test(state: &AppState, credentials: PlatformCredentials) -> AppResult<()> {
    let adapter = state.engine.adapters().for_credentials(credentials);
    adapter
        .connect_test()
        .await
        .map_err(|error| AppError::BadRequest(format!("Connection test failed: {error}")))
}
