//! Caller identity extraction.
//!
//! Authentication lives upstream (gateway / session service); this
//! service trusts the forwarded `X-User-Id` header and scopes every
//! query by it. Requests without a parseable id are rejected before any
//! handler runs.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use shopsync_core::types::DbId;

use crate::error::AppError;

/// Header carrying the authenticated user's id, set by the upstream
/// gateway.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller, extracted from [`USER_ID_HEADER`].
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub user_id: DbId,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| AppError::Unauthorized("Missing X-User-Id header".to_string()))?;

        let user_id = header
            .to_str()
            .ok()
            .and_then(|v| v.parse::<DbId>().ok())
            .ok_or_else(|| AppError::Unauthorized("Invalid X-User-Id header".to_string()))?;

        Ok(CurrentUser { user_id })
    }
}
