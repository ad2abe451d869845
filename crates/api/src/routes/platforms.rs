//! Route definitions for the `/platforms` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::platforms;
use crate::state::AppState;

/// Routes mounted at `/platforms`.
///
/// ```text
/// GET    /                    -> list_platforms
/// POST   /                    -> connect_platform
/// GET    /{id}                -> get_platform
/// DELETE /{id}                -> disconnect_platform
/// PUT    /{id}/credentials    -> update_credentials
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(platforms::list_platforms).post(platforms::connect_platform),
        )
        .route(
            "/{id}",
            get(platforms::get_platform).delete(platforms::disconnect_platform),
        )
        .route("/{id}/credentials", put(platforms::update_credentials))
}
