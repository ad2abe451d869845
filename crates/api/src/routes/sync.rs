//! Route definitions for the `/sync` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::sync;
use crate::state::AppState;

/// Routes mounted at `/sync`.
///
/// ```text
/// POST   /pair       -> trigger_pair
/// POST   /all        -> trigger_all
/// GET    /history    -> history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pair", post(sync::trigger_pair))
        .route("/all", post(sync::trigger_all))
        .route("/history", get(sync::history))
}
