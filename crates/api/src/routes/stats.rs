//! Route definitions for the `/stats` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::stats;
use crate::state::AppState;

/// Routes mounted at `/stats`.
///
/// ```text
/// GET /admin    -> admin (admin only)
/// GET /owner    -> owner (owner only)
/// GET /me       -> me
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin", get(stats::admin))
        .route("/owner", get(stats::owner))
        .route("/me", get(stats::me))
}
