//! Route definitions for the `/notifications` resource.
//!
//! All endpoints require authentication and are scoped to the caller.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET    /             -> list
/// POST   /read-all     -> mark_all_read
/// POST   /{id}/read    -> mark_read
/// DELETE /{id}         -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notification::list))
        .route("/read-all", post(notification::mark_all_read))
        .route("/{id}/read", post(notification::mark_read))
        .route("/{id}", delete(notification::delete))
}
