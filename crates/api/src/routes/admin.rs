//! Route definitions for the `/admin` resource.
//!
//! Every handler behind this router extracts `RequireAdmin`.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /users         -> list_users
/// DELETE /users/{id}    -> delete_user
/// GET    /bookings      -> list_bookings
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users))
        .route("/users/{id}", delete(admin::delete_user))
        .route("/bookings", get(admin::list_bookings))
}
