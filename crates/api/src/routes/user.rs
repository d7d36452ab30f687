//! Route definitions for the `/users` resource.

use axum::routing::put;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// PUT /me    -> update_me
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/me", put(user::update_me))
}
