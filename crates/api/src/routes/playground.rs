//! Route definitions for the `/playgrounds` resource.
//!
//! Browsing (list, detail, slots, reviews) is public; every write
//! requires authentication and ownership or the OWNER role.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{playground, review};
use crate::state::AppState;

/// Routes mounted at `/playgrounds`.
///
/// ```text
/// GET    /                            -> list (public)
/// POST   /                            -> create (owner only)
/// GET    /{id}                        -> detail (public)
/// PUT    /{id}                        -> update (owner of record or admin)
/// DELETE /{id}                        -> delete (owner of record or admin)
/// GET    /{id}/slots?date=            -> slots (public)
/// POST   /{id}/toggle-availability    -> toggle_availability
/// GET    /{id}/reviews                -> review list (public)
/// POST   /{id}/reviews                -> leave review
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(playground::list).post(playground::create))
        .route(
            "/{id}",
            get(playground::detail)
                .put(playground::update)
                .delete(playground::delete),
        )
        .route("/{id}/slots", get(playground::slots))
        .route(
            "/{id}/toggle-availability",
            post(playground::toggle_availability),
        )
        // Reviews live under the playground they rate.
        .route(
            "/{id}/reviews",
            get(review::list_for_playground).post(review::create),
        )
}
