//! Route definitions for the `/reviews` resource.
//!
//! Creating and listing a playground's reviews live under
//! `/playgrounds/{id}/reviews`; this router only carries the caller's own
//! review history.

use axum::routing::get;
use axum::Router;

use crate::handlers::review;
use crate::state::AppState;

/// Routes mounted at `/reviews`.
///
/// ```text
/// GET /    -> list_own
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(review::list_own))
}
