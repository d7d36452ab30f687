//! Route definitions for the `/owner` resource: dashboards over the
//! caller's own listings. OWNER role only.

use axum::routing::get;
use axum::Router;

use crate::handlers::{booking, playground};
use crate::state::AppState;

/// Routes mounted at `/owner`.
///
/// ```text
/// GET /playgrounds    -> own listings
/// GET /bookings       -> bookings across own listings
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/playgrounds", get(playground::list_owned))
        .route("/bookings", get(booking::list_for_owner))
}
