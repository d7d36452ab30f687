//! Route definitions for the `/bookings` resource.
//!
//! All endpoints require authentication; per-booking access is decided
//! in the handlers (booker, playground owner, or admin).

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{booking, payment};
use crate::state::AppState;

/// Routes mounted at `/bookings`.
///
/// ```text
/// GET    /               -> list_own
/// POST   /               -> create
/// DELETE /{id}           -> delete
/// POST   /{id}/cancel    -> cancel
/// PUT    /{id}/status    -> update_status
/// POST   /{id}/pay       -> pay (booker only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(booking::list_own).post(booking::create))
        .route("/{id}", delete(booking::delete))
        .route("/{id}/cancel", post(booking::cancel))
        .route("/{id}/status", put(booking::update_status))
        // The simulated gateway hangs off the booking it charges.
        .route("/{id}/pay", post(payment::pay))
}
