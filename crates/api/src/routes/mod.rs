pub mod admin;
pub mod auth;
pub mod booking;
pub mod health;
pub mod notification;
pub mod owner;
pub mod playground;
pub mod review;
pub mod stats;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                             register (public)
/// /auth/login                                login (public)
/// /auth/logout                               logout
/// /auth/me                                   current user
/// /auth/verify-email                         verify email token (public)
/// /auth/resend-verification                  resend verification email (public)
///
/// /users/me                                  update own profile (PUT)
///
/// /playgrounds                               list (public), create (owner)
/// /playgrounds/{id}                          detail (public), update, delete
/// /playgrounds/{id}/slots                    hourly availability grid (public)
/// /playgrounds/{id}/toggle-availability      flip availability (POST)
/// /playgrounds/{id}/reviews                  list (public), create
///
/// /bookings                                  list own, create
/// /bookings/{id}                             delete
/// /bookings/{id}/cancel                      cancel with refund (POST)
/// /bookings/{id}/status                      set status (PUT)
/// /bookings/{id}/pay                         simulated card charge (POST)
///
/// /owner/playgrounds                         own listings (owner only)
/// /owner/bookings                            bookings across own listings
///
/// /reviews                                   own reviews
///
/// /notifications                             list own
/// /notifications/read-all                    mark all read (POST)
/// /notifications/{id}/read                   mark read (POST)
/// /notifications/{id}                        delete
///
/// /stats/admin                               platform totals (admin only)
/// /stats/owner                               own-listing totals (owner only)
/// /stats/me                                  own booking counters
///
/// /admin/users                               list users (admin only)
/// /admin/users/{id}                          delete user
/// /admin/bookings                            every booking
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Registration, sessions, and email verification.
        .nest("/auth", auth::router())
        // Own-profile updates.
        .nest("/users", user::router())
        // Public browsing plus owner CRUD, with nested reviews.
        .nest("/playgrounds", playground::router())
        // Booking lifecycle and the simulated payment gateway.
        .nest("/bookings", booking::router())
        // Owner dashboards over their own listings.
        .nest("/owner", owner::router())
        // The caller's own reviews.
        .nest("/reviews", review::router())
        // In-app notification feed.
        .nest("/notifications", notification::router())
        // Dashboard stat cards per audience.
        .nest("/stats", stats::router())
        // User management and the global booking list.
        .nest("/admin", admin::router())
}
