//! Admin-only handlers: user management and the global booking list.
//!
//! Every handler here takes [`RequireAdmin`], so only SUPER_ADMIN
//! sessions get past extraction.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use playrental_core::error::CoreError;
use playrental_core::roles::ROLE_SUPER_ADMIN;
use playrental_core::types::DbId;
use playrental_db::models::booking::BookingWithCustomer;
use playrental_db::models::user::UserResponse;
use playrental_db::repositories::{BookingRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/admin/users
///
/// All registered users, newest first, without password hashes.
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool).await?;
    let data = users.into_iter().map(UserResponse::from).collect();

    Ok(Json(DataResponse { data }))
}

/// DELETE /api/admin/users/{id}
///
/// Removes a user and, via cascades, their playgrounds, bookings,
/// reviews, and notifications. Super admin accounts can never be
/// deleted, not even by another super admin.
pub async fn delete_user(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let target = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    if target.role == ROLE_SUPER_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(
            "Super admin accounts cannot be deleted".into(),
        )));
    }

    UserRepo::delete(&state.pool, id).await?;
    tracing::info!(user_id = id, email = %target.email, "User deleted by admin");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/admin/bookings
///
/// Every booking in the system with playground and customer summaries.
pub async fn list_bookings(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<BookingWithCustomer>>>> {
    let data = BookingRepo::list_all(&state.pool).await?;

    Ok(Json(DataResponse { data }))
}
