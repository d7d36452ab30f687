//! Handlers for the authenticated user's own profile.

use axum::extract::State;
use axum::Json;
use playrental_core::error::CoreError;
use playrental_db::models::user::{UpdateProfile, UserResponse};
use playrental_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// PUT /api/users/me
///
/// Update the caller's name and/or phone. Email and role are fixed.
pub async fn update_me(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    if let Some(name) = &input.name {
        if name.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Name cannot be empty".into(),
            )));
        }
    }

    let user = UserRepo::update_profile(&state.pool, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    Ok(Json(DataResponse {
        data: UserResponse::from(user),
    }))
}
