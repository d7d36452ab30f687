//! Dashboard statistics handlers, one per audience.

use axum::extract::State;
use axum::Json;
use playrental_db::models::stats::{AdminStats, OwnerStats, PlayerStats};
use playrental_db::repositories::StatsRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireOwner};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/stats/admin
///
/// Platform-wide totals for the admin dashboard.
pub async fn admin(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<AdminStats>>> {
    let data = StatsRepo::admin_totals(&state.pool).await?;

    Ok(Json(DataResponse { data }))
}

/// GET /api/stats/owner
///
/// Totals across the caller's own playgrounds.
pub async fn owner(
    RequireOwner(owner): RequireOwner,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<OwnerStats>>> {
    let data = StatsRepo::owner_totals(&state.pool, owner.user_id).await?;

    Ok(Json(DataResponse { data }))
}

/// GET /api/stats/me
///
/// The caller's own booking counters.
pub async fn me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<PlayerStats>>> {
    let data = StatsRepo::player_totals(&state.pool, auth.user_id).await?;

    Ok(Json(DataResponse { data }))
}
