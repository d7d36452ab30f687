//! Notification handlers and the best-effort fan-out helper used by the
//! booking, payment, and review flows.
//!
//! All reads and writes are scoped to the session user; touching someone
//! else's notification reports not-found, never forbidden.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use playrental_core::types::DbId;
use playrental_db::models::notification::{CreateNotification, Notification};
use playrental_db::repositories::NotificationRepo;
use playrental_db::DbPool;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Insert a notification without letting a failure surface.
///
/// Notifications ride along on booking, payment, and review writes; the
/// parent operation has already committed by the time this runs, so a
/// failure here is logged and dropped rather than turned into an error
/// response.
pub(crate) async fn notify_best_effort(pool: &DbPool, user_id: DbId, kind: &str, message: String) {
    let input = CreateNotification {
        user_id,
        kind: kind.to_string(),
        message,
    };
    if let Err(err) = NotificationRepo::create(pool, &input).await {
        tracing::warn!(error = %err, user_id, kind, "Failed to insert notification");
    }
}

/// Response for `POST /api/notifications/read-all`.
#[derive(Debug, Serialize)]
pub struct ReadAllResponse {
    pub marked_read: u64,
}

/// GET /api/notifications
///
/// The caller's notifications, newest first.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    let data = NotificationRepo::list_for_user(&state.pool, auth.user_id).await?;

    Ok(Json(DataResponse { data }))
}

/// POST /api/notifications/{id}/read
///
/// Mark one notification as read. Idempotent.
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let found = NotificationRepo::mark_read(&state.pool, id, auth.user_id).await?;
    if !found {
        return Err(AppError::NotFound("Notification not found".into()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/notifications/read-all
///
/// Mark every unread notification as read, reporting how many changed.
pub async fn mark_all_read(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<ReadAllResponse>>> {
    let marked_read = NotificationRepo::mark_all_read(&state.pool, auth.user_id).await?;

    Ok(Json(DataResponse {
        data: ReadAllResponse { marked_read },
    }))
}

/// DELETE /api/notifications/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = NotificationRepo::delete(&state.pool, id, auth.user_id).await?;
    if !deleted {
        return Err(AppError::NotFound("Notification not found".into()));
    }

    Ok(StatusCode::NO_CONTENT)
}
