//! Notification entity model and DTOs.

use playrental_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full notification row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    /// One of the `playrental_core::notifications` kind constants.
    pub kind: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a notification.
#[derive(Debug)]
pub struct CreateNotification {
    pub user_id: DbId,
    pub kind: String,
    pub message: String,
}
