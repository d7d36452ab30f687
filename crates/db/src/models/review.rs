//! Review entity model and DTOs.

use playrental_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full review row from the `reviews` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub booking_id: DbId,
    pub playground_id: DbId,
    pub user_id: DbId,
    /// 1 through 5 stars.
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Review joined with its author's name; the playground page shape.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReviewWithAuthor {
    pub id: DbId,
    pub booking_id: DbId,
    pub playground_id: DbId,
    pub user_id: DbId,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub author_name: String,
}

/// Review joined with the playground it rates; the "my reviews" shape.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReviewWithPlayground {
    pub id: DbId,
    pub booking_id: DbId,
    pub playground_id: DbId,
    pub user_id: DbId,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub playground_name: String,
}

/// DTO for inserting a review against a completed booking.
#[derive(Debug)]
pub struct CreateReview {
    pub booking_id: DbId,
    pub playground_id: DbId,
    pub user_id: DbId,
    pub rating: i32,
    pub comment: Option<String>,
}
