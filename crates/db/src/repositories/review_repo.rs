//! Repository for the `reviews` table.

use playrental_core::types::DbId;
use sqlx::PgPool;

use crate::models::review::{CreateReview, Review, ReviewWithAuthor, ReviewWithPlayground};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, booking_id, playground_id, user_id, rating, comment, created_at, updated_at";

/// Review columns qualified for joined queries.
const QUALIFIED: &str = "r.id, r.booking_id, r.playground_id, r.user_id, r.rating, r.comment, \
                        r.created_at, r.updated_at";

/// Provides review operations. Uniqueness per booking is enforced by
/// `uq_reviews_booking_id`.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a new review, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateReview) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews (booking_id, playground_id, user_id, rating, comment)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(input.booking_id)
            .bind(input.playground_id)
            .bind(input.user_id)
            .bind(input.rating)
            .bind(&input.comment)
            .fetch_one(pool)
            .await
    }

    /// Find the review left for a booking, if any.
    pub async fn find_by_booking(
        pool: &PgPool,
        booking_id: DbId,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE booking_id = $1");
        sqlx::query_as::<_, Review>(&query)
            .bind(booking_id)
            .fetch_optional(pool)
            .await
    }

    /// All reviews for a playground with author names, newest first.
    pub async fn list_for_playground(
        pool: &PgPool,
        playground_id: DbId,
    ) -> Result<Vec<ReviewWithAuthor>, sqlx::Error> {
        let query = format!(
            "SELECT {QUALIFIED}, u.name AS author_name
             FROM reviews r
             JOIN users u ON u.id = r.user_id
             WHERE r.playground_id = $1
             ORDER BY r.created_at DESC"
        );
        sqlx::query_as::<_, ReviewWithAuthor>(&query)
            .bind(playground_id)
            .fetch_all(pool)
            .await
    }

    /// All reviews a user has written, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ReviewWithPlayground>, sqlx::Error> {
        let query = format!(
            "SELECT {QUALIFIED}, p.name AS playground_name
             FROM reviews r
             JOIN playgrounds p ON p.id = r.playground_id
             WHERE r.user_id = $1
             ORDER BY r.created_at DESC"
        );
        sqlx::query_as::<_, ReviewWithPlayground>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
