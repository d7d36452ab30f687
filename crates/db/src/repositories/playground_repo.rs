//! Repository for the `playgrounds` table.

use playrental_core::types::DbId;
use sqlx::PgPool;

use crate::models::playground::{
    CreatePlayground, Playground, PlaygroundFilter, PlaygroundWithRating, UpdatePlayground,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, name, description, address, city, state, zip_code, \
                        price, sport_type, images, amenities, is_available, created_at, updated_at";

/// Playground columns qualified for joined queries, plus owner and review
/// aggregates. Keep in sync with [`PlaygroundWithRating`].
const RATED_COLUMNS: &str = "p.id, p.owner_id, p.name, p.description, p.address, p.city, \
                        p.state, p.zip_code, p.price, p.sport_type, p.images, p.amenities, \
                        p.is_available, p.created_at, p.updated_at, \
                        u.name AS owner_name, u.email AS owner_email, \
                        COALESCE(AVG(r.rating)::float8, 0.0) AS rating, \
                        COUNT(r.id) AS review_count";

/// Provides CRUD and search operations for playgrounds.
pub struct PlaygroundRepo;

impl PlaygroundRepo {
    /// Insert a new playground, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePlayground) -> Result<Playground, sqlx::Error> {
        let query = format!(
            "INSERT INTO playgrounds
                (owner_id, name, description, address, city, state, zip_code,
                 price, sport_type, images, amenities)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Playground>(&query)
            .bind(input.owner_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.address)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.zip_code)
            .bind(input.price)
            .bind(&input.sport_type)
            .bind(&input.images)
            .bind(&input.amenities)
            .fetch_one(pool)
            .await
    }

    /// Find a playground by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Playground>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM playgrounds WHERE id = $1");
        sqlx::query_as::<_, Playground>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a playground with owner contact and review aggregates.
    pub async fn find_with_rating(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PlaygroundWithRating>, sqlx::Error> {
        let query = format!(
            "SELECT {RATED_COLUMNS}
             FROM playgrounds p
             JOIN users u ON u.id = p.owner_id
             LEFT JOIN reviews r ON r.playground_id = p.id
             WHERE p.id = $1
             GROUP BY p.id, u.name, u.email"
        );
        sqlx::query_as::<_, PlaygroundWithRating>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Search playgrounds. Every filter is optional; absent filters match
    /// everything. Newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &PlaygroundFilter,
    ) -> Result<Vec<PlaygroundWithRating>, sqlx::Error> {
        let query = format!(
            "SELECT {RATED_COLUMNS}
             FROM playgrounds p
             JOIN users u ON u.id = p.owner_id
             LEFT JOIN reviews r ON r.playground_id = p.id
             WHERE ($1::text IS NULL
                    OR p.name ILIKE '%' || $1 || '%'
                    OR p.description ILIKE '%' || $1 || '%')
               AND ($2::text IS NULL OR p.city = $2)
               AND ($3::text IS NULL OR p.sport_type = $3)
               AND ($4::float8 IS NULL OR p.price >= $4)
               AND ($5::float8 IS NULL OR p.price <= $5)
               AND ($6::boolean IS NULL OR p.is_available = $6)
             GROUP BY p.id, u.name, u.email
             ORDER BY p.created_at DESC"
        );
        sqlx::query_as::<_, PlaygroundWithRating>(&query)
            .bind(&filter.search)
            .bind(&filter.city)
            .bind(&filter.sport_type)
            .bind(filter.min_price)
            .bind(filter.max_price)
            .bind(filter.available)
            .fetch_all(pool)
            .await
    }

    /// List one owner's playgrounds with review aggregates, newest first.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<PlaygroundWithRating>, sqlx::Error> {
        let query = format!(
            "SELECT {RATED_COLUMNS}
             FROM playgrounds p
             JOIN users u ON u.id = p.owner_id
             LEFT JOIN reviews r ON r.playground_id = p.id
             WHERE p.owner_id = $1
             GROUP BY p.id, u.name, u.email
             ORDER BY p.created_at DESC"
        );
        sqlx::query_as::<_, PlaygroundWithRating>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Update a playground. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePlayground,
    ) -> Result<Option<Playground>, sqlx::Error> {
        let query = format!(
            "UPDATE playgrounds SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                address = COALESCE($4, address),
                city = COALESCE($5, city),
                state = COALESCE($6, state),
                zip_code = COALESCE($7, zip_code),
                price = COALESCE($8, price),
                sport_type = COALESCE($9, sport_type),
                images = COALESCE($10, images),
                amenities = COALESCE($11, amenities),
                is_available = COALESCE($12, is_available)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Playground>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.address)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.zip_code)
            .bind(input.price)
            .bind(&input.sport_type)
            .bind(&input.images)
            .bind(&input.amenities)
            .bind(input.is_available)
            .fetch_optional(pool)
            .await
    }

    /// Flip the availability flag, returning the updated row.
    pub async fn toggle_availability(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Playground>, sqlx::Error> {
        let query = format!(
            "UPDATE playgrounds SET is_available = NOT is_available
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Playground>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a playground and, via cascade, its bookings and reviews.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM playgrounds WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
