//! Aggregate queries backing the dashboard stat cards.
//!
//! Each method is a single round-trip; the totals are computed in SQL
//! rather than by loading rows and counting in Rust.

use playrental_core::types::DbId;
use sqlx::PgPool;

use crate::models::stats::{AdminStats, OwnerStats, PlayerStats};

/// Provides read-only aggregates for the admin, owner, and player
/// dashboards.
pub struct StatsRepo;

impl StatsRepo {
    /// Platform-wide totals. Revenue counts CONFIRMED and COMPLETED
    /// bookings only.
    pub async fn admin_totals(pool: &PgPool) -> Result<AdminStats, sqlx::Error> {
        sqlx::query_as::<_, AdminStats>(
            "SELECT
                (SELECT COUNT(*) FROM users) AS total_users,
                (SELECT COUNT(*) FROM playgrounds) AS total_playgrounds,
                (SELECT COUNT(*) FROM bookings) AS total_bookings,
                COALESCE((SELECT SUM(total_amount) FROM bookings
                          WHERE status IN ('CONFIRMED', 'COMPLETED')), 0.0)::float8
                    AS total_revenue",
        )
        .fetch_one(pool)
        .await
    }

    /// Totals across one owner's playgrounds.
    pub async fn owner_totals(pool: &PgPool, owner_id: DbId) -> Result<OwnerStats, sqlx::Error> {
        sqlx::query_as::<_, OwnerStats>(
            "SELECT
                (SELECT COUNT(*) FROM playgrounds WHERE owner_id = $1) AS total_playgrounds,
                COUNT(b.id) AS total_bookings,
                COALESCE(SUM(b.total_amount)
                    FILTER (WHERE b.status IN ('CONFIRMED', 'COMPLETED')), 0.0)::float8
                    AS total_revenue,
                COUNT(DISTINCT b.user_id) AS unique_players
             FROM bookings b
             JOIN playgrounds p ON p.id = b.playground_id
             WHERE p.owner_id = $1",
        )
        .bind(owner_id)
        .fetch_one(pool)
        .await
    }

    /// A player's own booking counters. "Upcoming" means a non-cancelled
    /// booking whose start instant is still in the future.
    pub async fn player_totals(pool: &PgPool, user_id: DbId) -> Result<PlayerStats, sqlx::Error> {
        sqlx::query_as::<_, PlayerStats>(
            "SELECT
                COUNT(*) AS total_bookings,
                COUNT(*) FILTER (
                    WHERE status <> 'CANCELLED'
                      AND (date + start_time) > NOW()
                ) AS upcoming_bookings,
                COUNT(*) FILTER (WHERE status = 'COMPLETED') AS completed_bookings,
                COUNT(*) FILTER (WHERE status = 'CANCELLED') AS cancelled_bookings
             FROM bookings
             WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }
}
