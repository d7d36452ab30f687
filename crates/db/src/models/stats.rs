//! Aggregate rows backing the dashboard stat cards.
//!
//! Revenue only counts CONFIRMED and COMPLETED bookings; pending and
//! cancelled ones never show up in money totals.

use playrental_core::types::Money;
use serde::Serialize;
use sqlx::FromRow;

/// Platform-wide totals for the admin dashboard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminStats {
    pub total_users: i64,
    pub total_playgrounds: i64,
    pub total_bookings: i64,
    pub total_revenue: Money,
}

/// Per-owner totals across all of their playgrounds.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OwnerStats {
    pub total_playgrounds: i64,
    pub total_bookings: i64,
    pub total_revenue: Money,
    /// Distinct players who have booked any of the owner's playgrounds.
    pub unique_players: i64,
}

/// A player's own booking counters.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlayerStats {
    pub total_bookings: i64,
    /// Non-cancelled bookings whose start lies in the future.
    pub upcoming_bookings: i64,
    pub completed_bookings: i64,
    pub cancelled_bookings: i64,
}
