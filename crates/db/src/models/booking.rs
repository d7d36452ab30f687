//! Booking entity model and DTOs.

use chrono::{NaiveDate, NaiveTime};
use playrental_core::types::{DbId, Money, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full booking row from the `bookings` table.
///
/// `start_time`/`end_time` form a half-open interval on `date`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: DbId,
    pub playground_id: DbId,
    pub user_id: DbId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: String,
    pub total_amount: Money,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Booking joined with playground context and payment state, as shown on a
/// player's own booking list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BookingWithPlayground {
    pub id: DbId,
    pub playground_id: DbId,
    pub user_id: DbId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: String,
    pub total_amount: Money,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub playground_name: String,
    pub playground_city: String,
    pub sport_type: String,
    /// Payment status when a payment row exists.
    pub payment_status: Option<String>,
}

/// Booking joined with both the playground and the player who booked it;
/// the owner and admin list shape.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BookingWithCustomer {
    pub id: DbId,
    pub playground_id: DbId,
    pub user_id: DbId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: String,
    pub total_amount: Money,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub playground_name: String,
    pub customer_name: String,
    pub customer_email: String,
    pub payment_status: Option<String>,
}

/// Booking plus the owning playground's name and owner, fetched together
/// for permission checks and notification fan-out.
#[derive(Debug, Clone, FromRow)]
pub struct BookingDetail {
    pub id: DbId,
    pub playground_id: DbId,
    pub user_id: DbId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: String,
    pub total_amount: Money,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub playground_name: String,
    pub playground_owner_id: DbId,
}

/// DTO for inserting a booking. The amount is the server-side quote, never
/// a client figure.
#[derive(Debug)]
pub struct CreateBooking {
    pub playground_id: DbId,
    pub user_id: DbId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub total_amount: Money,
    pub notes: Option<String>,
}

/// Result of the locked slot-check-and-insert.
#[derive(Debug)]
pub enum CreateBookingOutcome {
    Created(Booking),
    PlaygroundMissing,
    PlaygroundUnavailable,
    SlotTaken,
}
