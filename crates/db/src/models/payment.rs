//! Payment entity model and DTOs.

use playrental_core::types::{DbId, Money, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full payment row from the `payments` table. At most one exists per
/// booking; retried charges overwrite the previous attempt.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payment {
    pub id: DbId,
    pub booking_id: DbId,
    pub user_id: DbId,
    pub amount: Money,
    pub status: String,
    pub method: String,
    pub transaction_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a charge attempt against a booking.
#[derive(Debug)]
pub struct RecordPayment {
    pub booking_id: DbId,
    pub user_id: DbId,
    pub amount: Money,
    pub status: String,
    pub method: String,
    pub transaction_id: Option<String>,
}
