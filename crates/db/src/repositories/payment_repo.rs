//! Repository for the `payments` table.

use playrental_core::types::DbId;
use sqlx::PgPool;

use crate::models::booking::Booking;
use crate::models::payment::{Payment, RecordPayment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, booking_id, user_id, amount, status, method, transaction_id, created_at, updated_at";

const BOOKING_COLUMNS: &str = "id, playground_id, user_id, date, start_time, end_time, status, \
                        total_amount, notes, created_at, updated_at";

/// Provides payment recording operations.
///
/// Payments are keyed on `booking_id`: a retry after a declined card
/// overwrites the failed attempt instead of stacking rows.
pub struct PaymentRepo;

impl PaymentRepo {
    /// Find the payment attached to a booking, if any.
    pub async fn find_by_booking(
        pool: &PgPool,
        booking_id: DbId,
    ) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM payments WHERE booking_id = $1");
        sqlx::query_as::<_, Payment>(&query)
            .bind(booking_id)
            .fetch_optional(pool)
            .await
    }

    /// Record a charge attempt, upserting on the booking.
    pub async fn record(pool: &PgPool, input: &RecordPayment) -> Result<Payment, sqlx::Error> {
        let query = format!(
            "INSERT INTO payments (booking_id, user_id, amount, status, method, transaction_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (booking_id) DO UPDATE SET
                amount = EXCLUDED.amount,
                status = EXCLUDED.status,
                method = EXCLUDED.method,
                transaction_id = EXCLUDED.transaction_id
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(input.booking_id)
            .bind(input.user_id)
            .bind(input.amount)
            .bind(&input.status)
            .bind(&input.method)
            .bind(&input.transaction_id)
            .fetch_one(pool)
            .await
    }

    /// Record a successful charge and confirm the booking in one
    /// transaction.
    ///
    /// Returns `None` if the booking vanished between the handler's checks
    /// and this write; nothing is persisted in that case.
    pub async fn record_success_and_confirm(
        pool: &PgPool,
        input: &RecordPayment,
    ) -> Result<Option<(Payment, Booking)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO payments (booking_id, user_id, amount, status, method, transaction_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (booking_id) DO UPDATE SET
                amount = EXCLUDED.amount,
                status = EXCLUDED.status,
                method = EXCLUDED.method,
                transaction_id = EXCLUDED.transaction_id
             RETURNING {COLUMNS}"
        );
        let payment = sqlx::query_as::<_, Payment>(&query)
            .bind(input.booking_id)
            .bind(input.user_id)
            .bind(input.amount)
            .bind(&input.status)
            .bind(&input.method)
            .bind(&input.transaction_id)
            .fetch_one(&mut *tx)
            .await?;

        let confirm = format!(
            "UPDATE bookings SET status = 'CONFIRMED' WHERE id = $1 RETURNING {BOOKING_COLUMNS}"
        );
        let booking = sqlx::query_as::<_, Booking>(&confirm)
            .bind(input.booking_id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(booking) = booking else {
            return Ok(None);
        };

        tx.commit().await?;
        Ok(Some((payment, booking)))
    }
}
