//! Repository for the `bookings` table.
//!
//! Booking creation is the one write in the system with a real race: two
//! players grabbing the same slot. [`BookingRepo::create_slot_checked`]
//! takes a row lock on the playground so the conflict check and the insert
//! happen atomically with respect to other writers of the same playground.

use chrono::NaiveDate;
use playrental_core::types::DbId;
use sqlx::PgPool;

use crate::models::booking::{
    Booking, BookingDetail, BookingWithCustomer, BookingWithPlayground, CreateBooking,
    CreateBookingOutcome,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, playground_id, user_id, date, start_time, end_time, status, \
                        total_amount, notes, created_at, updated_at";

/// Booking columns qualified for joined queries.
const QUALIFIED: &str = "b.id, b.playground_id, b.user_id, b.date, b.start_time, b.end_time, \
                        b.status, b.total_amount, b.notes, b.created_at, b.updated_at";

/// Provides booking lifecycle operations.
pub struct BookingRepo;

impl BookingRepo {
    /// Atomically check the requested slot and insert the booking.
    ///
    /// Locks the playground row with `SELECT ... FOR UPDATE`, which
    /// serializes concurrent booking attempts per playground. Under two
    /// racing requests for the same slot, exactly one sees `Created` and
    /// the other `SlotTaken`.
    ///
    /// The conflict predicate treats intervals as half-open: an existing
    /// booking conflicts when it covers the requested start, covers the
    /// requested end, or lies entirely inside the requested interval.
    /// Cancelled bookings never block a slot.
    pub async fn create_slot_checked(
        pool: &PgPool,
        input: &CreateBooking,
    ) -> Result<CreateBookingOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // 1. Lock the playground row; dropping the tx on early return
        //    releases the lock without writing anything.
        let playground: Option<(bool,)> =
            sqlx::query_as("SELECT is_available FROM playgrounds WHERE id = $1 FOR UPDATE")
                .bind(input.playground_id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((is_available,)) = playground else {
            return Ok(CreateBookingOutcome::PlaygroundMissing);
        };
        if !is_available {
            return Ok(CreateBookingOutcome::PlaygroundUnavailable);
        }

        // 2. Overlap check against non-cancelled bookings on the same day.
        let conflict: Option<(DbId,)> = sqlx::query_as(
            "SELECT id FROM bookings
             WHERE playground_id = $1
               AND date = $2
               AND status <> 'CANCELLED'
               AND ((start_time <= $3 AND end_time > $3)
                 OR (start_time < $4 AND end_time >= $4)
                 OR (start_time >= $3 AND end_time <= $4))
             LIMIT 1",
        )
        .bind(input.playground_id)
        .bind(input.date)
        .bind(input.start_time)
        .bind(input.end_time)
        .fetch_optional(&mut *tx)
        .await?;
        if conflict.is_some() {
            return Ok(CreateBookingOutcome::SlotTaken);
        }

        // 3. Insert as PENDING; payment confirms it later.
        let query = format!(
            "INSERT INTO bookings
                (playground_id, user_id, date, start_time, end_time, status, total_amount, notes)
             VALUES ($1, $2, $3, $4, $5, 'PENDING', $6, $7)
             RETURNING {COLUMNS}"
        );
        let booking = sqlx::query_as::<_, Booking>(&query)
            .bind(input.playground_id)
            .bind(input.user_id)
            .bind(input.date)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.total_amount)
            .bind(&input.notes)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(CreateBookingOutcome::Created(booking))
    }

    /// Find a booking by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a booking together with its playground's name and owner, for
    /// permission checks and notification fan-out.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<BookingDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {QUALIFIED}, p.name AS playground_name, p.owner_id AS playground_owner_id
             FROM bookings b
             JOIN playgrounds p ON p.id = b.playground_id
             WHERE b.id = $1"
        );
        sqlx::query_as::<_, BookingDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// A player's own bookings, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<BookingWithPlayground>, sqlx::Error> {
        let query = format!(
            "SELECT {QUALIFIED}, p.name AS playground_name, p.city AS playground_city,
                    p.sport_type, pay.status AS payment_status
             FROM bookings b
             JOIN playgrounds p ON p.id = b.playground_id
             LEFT JOIN payments pay ON pay.booking_id = b.id
             WHERE b.user_id = $1
             ORDER BY b.created_at DESC"
        );
        sqlx::query_as::<_, BookingWithPlayground>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// All bookings across one owner's playgrounds, newest first.
    pub async fn list_for_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<BookingWithCustomer>, sqlx::Error> {
        let query = format!(
            "SELECT {QUALIFIED}, p.name AS playground_name,
                    u.name AS customer_name, u.email AS customer_email,
                    pay.status AS payment_status
             FROM bookings b
             JOIN playgrounds p ON p.id = b.playground_id
             JOIN users u ON u.id = b.user_id
             LEFT JOIN payments pay ON pay.booking_id = b.id
             WHERE p.owner_id = $1
             ORDER BY b.created_at DESC"
        );
        sqlx::query_as::<_, BookingWithCustomer>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Every booking on the platform, newest first. Admin only.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<BookingWithCustomer>, sqlx::Error> {
        let query = format!(
            "SELECT {QUALIFIED}, p.name AS playground_name,
                    u.name AS customer_name, u.email AS customer_email,
                    pay.status AS payment_status
             FROM bookings b
             JOIN playgrounds p ON p.id = b.playground_id
             JOIN users u ON u.id = b.user_id
             LEFT JOIN payments pay ON pay.booking_id = b.id
             ORDER BY b.created_at DESC"
        );
        sqlx::query_as::<_, BookingWithCustomer>(&query)
            .fetch_all(pool)
            .await
    }

    /// Non-cancelled bookings for one playground-day, used to grey out
    /// taken slots in the picker.
    pub async fn list_for_playground_date(
        pool: &PgPool,
        playground_id: DbId,
        date: NaiveDate,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bookings
             WHERE playground_id = $1 AND date = $2 AND status <> 'CANCELLED'
             ORDER BY start_time"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(playground_id)
            .bind(date)
            .fetch_all(pool)
            .await
    }

    /// Set a booking's status, returning the updated row.
    ///
    /// Status transition rules are enforced by the caller; this is a plain
    /// write.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("UPDATE bookings SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Cancel a booking and refund its completed payment, if any, in one
    /// transaction.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn cancel_with_refund(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE bookings SET status = 'CANCELLED' WHERE id = $1 RETURNING {COLUMNS}"
        );
        let booking = sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(booking) = booking else {
            return Ok(None);
        };

        // Failed charges stay failed; only money actually taken is refunded.
        sqlx::query(
            "UPDATE payments SET status = 'REFUNDED'
             WHERE booking_id = $1 AND status = 'COMPLETED'",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(booking))
    }

    /// Hard-delete a booking and, via cascade, its payment and review.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
