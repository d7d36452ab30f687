//! Booking lifecycle handlers.
//!
//! Creation delegates the slot-conflict check to
//! [`BookingRepo::create_slot_checked`], which locks the playground row so
//! two players cannot take the same slot. Everything after the write
//! (notifications) is best-effort.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use playrental_core::error::CoreError;
use playrental_core::notifications::{KIND_BOOKING_CANCELLATION, KIND_BOOKING_CONFIRMATION};
use playrental_core::policy::{authorize, Action};
use playrental_core::pricing::quote;
use playrental_core::slots::{parse_time_of_day, validate_interval};
use playrental_core::status::BookingStatus;
use playrental_core::types::DbId;
use playrental_db::models::booking::{
    Booking, BookingWithCustomer, BookingWithPlayground, CreateBooking, CreateBookingOutcome,
};
use playrental_db::repositories::{BookingRepo, PlaygroundRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::notification::notify_best_effort;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireOwner;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request shapes
// ---------------------------------------------------------------------------

/// Body for `POST /api/bookings`. Times are `HH:MM` strings; the amount is
/// never taken from the client.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub playground_id: DbId,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub notes: Option<String>,
}

/// Body for `PUT /api/bookings/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/bookings
///
/// Book a slot. The interval must be forward, inside open hours, and free
/// of conflicts with non-cancelled bookings on the same playground-day.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Booking>>)> {
    // 1. Validate the requested interval.
    let start = parse_time_of_day(&input.start_time)?;
    let end = parse_time_of_day(&input.end_time)?;
    validate_interval(start, end)?;

    // 2. Price the booking from the playground's hourly rate. The fetch
    //    also gives us the owner to notify; availability is re-checked
    //    under lock in step 3.
    let playground = PlaygroundRepo::find_by_id(&state.pool, input.playground_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Playground not found".into()))?;
    let price = quote(playground.price, start, end);

    // 3. Atomic slot check and insert.
    let outcome = BookingRepo::create_slot_checked(
        &state.pool,
        &CreateBooking {
            playground_id: input.playground_id,
            user_id: auth.user_id,
            date: input.date,
            start_time: start,
            end_time: end,
            total_amount: price.total,
            notes: input.notes,
        },
    )
    .await?;

    let booking = match outcome {
        CreateBookingOutcome::Created(booking) => booking,
        CreateBookingOutcome::PlaygroundMissing => {
            return Err(AppError::NotFound("Playground not found".into()));
        }
        CreateBookingOutcome::PlaygroundUnavailable => {
            return Err(AppError::Core(CoreError::Conflict(
                "This playground is not available for booking".into(),
            )));
        }
        CreateBookingOutcome::SlotTaken => {
            return Err(AppError::Core(CoreError::Conflict(
                "This time slot is already booked".into(),
            )));
        }
    };

    tracing::info!(
        booking_id = booking.id,
        playground_id = playground.id,
        user_id = auth.user_id,
        total_amount = booking.total_amount,
        "Booking created"
    );

    // 4. Tell the owner.
    notify_best_effort(
        &state.pool,
        playground.owner_id,
        KIND_BOOKING_CONFIRMATION,
        format!("New booking for {} on {}", playground.name, booking.date),
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: booking })))
}

/// GET /api/bookings
///
/// The caller's own bookings, newest first, with playground and payment
/// context.
pub async fn list_own(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<BookingWithPlayground>>>> {
    let data = BookingRepo::list_for_user(&state.pool, auth.user_id).await?;

    Ok(Json(DataResponse { data }))
}

/// GET /api/owner/bookings
///
/// Bookings across all of the caller's playgrounds, with booker contact.
pub async fn list_for_owner(
    RequireOwner(owner): RequireOwner,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<BookingWithCustomer>>>> {
    let data = BookingRepo::list_for_owner(&state.pool, owner.user_id).await?;

    Ok(Json(DataResponse { data }))
}

/// POST /api/bookings/{id}/cancel
///
/// Cancel a booking and refund its completed payment, if any. Allowed for
/// the booker, the playground's owner, and super admins. Cancelling an
/// already-cancelled booking is a no-op.
pub async fn cancel(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Booking>>> {
    let detail = BookingRepo::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;
    authorize(
        &auth.actor(),
        Action::Cancel,
        "booking",
        &[detail.user_id, detail.playground_owner_id],
    )?;

    let already_cancelled = detail.status == BookingStatus::Cancelled.as_str();

    let booking = BookingRepo::cancel_with_refund(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;

    if !already_cancelled {
        tracing::info!(booking_id = id, cancelled_by = auth.user_id, "Booking cancelled");

        // Notify whichever side did not do the cancelling.
        let counterparty = if auth.user_id == detail.user_id {
            detail.playground_owner_id
        } else {
            detail.user_id
        };
        notify_best_effort(
            &state.pool,
            counterparty,
            KIND_BOOKING_CANCELLATION,
            format!(
                "Booking for {} on {} has been cancelled",
                detail.playground_name, detail.date
            ),
        )
        .await;
    }

    Ok(Json(DataResponse { data: booking }))
}

/// PUT /api/bookings/{id}/status
///
/// Set a booking's status. Same authorization as cancel; CANCELLED is
/// terminal, so transitions out of it are rejected.
pub async fn update_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<Json<DataResponse<Booking>>> {
    let next = BookingStatus::parse(&input.status)?;

    let detail = BookingRepo::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;
    authorize(
        &auth.actor(),
        Action::Update,
        "booking",
        &[detail.user_id, detail.playground_owner_id],
    )?;

    let current = BookingStatus::parse(&detail.status)?;
    if !current.can_transition_to(next) {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Cannot change a {} booking to {}",
            current.as_str(),
            next.as_str()
        ))));
    }

    let booking = BookingRepo::update_status(&state.pool, id, next.as_str())
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;
    tracing::info!(booking_id = id, status = next.as_str(), "Booking status updated");

    Ok(Json(DataResponse { data: booking }))
}

/// DELETE /api/bookings/{id}
///
/// Hard-delete a booking and, via cascades, its payment and review. Same
/// authorization as cancel.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let detail = BookingRepo::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;
    authorize(
        &auth.actor(),
        Action::Delete,
        "booking",
        &[detail.user_id, detail.playground_owner_id],
    )?;

    BookingRepo::delete(&state.pool, id).await?;
    tracing::info!(booking_id = id, "Booking deleted");

    Ok(StatusCode::NO_CONTENT)
}
