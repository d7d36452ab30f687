//! Payment handler for the simulated card gateway.
//!
//! A successful charge records a COMPLETED payment and confirms the
//! booking in one transaction; a declined card records a FAILED payment
//! and surfaces 402. Retried charges upsert the same payment row.

use axum::extract::{Path, State};
use axum::Json;
use playrental_core::error::CoreError;
use playrental_core::notifications::KIND_PAYMENT_CONFIRMATION;
use playrental_core::payments::charge_card;
use playrental_core::status::{BookingStatus, PaymentStatus};
use playrental_core::types::DbId;
use playrental_db::models::booking::Booking;
use playrental_db::models::payment::{Payment, RecordPayment};
use playrental_db::repositories::{BookingRepo, PaymentRepo, UserRepo};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::email::BookingEmail;
use crate::error::{AppError, AppResult};
use crate::handlers::notification::notify_best_effort;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body for `POST /api/bookings/{id}/pay`. Only the card number drives the
/// simulated gateway; expiry and CVV never reach the server.
#[derive(Debug, Deserialize)]
pub struct PayRequest {
    pub card_number: String,
    #[serde(default = "default_method")]
    pub method: String,
}

fn default_method() -> String {
    "credit_card".to_string()
}

/// Response for a successful charge: the payment and the now-confirmed
/// booking.
#[derive(Debug, Serialize)]
pub struct PaymentReceipt {
    pub payment: Payment,
    pub booking: Booking,
}

/// POST /api/bookings/{id}/pay
///
/// Charge the caller's card for their own PENDING booking.
pub async fn pay(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<PayRequest>,
) -> AppResult<Json<DataResponse<PaymentReceipt>>> {
    // 1. The booking must exist and belong to the caller. Owners and
    //    admins manage bookings but never pay for someone else's.
    let detail = BookingRepo::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;
    if detail.user_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You don't have permission to pay for this booking".into(),
        )));
    }

    // 2. Only unpaid PENDING bookings are chargeable.
    if detail.status != BookingStatus::Pending.as_str() {
        return Err(AppError::Core(CoreError::Conflict(
            "Only pending bookings can be paid".into(),
        )));
    }
    if let Some(existing) = PaymentRepo::find_by_booking(&state.pool, id).await? {
        if existing.status == PaymentStatus::Completed.as_str() {
            return Err(AppError::Core(CoreError::Conflict(
                "This booking has already been paid".into(),
            )));
        }
    }

    // 3. Run the gateway. A decline is recorded as FAILED before the 402
    //    goes out, so the attempt shows up in the payment history.
    if let Err(err) = charge_card(&input.card_number) {
        if matches!(err, CoreError::PaymentDeclined(_)) {
            PaymentRepo::record(
                &state.pool,
                &RecordPayment {
                    booking_id: id,
                    user_id: auth.user_id,
                    amount: detail.total_amount,
                    status: PaymentStatus::Failed.as_str().to_string(),
                    method: input.method.clone(),
                    transaction_id: None,
                },
            )
            .await?;
            tracing::info!(booking_id = id, user_id = auth.user_id, "Payment declined");
        }
        return Err(err.into());
    }

    // 4. Record the charge and confirm the booking atomically.
    let transaction_id = format!("TXN-{:08}", rand::rng().random_range(0..100_000_000u32));
    let (payment, booking) = PaymentRepo::record_success_and_confirm(
        &state.pool,
        &RecordPayment {
            booking_id: id,
            user_id: auth.user_id,
            amount: detail.total_amount,
            status: PaymentStatus::Completed.as_str().to_string(),
            method: input.method,
            transaction_id: Some(transaction_id),
        },
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;

    tracing::info!(
        booking_id = id,
        user_id = auth.user_id,
        amount = payment.amount,
        transaction_id = payment.transaction_id.as_deref().unwrap_or(""),
        "Payment completed"
    );

    // 5. Tell the booker, in-app and by email. Neither may fail the charge.
    notify_best_effort(
        &state.pool,
        auth.user_id,
        KIND_PAYMENT_CONFIRMATION,
        format!(
            "Payment confirmed for {} on {}",
            detail.playground_name, detail.date
        ),
    )
    .await;
    send_confirmation_email(&state, &detail.playground_name, &booking).await;

    Ok(Json(DataResponse {
        data: PaymentReceipt { payment, booking },
    }))
}

/// Send the booking-confirmation email, logging instead of failing when no
/// mailer is configured or the send errors.
async fn send_confirmation_email(state: &AppState, playground_name: &str, booking: &Booking) {
    let Some(mailer) = &state.mailer else {
        tracing::info!(
            booking_id = booking.id,
            "SMTP not configured; skipping booking confirmation email"
        );
        return;
    };

    let user = match UserRepo::find_by_id(&state.pool, booking.user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return,
        Err(err) => {
            tracing::warn!(error = %err, booking_id = booking.id, "Failed to load booker for email");
            return;
        }
    };

    let details = BookingEmail {
        playground_name,
        date: booking.date.to_string(),
        start_time: booking.start_time.format("%H:%M").to_string(),
        end_time: booking.end_time.format("%H:%M").to_string(),
        total_amount: booking.total_amount,
        booking_url: format!("{}/dashboard/bookings", state.config.app_url),
    };
    if let Err(err) = mailer
        .send_booking_confirmation(&user.email, &user.name, &details)
        .await
    {
        tracing::warn!(error = %err, booking_id = booking.id, "Failed to send booking confirmation email");
    }
}
