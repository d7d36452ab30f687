//! Review handlers.
//!
//! A review is anchored to a COMPLETED booking by the reviewer on the
//! reviewed playground; `uq_reviews_booking_id` backs the one-review-per-
//! booking rule at the database level.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use playrental_core::error::CoreError;
use playrental_core::notifications::KIND_REVIEW_RECEIVED;
use playrental_core::status::BookingStatus;
use playrental_core::types::DbId;
use playrental_db::models::review::{CreateReview, Review, ReviewWithAuthor, ReviewWithPlayground};
use playrental_db::repositories::{BookingRepo, PlaygroundRepo, ReviewRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::notification::notify_best_effort;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Lowest accepted rating.
pub const MIN_RATING: i32 = 1;
/// Highest accepted rating.
pub const MAX_RATING: i32 = 5;

/// Body for `POST /api/playgrounds/{id}/reviews`.
#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub booking_id: DbId,
    pub rating: i32,
    pub comment: Option<String>,
}

/// POST /api/playgrounds/{id}/reviews
///
/// Leave a review. The booking must be the caller's, on this playground,
/// and COMPLETED; one review per booking.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(playground_id): Path<DbId>,
    Json(input): Json<CreateReviewRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Review>>)> {
    // 1. Rating bounds.
    if !(MIN_RATING..=MAX_RATING).contains(&input.rating) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}"
        ))));
    }

    // 2. The playground and the anchoring booking must both exist.
    let playground = PlaygroundRepo::find_by_id(&state.pool, playground_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Playground not found".into()))?;
    let booking = BookingRepo::find_by_id(&state.pool, input.booking_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;

    // 3. The booking anchors this review: caller's own, on this
    //    playground, and already played.
    if booking.user_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only review your own bookings".into(),
        )));
    }
    if booking.playground_id != playground.id {
        return Err(AppError::Core(CoreError::Validation(
            "Booking does not match this playground".into(),
        )));
    }
    if booking.status != BookingStatus::Completed.as_str() {
        return Err(AppError::Core(CoreError::Conflict(
            "You can only review completed bookings".into(),
        )));
    }

    // 4. One review per booking. The unique constraint catches races.
    if ReviewRepo::find_by_booking(&state.pool, booking.id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "You have already reviewed this booking".into(),
        )));
    }

    let review = ReviewRepo::create(
        &state.pool,
        &CreateReview {
            booking_id: booking.id,
            playground_id: playground.id,
            user_id: auth.user_id,
            rating: input.rating,
            comment: input.comment,
        },
    )
    .await?;

    tracing::info!(
        review_id = review.id,
        playground_id = playground.id,
        rating = review.rating,
        "Review created"
    );

    notify_best_effort(
        &state.pool,
        playground.owner_id,
        KIND_REVIEW_RECEIVED,
        format!("New review for {}", playground.name),
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: review })))
}

/// GET /api/playgrounds/{id}/reviews
///
/// Public list of a playground's reviews, newest first.
pub async fn list_for_playground(
    State(state): State<AppState>,
    Path(playground_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ReviewWithAuthor>>>> {
    PlaygroundRepo::find_by_id(&state.pool, playground_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Playground not found".into()))?;

    let data = ReviewRepo::list_for_playground(&state.pool, playground_id).await?;

    Ok(Json(DataResponse { data }))
}

/// GET /api/reviews
///
/// The caller's own reviews with playground names, newest first.
pub async fn list_own(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ReviewWithPlayground>>>> {
    let data = ReviewRepo::list_for_user(&state.pool, auth.user_id).await?;

    Ok(Json(DataResponse { data }))
}
