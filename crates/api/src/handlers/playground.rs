//! Playground handlers: public browsing, slot availability, and the
//! owner-facing CRUD.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use playrental_core::error::CoreError;
use playrental_core::images::validate_image_payload;
use playrental_core::policy::{authorize, Action};
use playrental_core::slots::{hourly_slots, overlaps};
use playrental_core::types::{DbId, Money};
use playrental_db::models::playground::{
    CreatePlayground, Playground, PlaygroundFilter, PlaygroundWithRating, UpdatePlayground,
};
use playrental_db::models::review::ReviewWithAuthor;
use playrental_db::repositories::{BookingRepo, PlaygroundRepo, ReviewRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireOwner;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response shapes
// ---------------------------------------------------------------------------

/// Body for `POST /api/playgrounds`. The owner is always the session user.
#[derive(Debug, Deserialize)]
pub struct CreatePlaygroundRequest {
    pub name: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub price: Money,
    pub sport_type: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

/// Public detail response: the playground plus its reviews, newest first.
#[derive(Debug, Serialize)]
pub struct PlaygroundDetail {
    #[serde(flatten)]
    pub playground: PlaygroundWithRating,
    pub reviews: Vec<ReviewWithAuthor>,
}

/// Query string for the slot-availability endpoint.
#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    pub date: NaiveDate,
}

/// One entry in the hourly availability grid.
#[derive(Debug, Serialize)]
pub struct SlotView {
    pub start_time: String,
    pub end_time: String,
    pub available: bool,
}

// ---------------------------------------------------------------------------
// Public handlers
// ---------------------------------------------------------------------------

/// GET /api/playgrounds
///
/// Public search across all playgrounds. Every query parameter is
/// optional; see [`PlaygroundFilter`].
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<PlaygroundFilter>,
) -> AppResult<Json<DataResponse<Vec<PlaygroundWithRating>>>> {
    let data = PlaygroundRepo::list(&state.pool, &filter).await?;

    Ok(Json(DataResponse { data }))
}

/// GET /api/playgrounds/{id}
///
/// Public detail with owner contact, rating aggregates, and reviews.
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PlaygroundDetail>>> {
    let playground = PlaygroundRepo::find_with_rating(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Playground not found".into()))?;
    let reviews = ReviewRepo::list_for_playground(&state.pool, id).await?;

    Ok(Json(DataResponse {
        data: PlaygroundDetail {
            playground,
            reviews,
        },
    }))
}

/// GET /api/playgrounds/{id}/slots?date=YYYY-MM-DD
///
/// The hourly slot grid for one day. A slot is unavailable when any
/// non-cancelled booking overlaps it; adjacency does not conflict.
pub async fn slots(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(query): Query<SlotsQuery>,
) -> AppResult<Json<DataResponse<Vec<SlotView>>>> {
    // 1. The playground must exist; availability is irrelevant for viewing.
    PlaygroundRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Playground not found".into()))?;

    // 2. Grey out each hourly slot that an existing booking overlaps.
    let bookings = BookingRepo::list_for_playground_date(&state.pool, id, query.date).await?;
    let data = hourly_slots()
        .into_iter()
        .map(|(start, end)| SlotView {
            start_time: start.format("%H:%M").to_string(),
            end_time: end.format("%H:%M").to_string(),
            available: !bookings
                .iter()
                .any(|b| overlaps(start, end, b.start_time, b.end_time)),
        })
        .collect();

    Ok(Json(DataResponse { data }))
}

// ---------------------------------------------------------------------------
// Owner handlers
// ---------------------------------------------------------------------------

/// POST /api/playgrounds
///
/// Create a listing. OWNER role only; the image payload shares one size
/// budget across all images.
pub async fn create(
    RequireOwner(owner): RequireOwner,
    State(state): State<AppState>,
    Json(input): Json<CreatePlaygroundRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Playground>>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Name is required".into(),
        )));
    }
    if input.price <= 0.0 {
        return Err(AppError::Core(CoreError::Validation(
            "Price must be greater than zero".into(),
        )));
    }
    validate_image_payload(&input.images)?;

    let playground = PlaygroundRepo::create(
        &state.pool,
        &CreatePlayground {
            owner_id: owner.user_id,
            name: input.name,
            description: input.description,
            address: input.address,
            city: input.city,
            state: input.state,
            zip_code: input.zip_code,
            price: input.price,
            sport_type: input.sport_type,
            images: input.images,
            amenities: input.amenities,
        },
    )
    .await?;

    tracing::info!(
        playground_id = playground.id,
        owner_id = owner.user_id,
        "Playground created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: playground })))
}

/// GET /api/owner/playgrounds
///
/// The caller's own listings with rating aggregates.
pub async fn list_owned(
    RequireOwner(owner): RequireOwner,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<PlaygroundWithRating>>>> {
    let data = PlaygroundRepo::list_by_owner(&state.pool, owner.user_id).await?;

    Ok(Json(DataResponse { data }))
}

/// PUT /api/playgrounds/{id}
///
/// Update a listing. Owner-of-record or super admin.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePlayground>,
) -> AppResult<Json<DataResponse<Playground>>> {
    let existing = PlaygroundRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Playground not found".into()))?;
    authorize(
        &auth.actor(),
        Action::Update,
        "playground",
        &[existing.owner_id],
    )?;

    if let Some(images) = &input.images {
        validate_image_payload(images)?;
    }
    if let Some(price) = input.price {
        if price <= 0.0 {
            return Err(AppError::Core(CoreError::Validation(
                "Price must be greater than zero".into(),
            )));
        }
    }

    let playground = PlaygroundRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::NotFound("Playground not found".into()))?;

    Ok(Json(DataResponse { data: playground }))
}

/// POST /api/playgrounds/{id}/toggle-availability
///
/// Flip the listing's availability flag. Owner-of-record or super admin.
pub async fn toggle_availability(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Playground>>> {
    let existing = PlaygroundRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Playground not found".into()))?;
    authorize(
        &auth.actor(),
        Action::Update,
        "playground",
        &[existing.owner_id],
    )?;

    let playground = PlaygroundRepo::toggle_availability(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Playground not found".into()))?;

    tracing::info!(
        playground_id = id,
        is_available = playground.is_available,
        "Playground availability toggled"
    );

    Ok(Json(DataResponse { data: playground }))
}

/// DELETE /api/playgrounds/{id}
///
/// Remove a listing and, via cascades, its bookings, payments, and
/// reviews. Owner-of-record or super admin.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = PlaygroundRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Playground not found".into()))?;
    authorize(
        &auth.actor(),
        Action::Delete,
        "playground",
        &[existing.owner_id],
    )?;

    PlaygroundRepo::delete(&state.pool, id).await?;
    tracing::info!(playground_id = id, "Playground deleted");

    Ok(StatusCode::NO_CONTENT)
}
