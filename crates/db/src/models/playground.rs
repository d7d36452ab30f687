//! Playground entity model and DTOs.

use playrental_core::types::{DbId, Money, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full playground row from the `playgrounds` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Playground {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    /// Hourly rate in EGP.
    pub price: Money,
    pub sport_type: String,
    pub images: Vec<String>,
    pub amenities: Vec<String>,
    pub is_available: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Playground joined with its owner and review aggregates, as returned by
/// list and detail endpoints.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlaygroundWithRating {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub price: Money,
    pub sport_type: String,
    pub images: Vec<String>,
    pub amenities: Vec<String>,
    pub is_available: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub owner_name: String,
    pub owner_email: String,
    /// Mean review rating; 0.0 when unreviewed.
    pub rating: f64,
    pub review_count: i64,
}

/// DTO for creating a playground. `owner_id` is filled from the session,
/// never from the request body.
#[derive(Debug)]
pub struct CreatePlayground {
    pub owner_id: DbId,
    pub name: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub price: Money,
    pub sport_type: String,
    pub images: Vec<String>,
    pub amenities: Vec<String>,
}

/// DTO for updating a playground. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePlayground {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub price: Option<Money>,
    pub sport_type: Option<String>,
    pub images: Option<Vec<String>>,
    pub amenities: Option<Vec<String>>,
    pub is_available: Option<bool>,
}

/// Query-string filters for the public playground list.
#[derive(Debug, Default, Deserialize)]
pub struct PlaygroundFilter {
    /// Case-insensitive substring match on name or description.
    pub search: Option<String>,
    pub city: Option<String>,
    pub sport_type: Option<String>,
    pub min_price: Option<Money>,
    pub max_price: Option<Money>,
    pub available: Option<bool>,
}
