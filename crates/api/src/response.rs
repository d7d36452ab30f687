//! Shared response envelope for resource handlers.
//!
//! Resource endpoints wrap their payload in `{ "data": ... }`; the typed
//! [`DataResponse`] keeps that shape consistent without ad-hoc
//! `serde_json::json!` calls. Auth endpoints return bespoke shapes (token,
//! user, message) and skip the envelope.

use serde::Serialize;

/// The `{ "data": T }` envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: bookings }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
