//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use playrental_core::error::CoreError;
use playrental_core::policy::Actor;
use playrental_core::types::DbId;

use crate::auth::cookie::token_from_cookie_header;
use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from the session.
///
/// The token is read from the HTTP-only `token` cookie first (browser
/// clients), then from an `Authorization: Bearer` header (API clients).
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The user's email address at token issue time.
    pub email: String,
    /// The user's role name (`"PLAYER"`, `"OWNER"`, `"SUPER_ADMIN"`).
    pub role: String,
}

impl AuthUser {
    /// View this session as a capability-check [`Actor`].
    pub fn actor(&self) -> Actor {
        Actor::new(self.user_id, &self.role)
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(parts).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Authentication required".into()))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        })
    }
}

/// Locate the session token in the request: `token` cookie, then Bearer header.
fn session_token(parts: &Parts) -> Option<&str> {
    let from_cookie = parts
        .headers
        .get("cookie")
        .and_then(|v| v.to_str().ok())
        .and_then(token_from_cookie_header);

    from_cookie.or_else(|| {
        parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
    })
}
