//! Handlers for the `/auth` resource (register, login, logout, me,
//! email verification).

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use playrental_core::error::CoreError;
use playrental_core::roles::{validate_registration_role, ROLE_PLAYER};
use playrental_db::models::user::{CreateUser, User, UserResponse};
use playrental_db::repositories::UserRepo;
use serde::Deserialize;
use validator::ValidateEmail;

use crate::auth::cookie::{clear_session_cookie, session_cookie};
use crate::auth::jwt::{generate_token, generate_verification_token};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// `"PLAYER"` (default) or `"OWNER"`. `SUPER_ADMIN` cannot be
    /// self-assigned.
    pub role: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/verify-email`.
#[derive(Debug, Deserialize)]
pub struct VerifyEmailRequest {
    pub token: String,
}

/// Request body for `POST /auth/resend-verification`.
#[derive(Debug, Deserialize)]
pub struct ResendVerificationRequest {
    pub email: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Create a PLAYER or OWNER account and send the verification email.
/// A failure to send the email is logged and swallowed -- the account is
/// created either way and the token can be re-sent later.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    // 1. Field validation.
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Name is required".into(),
        )));
    }
    if !input.email.validate_email() {
        return Err(AppError::Core(CoreError::Validation(
            "Please provide a valid email address".into(),
        )));
    }
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let role = input.role.as_deref().unwrap_or(ROLE_PLAYER);
    validate_registration_role(role)?;

    // 2. Friendly duplicate check; the uq_users_email constraint backstops
    //    a racing registration.
    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "An account with this email already exists".into(),
        )));
    }

    // 3. Create the account with a pending verification token.
    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let token = generate_verification_token();

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: input.name.trim().to_string(),
            email: input.email.clone(),
            password_hash: hashed,
            role: role.to_string(),
            verification_token: Some(token.clone()),
        },
    )
    .await?;

    // 4. Dev mode skips the email round-trip entirely.
    if state.config.auth_auto_verify {
        UserRepo::mark_email_verified(&state.pool, user.id).await?;
        tracing::info!(user_id = user.id, "Auto-verified new account (AUTH_AUTO_VERIFY)");
    } else if let Err(e) = send_verification(&state, &user, &token).await {
        // Swallowed: the player can resend from the login screen.
        tracing::warn!(user_id = user.id, error = %e, "Failed to send verification email");
    }

    let body = serde_json::json!({
        "message": "Registration successful. Please check your email to verify your account.",
        "user": UserResponse::from(user),
    });
    Ok((StatusCode::CREATED, Json(body)))
}

/// POST /api/auth/login
///
/// Verify credentials, enforce email verification, and establish the
/// session cookie. The token is also returned in the body for API clients
/// that prefer an `Authorization: Bearer` header.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    // 1. Find user by email. Same message for unknown email and bad
    //    password, so the response does not leak which one was wrong.
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    // 2. Verify password.
    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    // 3. Enforce email verification, unless dev mode verifies in place.
    if !user.is_email_verified {
        if state.config.auth_auto_verify {
            UserRepo::mark_email_verified(&state.pool, user.id).await?;
            tracing::info!(user_id = user.id, "Auto-verified account at login (AUTH_AUTO_VERIFY)");
        } else {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Please verify your email before logging in".into(),
            )));
        }
    }

    // 4. Issue the session token and cookie.
    let token = generate_token(user.id, &user.email, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let cookie = session_cookie(
        &token,
        state.config.jwt.expiry_secs(),
        state.config.cookie_secure,
    );

    let body = serde_json::json!({
        "token": token,
        "user": UserResponse::from(user),
    });
    Ok(([(header::SET_COOKIE, cookie)], Json(body)))
}

/// POST /api/auth/logout
///
/// Clear the session cookie. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let cookie = clear_session_cookie(state.config.cookie_secure);
    (StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)])
}

/// GET /api/auth/me
///
/// Return the authenticated user's current profile. Reads the database
/// rather than trusting the token, so profile edits show up immediately.
pub async fn me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    Ok(Json(serde_json::json!({ "user": UserResponse::from(user) })))
}

/// POST /api/auth/verify-email
///
/// Redeem a verification token: mark the account verified and clear the
/// token. Unknown or already-used tokens return 400.
pub async fn verify_email(
    State(state): State<AppState>,
    Json(input): Json<VerifyEmailRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let user = UserRepo::find_by_verification_token(&state.pool, &input.token)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "Invalid or expired verification token".into(),
            ))
        })?;

    UserRepo::mark_email_verified(&state.pool, user.id).await?;
    tracing::info!(user_id = user.id, "Email verified");

    Ok(Json(serde_json::json!({
        "message": "Email verified successfully. You can now log in."
    })))
}

/// POST /api/auth/resend-verification
///
/// Rotate the verification token and send a fresh email. Unlike
/// registration, a send failure here is surfaced as an error -- resending
/// was the whole point of the request.
pub async fn resend_verification(
    State(state): State<AppState>,
    Json(input): Json<ResendVerificationRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| AppError::NotFound("No account found with this email".into()))?;

    if user.is_email_verified {
        return Err(AppError::Core(CoreError::Validation(
            "Email is already verified".into(),
        )));
    }

    let token = generate_verification_token();
    UserRepo::set_verification_token(&state.pool, user.id, &token).await?;

    send_verification(&state, &user, &token)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to send verification email: {e}")))?;

    Ok(Json(serde_json::json!({
        "message": "Verification email sent. Please check your inbox."
    })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Send the verification email, or log the URL when no mailer is
/// configured (local development).
async fn send_verification(
    state: &AppState,
    user: &User,
    token: &str,
) -> Result<(), crate::email::EmailError> {
    let url = format!("{}/verify-email?token={token}", state.config.app_url);

    match &state.mailer {
        Some(mailer) => {
            mailer
                .send_verification_email(&user.email, &user.name, &url)
                .await
        }
        None => {
            tracing::info!(email = %user.email, url, "SMTP not configured; verification URL");
            Ok(())
        }
    }
}
