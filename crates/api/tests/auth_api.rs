//! Integration tests for the `/api/auth` endpoints: registration, login,
//! email verification, session introspection, and logout.

mod common;

use axum::http::{header, StatusCode};
use common::{body_json, create_test_user, get, get_auth, login_user, post_json, post_json_auth};
use playrental_core::roles::{ROLE_OWNER, ROLE_PLAYER};
use playrental_db::repositories::UserRepo;
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// A valid registration creates an unverified account and returns 201.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_creates_unverified_account(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response = post_json(
        app,
        "/api/auth/register",
        json!({
            "name": "Ahmed Hassan",
            "email": "ahmed@example.com",
            "password": "secure-password-1",
            "role": "PLAYER"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;

    assert!(json["message"]
        .as_str()
        .unwrap()
        .contains("check your email"));
    assert_eq!(json["user"]["name"], "Ahmed Hassan");
    assert_eq!(json["user"]["email"], "ahmed@example.com");
    assert_eq!(json["user"]["role"], "PLAYER");
    assert_eq!(json["user"]["is_email_verified"], false);
    // The password hash must never appear in API responses.
    assert!(json["user"].get("password_hash").is_none());

    // A verification token was stored for the email round-trip.
    let user = UserRepo::find_by_email(&pool, "ahmed@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(user.verification_token.is_some());
}

/// Registering omits the role defaults to PLAYER.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_defaults_to_player_role(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/auth/register",
        json!({
            "name": "No Role",
            "email": "norole@example.com",
            "password": "secure-password-1"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["user"]["role"], "PLAYER");
}

/// A duplicate email returns 409 Conflict.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_duplicate_email_conflicts(pool: PgPool) {
    create_test_user(&pool, "taken@example.com", ROLE_PLAYER).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/auth/register",
        json!({
            "name": "Second",
            "email": "taken@example.com",
            "password": "secure-password-1"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert!(json["error"].as_str().unwrap().contains("already exists"));
}

/// Passwords shorter than the minimum are rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_rejects_short_password(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/auth/register",
        json!({
            "name": "Shorty",
            "email": "short@example.com",
            "password": "seven77"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("at least 8"));
}

/// Malformed email addresses are rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_rejects_invalid_email(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/auth/register",
        json!({
            "name": "Bad Email",
            "email": "not-an-email",
            "password": "secure-password-1"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

/// SUPER_ADMIN can never be self-assigned at registration.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_rejects_super_admin_role(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/auth/register",
        json!({
            "name": "Sneaky",
            "email": "sneaky@example.com",
            "password": "secure-password-1",
            "role": "SUPER_ADMIN"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Invalid role"));
}

/// A blank name is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_rejects_blank_name(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/auth/register",
        json!({
            "name": "   ",
            "email": "blank@example.com",
            "password": "secure-password-1"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Name is required");
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Correct credentials return a token in the body and a session cookie.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_returns_token_and_cookie(pool: PgPool) {
    let (_, password) = create_test_user(&pool, "login@example.com", ROLE_PLAYER).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/auth/login",
        json!({ "email": "login@example.com", "password": password }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login must set the session cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));

    let json = body_json(response).await;
    assert!(json["token"].as_str().unwrap().contains('.')); // JWT shape
    assert_eq!(json["user"]["email"], "login@example.com");
}

/// A wrong password returns 401 without revealing which field was wrong.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_wrong_password_unauthorized(pool: PgPool) {
    create_test_user(&pool, "victim@example.com", ROLE_PLAYER).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/auth/login",
        json!({ "email": "victim@example.com", "password": "wrong-password-1" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid email or password");
}

/// An unknown email returns the same 401 as a bad password.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_unknown_email_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/auth/login",
        json!({ "email": "ghost@example.com", "password": "whatever-123" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid email or password");
}

/// An unverified account cannot log in.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_blocked_until_email_verified(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    // Register through the API so the account stays unverified.
    let response = post_json(
        app.clone(),
        "/api/auth/register",
        json!({
            "name": "Pending",
            "email": "pending@example.com",
            "password": "secure-password-1"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(
        app,
        "/api/auth/login",
        json!({ "email": "pending@example.com", "password": "secure-password-1" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("verify your email"));
}

// ---------------------------------------------------------------------------
// Email verification
// ---------------------------------------------------------------------------

/// The full verification round-trip: register, redeem the token, log in.
#[sqlx::test(migrations = "../db/migrations")]
async fn verify_email_enables_login(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response = post_json(
        app.clone(),
        "/api/auth/register",
        json!({
            "name": "Verify Me",
            "email": "verifyme@example.com",
            "password": "secure-password-1",
            "role": "OWNER"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Read the token straight from the database, as the email would carry it.
    let user = UserRepo::find_by_email(&pool, "verifyme@example.com")
        .await
        .unwrap()
        .unwrap();
    let token = user.verification_token.expect("token must be pending");

    let response = post_json(
        app.clone(),
        "/api/auth/verify-email",
        json!({ "token": token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["message"].as_str().unwrap().contains("verified"));

    // The token is single-use.
    let user = UserRepo::find_by_email(&pool, "verifyme@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(user.is_email_verified);
    assert!(user.verification_token.is_none());

    // Login now succeeds.
    let token = login_user(app, "verifyme@example.com", "secure-password-1").await;
    assert!(!token.is_empty());
}

/// An unknown verification token returns 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn verify_email_rejects_unknown_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/auth/verify-email",
        json!({ "token": "definitely-not-a-real-token" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Invalid or expired"));
}

/// Resending rotates the stored token.
#[sqlx::test(migrations = "../db/migrations")]
async fn resend_verification_rotates_token(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    post_json(
        app.clone(),
        "/api/auth/register",
        json!({
            "name": "Resend",
            "email": "resend@example.com",
            "password": "secure-password-1"
        }),
    )
    .await;

    let before = UserRepo::find_by_email(&pool, "resend@example.com")
        .await
        .unwrap()
        .unwrap()
        .verification_token
        .unwrap();

    let response = post_json(
        app,
        "/api/auth/resend-verification",
        json!({ "email": "resend@example.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let after = UserRepo::find_by_email(&pool, "resend@example.com")
        .await
        .unwrap()
        .unwrap()
        .verification_token
        .unwrap();
    assert_ne!(before, after, "resend must rotate the verification token");
}

/// Resending for an unknown email returns 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn resend_verification_unknown_email_not_found(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/auth/resend-verification",
        json!({ "email": "nobody@example.com" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Resending for an already verified account returns 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn resend_verification_already_verified(pool: PgPool) {
    create_test_user(&pool, "done@example.com", ROLE_OWNER).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/auth/resend-verification",
        json!({ "email": "done@example.com" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("already verified"));
}

// ---------------------------------------------------------------------------
// Session introspection and logout
// ---------------------------------------------------------------------------

/// GET /me returns the fresh profile for a valid token.
#[sqlx::test(migrations = "../db/migrations")]
async fn me_returns_current_profile(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "whoami@example.com", ROLE_PLAYER).await;
    let app = common::build_test_app(pool);

    let token = login_user(app.clone(), "whoami@example.com", &password).await;
    let response = get_auth(app, "/api/auth/me", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["email"], "whoami@example.com");
}

/// GET /me without a token returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn me_requires_authentication(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/auth/me").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A garbage bearer token returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn me_rejects_malformed_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/auth/me", "not.a.jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Logout clears the session cookie.
#[sqlx::test(migrations = "../db/migrations")]
async fn logout_clears_cookie(pool: PgPool) {
    let (_, password) = create_test_user(&pool, "bye@example.com", ROLE_PLAYER).await;
    let app = common::build_test_app(pool);

    let token = login_user(app.clone(), "bye@example.com", &password).await;
    let response = post_json_auth(app, "/api/auth/logout", &token, json!({})).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("logout must clear the cookie")
        .to_str()
        .unwrap();
    assert!(cookie.starts_with("token=;"));
    assert!(cookie.contains("Max-Age=0"));
}
