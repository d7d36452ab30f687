use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use chrono::{NaiveDate, NaiveTime};
use playrental_api::auth::jwt::JwtConfig;
use playrental_api::auth::password::hash_password;
use playrental_api::config::ServerConfig;
use playrental_api::routes;
use playrental_api::state::AppState;
use playrental_core::types::DbId;
use playrental_db::models::booking::{Booking, CreateBooking, CreateBookingOutcome};
use playrental_db::models::playground::{CreatePlayground, Playground};
use playrental_db::models::user::{CreateUser, User};
use playrental_db::repositories::{BookingRepo, PlaygroundRepo, UserRepo};

/// Build a test `ServerConfig` with safe defaults.
///
/// Email verification is NOT auto-skipped, so tests exercise the real
/// verification flow; helpers that need a ready account verify it
/// directly in the database.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-not-for-production".to_string(),
            expiry_days: 7,
        },
        cookie_secure: false,
        auth_auto_verify: false,
        app_url: "http://localhost:3000".to_string(),
        super_admin_email: None,
        super_admin_password: None,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses. No mailer is configured: email
/// sends become log lines.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let state = AppState {
        pool,
        config: Arc::new(config),
        mailer: None,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:3000".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request without authentication.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request with a bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body, without authentication.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body and a bearer token.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a bodyless POST request with a bearer token (cancel, mark-read, ...).
pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a PUT request with a JSON body and a bearer token.
pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a DELETE request with a bearer token.
pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = http_body_util::BodyExt::collect(response.into_body())
        .await
        .unwrap()
        .to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Account helpers
// ---------------------------------------------------------------------------

/// Create a verified user directly in the database and return the row plus
/// the plaintext password used.
pub async fn create_test_user(pool: &PgPool, email: &str, role: &str) -> (User, String) {
    let password = "test_password_123";
    let hashed = hash_password(password).expect("hashing should succeed");
    let user = UserRepo::create(
        pool,
        &CreateUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            password_hash: hashed,
            role: role.to_string(),
            verification_token: None,
        },
    )
    .await
    .expect("user creation should succeed");
    UserRepo::mark_email_verified(pool, user.id)
        .await
        .expect("verification should succeed");
    (user, password.to_string())
}

/// Log in via the API and return the session token from the body.
pub async fn login_user(app: Router, email: &str, password: &str) -> String {
    let body = serde_json::json!({ "email": email, "password": password });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["token"].as_str().expect("token in body").to_string()
}

// ---------------------------------------------------------------------------
// Fixture helpers
// ---------------------------------------------------------------------------

/// Insert an available football playground owned by `owner_id` directly in
/// the database.
pub async fn create_test_playground(
    pool: &PgPool,
    owner_id: DbId,
    name: &str,
    price: f64,
) -> Playground {
    PlaygroundRepo::create(
        pool,
        &CreatePlayground {
            owner_id,
            name: name.to_string(),
            description: "Floodlit artificial turf".to_string(),
            address: "12 Corniche Road".to_string(),
            city: "Cairo".to_string(),
            state: "Cairo".to_string(),
            zip_code: "11511".to_string(),
            price,
            sport_type: "football".to_string(),
            images: vec![],
            amenities: vec!["parking".to_string()],
        },
    )
    .await
    .expect("playground creation should succeed")
}

/// A booking date comfortably in the future.
pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2031, 6, 15).unwrap()
}

/// Insert a booking through the slot-checked path, panicking on conflict.
///
/// `start_hour`/`end_hour` are whole hours on [`test_date`]'s grid; the
/// amount is whatever the caller wants recorded (tests that exercise the
/// server-side quote go through the API instead).
pub async fn create_test_booking(
    pool: &PgPool,
    user_id: DbId,
    playground_id: DbId,
    start_hour: u32,
    end_hour: u32,
    total_amount: f64,
) -> Booking {
    let outcome = BookingRepo::create_slot_checked(
        pool,
        &CreateBooking {
            playground_id,
            user_id,
            date: test_date(),
            start_time: NaiveTime::from_hms_opt(start_hour, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end_hour, 0, 0).unwrap(),
            total_amount,
            notes: None,
        },
    )
    .await
    .expect("booking insert should succeed");
    match outcome {
        CreateBookingOutcome::Created(booking) => booking,
        other => panic!("expected booking to be created, got {other:?}"),
    }
}

/// Force a booking into the given status, bypassing the transition rules
/// enforced at the API layer.
pub async fn set_booking_status(pool: &PgPool, booking_id: DbId, status: &str) {
    BookingRepo::update_status(pool, booking_id, status)
        .await
        .expect("status update should succeed")
        .expect("booking must exist");
}
