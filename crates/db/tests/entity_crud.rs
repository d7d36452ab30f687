//! Integration tests for the repository layer against a real database:
//! - User, playground, and booking CRUD
//! - Slot conflict outcomes under the locked check-and-insert
//! - Payment upsert and cancel-with-refund transactions
//! - Review uniqueness per booking
//! - Cascade delete behaviour
//! - Notification scoping

use assert_matches::assert_matches;
use chrono::{Days, NaiveDate, NaiveTime, Utc};
use sqlx::PgPool;

use playrental_db::models::booking::{CreateBooking, CreateBookingOutcome};
use playrental_db::models::notification::CreateNotification;
use playrental_db::models::payment::RecordPayment;
use playrental_db::models::playground::{CreatePlayground, PlaygroundFilter};
use playrental_db::models::review::CreateReview;
use playrental_db::models::user::CreateUser;
use playrental_db::repositories::{
    BookingRepo, NotificationRepo, PaymentRepo, PlaygroundRepo, ReviewRepo, StatsRepo, UserRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_user(email: &str, role: &str) -> CreateUser {
    CreateUser {
        name: "Test User".to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$fake".to_string(),
        role: role.to_string(),
        verification_token: None,
    }
}

fn new_playground(owner_id: i64, name: &str, city: &str, price: f64) -> CreatePlayground {
    CreatePlayground {
        owner_id,
        name: name.to_string(),
        description: "Floodlit five-a-side pitch".to_string(),
        address: "12 Corniche Rd".to_string(),
        city: city.to_string(),
        state: "Cairo".to_string(),
        zip_code: "11511".to_string(),
        price,
        sport_type: "football".to_string(),
        images: vec!["data:image/png;base64,AAAA".to_string()],
        amenities: vec!["parking".to_string(), "showers".to_string()],
    }
}

fn new_booking(playground_id: i64, user_id: i64, start: (u32, u32), end: (u32, u32)) -> CreateBooking {
    CreateBooking {
        playground_id,
        user_id,
        date: day(),
        start_time: t(start.0, start.1),
        end_time: t(end.0, end.1),
        total_amount: 110.0,
        notes: None,
    }
}

/// A date far enough ahead that every test booking counts as upcoming.
fn day() -> NaiveDate {
    Utc::now().date_naive().checked_add_days(Days::new(30)).unwrap()
}

fn t(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap()
}

async fn must_create(pool: &PgPool, input: &CreateBooking) -> playrental_db::models::booking::Booking {
    match BookingRepo::create_slot_checked(pool, input).await.unwrap() {
        CreateBookingOutcome::Created(booking) => booking,
        other => panic!("expected Created, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Test: users and playgrounds
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_user_and_playground(pool: PgPool) {
    let owner = UserRepo::create(&pool, &new_user("owner@example.com", "OWNER"))
        .await
        .unwrap();
    assert_eq!(owner.role, "OWNER");
    assert!(!owner.is_email_verified);

    let playground = PlaygroundRepo::create(&pool, &new_playground(owner.id, "City Pitch", "Cairo", 50.0))
        .await
        .unwrap();
    assert_eq!(playground.owner_id, owner.id);
    assert_eq!(playground.amenities, vec!["parking", "showers"]);
    assert!(playground.is_available);

    let rated = PlaygroundRepo::find_with_rating(&pool, playground.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(rated.owner_email, "owner@example.com");
    assert_eq!(rated.rating, 0.0); // Unreviewed.
    assert_eq!(rated.review_count, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_email_rejected(pool: PgPool) {
    UserRepo::create(&pool, &new_user("dup@example.com", "PLAYER"))
        .await
        .unwrap();
    let result = UserRepo::create(&pool, &new_user("dup@example.com", "OWNER")).await;
    assert!(result.is_err(), "Duplicate email should fail");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_invalid_role_rejected_by_check(pool: PgPool) {
    let result = UserRepo::create(&pool, &new_user("x@example.com", "WIZARD")).await;
    assert!(result.is_err(), "CHECK constraint should reject unknown role");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_playground_filters(pool: PgPool) {
    let owner = UserRepo::create(&pool, &new_user("owner@example.com", "OWNER"))
        .await
        .unwrap();
    PlaygroundRepo::create(&pool, &new_playground(owner.id, "Nile Courts", "Cairo", 80.0))
        .await
        .unwrap();
    let hidden = PlaygroundRepo::create(&pool, &new_playground(owner.id, "Beach Arena", "Alexandria", 150.0))
        .await
        .unwrap();
    PlaygroundRepo::toggle_availability(&pool, hidden.id)
        .await
        .unwrap();

    // Case-insensitive substring search on the name.
    let by_search = PlaygroundRepo::list(
        &pool,
        &PlaygroundFilter {
            search: Some("nile".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_search.len(), 1);
    assert_eq!(by_search[0].name, "Nile Courts");

    let by_city = PlaygroundRepo::list(
        &pool,
        &PlaygroundFilter {
            city: Some("Alexandria".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_city.len(), 1);

    let by_price = PlaygroundRepo::list(
        &pool,
        &PlaygroundFilter {
            min_price: Some(100.0),
            max_price: Some(200.0),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_price.len(), 1);
    assert_eq!(by_price[0].name, "Beach Arena");

    let available_only = PlaygroundRepo::list(
        &pool,
        &PlaygroundFilter {
            available: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(available_only.len(), 1);
    assert_eq!(available_only[0].name, "Nile Courts");

    // No filters returns everything, newest first.
    let all = PlaygroundRepo::list(&pool, &PlaygroundFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].name, "Beach Arena");
}

// ---------------------------------------------------------------------------
// Test: slot conflict outcomes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_booking_slot_conflicts(pool: PgPool) {
    let owner = UserRepo::create(&pool, &new_user("owner@example.com", "OWNER"))
        .await
        .unwrap();
    let player = UserRepo::create(&pool, &new_user("player@example.com", "PLAYER"))
        .await
        .unwrap();
    let playground = PlaygroundRepo::create(&pool, &new_playground(owner.id, "City Pitch", "Cairo", 50.0))
        .await
        .unwrap();

    let first = must_create(&pool, &new_booking(playground.id, player.id, (10, 0), (11, 0))).await;
    assert_eq!(first.status, "PENDING");

    // Overlapping request is refused.
    let overlap = BookingRepo::create_slot_checked(
        &pool,
        &new_booking(playground.id, player.id, (10, 30), (11, 30)),
    )
    .await
    .unwrap();
    assert_matches!(overlap, CreateBookingOutcome::SlotTaken);

    // A request swallowing the existing booking is refused too.
    let containing = BookingRepo::create_slot_checked(
        &pool,
        &new_booking(playground.id, player.id, (9, 0), (12, 0)),
    )
    .await
    .unwrap();
    assert_matches!(containing, CreateBookingOutcome::SlotTaken);

    // Back-to-back is fine: intervals are half-open.
    must_create(&pool, &new_booking(playground.id, player.id, (11, 0), (12, 0))).await;

    // Same slot on another date is fine.
    let mut other_day = new_booking(playground.id, player.id, (10, 0), (11, 0));
    other_day.date = day().checked_add_days(Days::new(1)).unwrap();
    must_create(&pool, &other_day).await;
}

#[sqlx::test(migrations = "./migrations")]
async fn test_cancelled_booking_frees_slot(pool: PgPool) {
    let owner = UserRepo::create(&pool, &new_user("owner@example.com", "OWNER"))
        .await
        .unwrap();
    let player = UserRepo::create(&pool, &new_user("player@example.com", "PLAYER"))
        .await
        .unwrap();
    let playground = PlaygroundRepo::create(&pool, &new_playground(owner.id, "City Pitch", "Cairo", 50.0))
        .await
        .unwrap();

    let booking = must_create(&pool, &new_booking(playground.id, player.id, (14, 0), (15, 0))).await;
    let cancelled = BookingRepo::cancel_with_refund(&pool, booking.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cancelled.status, "CANCELLED");

    // The slot is bookable again.
    must_create(&pool, &new_booking(playground.id, player.id, (14, 0), (15, 0))).await;
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unavailable_and_missing_playground(pool: PgPool) {
    let owner = UserRepo::create(&pool, &new_user("owner@example.com", "OWNER"))
        .await
        .unwrap();
    let player = UserRepo::create(&pool, &new_user("player@example.com", "PLAYER"))
        .await
        .unwrap();
    let playground = PlaygroundRepo::create(&pool, &new_playground(owner.id, "City Pitch", "Cairo", 50.0))
        .await
        .unwrap();
    PlaygroundRepo::toggle_availability(&pool, playground.id)
        .await
        .unwrap();

    let unavailable = BookingRepo::create_slot_checked(
        &pool,
        &new_booking(playground.id, player.id, (10, 0), (11, 0)),
    )
    .await
    .unwrap();
    assert_matches!(unavailable, CreateBookingOutcome::PlaygroundUnavailable);

    let missing = BookingRepo::create_slot_checked(
        &pool,
        &new_booking(playground.id + 999, player.id, (10, 0), (11, 0)),
    )
    .await
    .unwrap();
    assert_matches!(missing, CreateBookingOutcome::PlaygroundMissing);
}

// ---------------------------------------------------------------------------
// Test: payments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_failed_payment_then_retry_upserts(pool: PgPool) {
    let owner = UserRepo::create(&pool, &new_user("owner@example.com", "OWNER"))
        .await
        .unwrap();
    let player = UserRepo::create(&pool, &new_user("player@example.com", "PLAYER"))
        .await
        .unwrap();
    let playground = PlaygroundRepo::create(&pool, &new_playground(owner.id, "City Pitch", "Cairo", 50.0))
        .await
        .unwrap();
    let booking = must_create(&pool, &new_booking(playground.id, player.id, (10, 0), (11, 0))).await;

    // Declined attempt recorded as FAILED.
    let failed = PaymentRepo::record(
        &pool,
        &RecordPayment {
            booking_id: booking.id,
            user_id: player.id,
            amount: booking.total_amount,
            status: "FAILED".to_string(),
            method: "card".to_string(),
            transaction_id: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(failed.status, "FAILED");
    assert!(failed.transaction_id.is_none());

    // Retry succeeds: same row updated, booking confirmed.
    let (payment, confirmed) = PaymentRepo::record_success_and_confirm(
        &pool,
        &RecordPayment {
            booking_id: booking.id,
            user_id: player.id,
            amount: booking.total_amount,
            status: "COMPLETED".to_string(),
            method: "card".to_string(),
            transaction_id: Some("TXN-12345678".to_string()),
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(payment.id, failed.id, "retry must upsert, not insert");
    assert_eq!(payment.status, "COMPLETED");
    assert_eq!(confirmed.status, "CONFIRMED");

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM payments WHERE booking_id = $1")
        .bind(booking.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_cancel_refunds_completed_payment(pool: PgPool) {
    let owner = UserRepo::create(&pool, &new_user("owner@example.com", "OWNER"))
        .await
        .unwrap();
    let player = UserRepo::create(&pool, &new_user("player@example.com", "PLAYER"))
        .await
        .unwrap();
    let playground = PlaygroundRepo::create(&pool, &new_playground(owner.id, "City Pitch", "Cairo", 50.0))
        .await
        .unwrap();
    let booking = must_create(&pool, &new_booking(playground.id, player.id, (10, 0), (11, 0))).await;

    PaymentRepo::record_success_and_confirm(
        &pool,
        &RecordPayment {
            booking_id: booking.id,
            user_id: player.id,
            amount: booking.total_amount,
            status: "COMPLETED".to_string(),
            method: "card".to_string(),
            transaction_id: Some("TXN-00000001".to_string()),
        },
    )
    .await
    .unwrap()
    .unwrap();

    BookingRepo::cancel_with_refund(&pool, booking.id)
        .await
        .unwrap()
        .unwrap();

    let payment = PaymentRepo::find_by_booking(&pool, booking.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(payment.status, "REFUNDED");
}

// ---------------------------------------------------------------------------
// Test: reviews
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_review_unique_per_booking(pool: PgPool) {
    let owner = UserRepo::create(&pool, &new_user("owner@example.com", "OWNER"))
        .await
        .unwrap();
    let player = UserRepo::create(&pool, &new_user("player@example.com", "PLAYER"))
        .await
        .unwrap();
    let playground = PlaygroundRepo::create(&pool, &new_playground(owner.id, "City Pitch", "Cairo", 50.0))
        .await
        .unwrap();
    let booking = must_create(&pool, &new_booking(playground.id, player.id, (10, 0), (11, 0))).await;

    let review = ReviewRepo::create(
        &pool,
        &CreateReview {
            booking_id: booking.id,
            playground_id: playground.id,
            user_id: player.id,
            rating: 4,
            comment: Some("Great turf".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(review.rating, 4);

    // Second review on the same booking violates uq_reviews_booking_id.
    let dup = ReviewRepo::create(
        &pool,
        &CreateReview {
            booking_id: booking.id,
            playground_id: playground.id,
            user_id: player.id,
            rating: 5,
            comment: None,
        },
    )
    .await;
    assert!(dup.is_err(), "Second review per booking should fail");

    // Rating outside 1..=5 violates the CHECK constraint.
    let second = must_create(&pool, &new_booking(playground.id, player.id, (12, 0), (13, 0))).await;
    let outside = ReviewRepo::create(
        &pool,
        &CreateReview {
            booking_id: second.id,
            playground_id: playground.id,
            user_id: player.id,
            rating: 6,
            comment: None,
        },
    )
    .await;
    assert!(outside.is_err(), "Rating above 5 should fail");

    // The aggregate view reflects the one accepted review.
    let rated = PlaygroundRepo::find_with_rating(&pool, playground.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(rated.rating, 4.0);
    assert_eq!(rated.review_count, 1);
}

// ---------------------------------------------------------------------------
// Test: cascade deletes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_cascade_delete_playground(pool: PgPool) {
    let owner = UserRepo::create(&pool, &new_user("owner@example.com", "OWNER"))
        .await
        .unwrap();
    let player = UserRepo::create(&pool, &new_user("player@example.com", "PLAYER"))
        .await
        .unwrap();
    let playground = PlaygroundRepo::create(&pool, &new_playground(owner.id, "City Pitch", "Cairo", 50.0))
        .await
        .unwrap();
    let booking = must_create(&pool, &new_booking(playground.id, player.id, (10, 0), (11, 0))).await;
    ReviewRepo::create(
        &pool,
        &CreateReview {
            booking_id: booking.id,
            playground_id: playground.id,
            user_id: player.id,
            rating: 3,
            comment: None,
        },
    )
    .await
    .unwrap();

    let deleted = PlaygroundRepo::delete(&pool, playground.id).await.unwrap();
    assert!(deleted);

    assert!(BookingRepo::find_by_id(&pool, booking.id)
        .await
        .unwrap()
        .is_none());
    assert!(ReviewRepo::find_by_booking(&pool, booking.id)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Test: notification scoping
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_notifications_scoped_to_user(pool: PgPool) {
    let alice = UserRepo::create(&pool, &new_user("alice@example.com", "PLAYER"))
        .await
        .unwrap();
    let bob = UserRepo::create(&pool, &new_user("bob@example.com", "PLAYER"))
        .await
        .unwrap();

    let notification = NotificationRepo::create(
        &pool,
        &CreateNotification {
            user_id: alice.id,
            kind: "BOOKING_CONFIRMATION".to_string(),
            message: "New booking for City Pitch on 2026-06-15".to_string(),
        },
    )
    .await
    .unwrap();
    assert!(!notification.is_read);

    // Bob cannot touch Alice's notification.
    assert!(!NotificationRepo::mark_read(&pool, notification.id, bob.id)
        .await
        .unwrap());
    assert!(!NotificationRepo::delete(&pool, notification.id, bob.id)
        .await
        .unwrap());

    // Alice can, and re-marking stays true.
    assert!(NotificationRepo::mark_read(&pool, notification.id, alice.id)
        .await
        .unwrap());
    assert!(NotificationRepo::mark_read(&pool, notification.id, alice.id)
        .await
        .unwrap());

    let listed = NotificationRepo::list_for_user(&pool, alice.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert!(listed[0].is_read);

    assert_eq!(NotificationRepo::mark_all_read(&pool, alice.id).await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Test: dashboard aggregates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_stats_totals(pool: PgPool) {
    let owner = UserRepo::create(&pool, &new_user("owner@example.com", "OWNER"))
        .await
        .unwrap();
    let player = UserRepo::create(&pool, &new_user("player@example.com", "PLAYER"))
        .await
        .unwrap();
    let playground = PlaygroundRepo::create(&pool, &new_playground(owner.id, "City Pitch", "Cairo", 50.0))
        .await
        .unwrap();

    // One confirmed (counts toward revenue), one pending, one cancelled.
    let confirmed = must_create(&pool, &new_booking(playground.id, player.id, (10, 0), (11, 0))).await;
    BookingRepo::update_status(&pool, confirmed.id, "CONFIRMED")
        .await
        .unwrap();
    must_create(&pool, &new_booking(playground.id, player.id, (12, 0), (13, 0))).await;
    let cancelled = must_create(&pool, &new_booking(playground.id, player.id, (14, 0), (15, 0))).await;
    BookingRepo::cancel_with_refund(&pool, cancelled.id)
        .await
        .unwrap();

    let admin = StatsRepo::admin_totals(&pool).await.unwrap();
    assert_eq!(admin.total_users, 2);
    assert_eq!(admin.total_playgrounds, 1);
    assert_eq!(admin.total_bookings, 3);
    assert_eq!(admin.total_revenue, 110.0); // Only the confirmed one.

    let owner_stats = StatsRepo::owner_totals(&pool, owner.id).await.unwrap();
    assert_eq!(owner_stats.total_playgrounds, 1);
    assert_eq!(owner_stats.total_bookings, 3);
    assert_eq!(owner_stats.total_revenue, 110.0);
    assert_eq!(owner_stats.unique_players, 1);

    let player_stats = StatsRepo::player_totals(&pool, player.id).await.unwrap();
    assert_eq!(player_stats.total_bookings, 3);
    assert_eq!(player_stats.completed_bookings, 0);
    assert_eq!(player_stats.cancelled_bookings, 1);
    // day() is 30 days out, so the two live bookings are upcoming.
    assert_eq!(player_stats.upcoming_bookings, 2);
}
