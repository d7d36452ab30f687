//! Well-known notification kind constants.
//!
//! These must match the kind values stored in the `notifications.kind`
//! column and the filter chips rendered by the notification bell UI.

/// A playground owner received a new booking.
pub const KIND_BOOKING_CONFIRMATION: &str = "BOOKING_CONFIRMATION";

/// A booking was cancelled; sent to the party that did not cancel.
pub const KIND_BOOKING_CANCELLATION: &str = "BOOKING_CANCELLATION";

/// A player's payment went through.
pub const KIND_PAYMENT_CONFIRMATION: &str = "PAYMENT_CONFIRMATION";

/// A playground owner received a new review.
pub const KIND_REVIEW_RECEIVED: &str = "REVIEW_RECEIVED";

/// An administrative announcement not tied to a booking.
pub const KIND_SYSTEM: &str = "SYSTEM";

/// All valid notification kind values.
pub const VALID_NOTIFICATION_KINDS: &[&str] = &[
    KIND_BOOKING_CONFIRMATION,
    KIND_BOOKING_CANCELLATION,
    KIND_PAYMENT_CONFIRMATION,
    KIND_REVIEW_RECEIVED,
    KIND_SYSTEM,
];
