//! Booking and payment lifecycle statuses.
//!
//! Statuses are stored as TEXT with CHECK constraints rather than Postgres
//! enums so migrations can extend them without a type rebuild. These enums
//! are the single source of truth for the accepted values.

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Booking status
-------------------------------------------------------------------------- */

/// Lifecycle of a booking.
///
/// `Cancelled` is terminal: no transition out of it is ever accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// Created, awaiting payment.
    Pending,
    /// Paid.
    Confirmed,
    /// Cancelled by the player, the owner, or an admin.
    Cancelled,
    /// The booked interval has been played.
    Completed,
}

impl BookingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
            Self::Completed => "COMPLETED",
        }
    }

    /// Parse a stored or client-supplied status string.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "PENDING" => Ok(Self::Pending),
            "CONFIRMED" => Ok(Self::Confirmed),
            "CANCELLED" => Ok(Self::Cancelled),
            "COMPLETED" => Ok(Self::Completed),
            _ => Err(CoreError::Validation(format!(
                "Invalid booking status '{value}'. Must be one of: PENDING, CONFIRMED, CANCELLED, COMPLETED"
            ))),
        }
    }

    /// Whether a transition from `self` to `next` is accepted.
    ///
    /// Everything is allowed except leaving `Cancelled`.
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        !matches!(self, Self::Cancelled) || next == Self::Cancelled
    }
}

/// Statuses that count toward owner and admin revenue.
pub const REVENUE_STATUSES: &[BookingStatus] =
    &[BookingStatus::Confirmed, BookingStatus::Completed];

/* --------------------------------------------------------------------------
Payment status
-------------------------------------------------------------------------- */

/// Lifecycle of a simulated payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Refunded,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Completed => "COMPLETED",
            Self::Refunded => "REFUNDED",
            Self::Failed => "FAILED",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "PENDING" => Ok(Self::Pending),
            "COMPLETED" => Ok(Self::Completed),
            "REFUNDED" => Ok(Self::Refunded),
            "FAILED" => Ok(Self::Failed),
            _ => Err(CoreError::Validation(format!(
                "Invalid payment status '{value}'. Must be one of: PENDING, COMPLETED, REFUNDED, FAILED"
            ))),
        }
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
