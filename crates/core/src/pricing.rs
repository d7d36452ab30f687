//! Booking price calculation.
//!
//! The server is the only party that prices a booking: clients display the
//! same numbers but never submit them.

use chrono::NaiveTime;

use crate::types::Money;

/// Service fee rate applied on top of the court rental subtotal.
pub const SERVICE_FEE_RATE: f64 = 0.10;

const MINUTES_PER_HOUR: f64 = 60.0;

/// Price breakdown for one booking interval.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct PriceQuote {
    /// Booked duration in hours; fractional for sub-hour intervals.
    pub hours: f64,
    /// Hourly price times duration, rounded to whole EGP.
    pub subtotal: Money,
    /// Platform fee, rounded to whole EGP.
    pub service_fee: Money,
    /// What the player is charged, rounded to whole EGP.
    pub total: Money,
}

/// Price a booking of `[start, end)` at a playground's hourly rate.
///
/// Each line is rounded independently, matching the checkout summary shown
/// to players, so `subtotal + service_fee` may differ from `total` by one
/// unit on fractional durations.
pub fn quote(hourly_price: Money, start: NaiveTime, end: NaiveTime) -> PriceQuote {
    let minutes = (end - start).num_minutes() as f64;
    let hours = minutes / MINUTES_PER_HOUR;
    PriceQuote {
        hours,
        subtotal: (hourly_price * hours).round(),
        service_fee: (hourly_price * hours * SERVICE_FEE_RATE).round(),
        total: (hourly_price * hours * (1.0 + SERVICE_FEE_RATE)).round(),
    }
}
