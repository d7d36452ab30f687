//! Bookable hours, the hourly slot grid, and interval overlap logic.
//!
//! Booking intervals are half-open `[start, end)`: a booking ending at
//! 10:00 and one starting at 10:00 share a wall-clock instant but not a
//! minute of court time, so they never conflict.

use chrono::NaiveTime;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Open hours
// ---------------------------------------------------------------------------

/// First bookable hour of the day (inclusive).
pub const OPENING_HOUR: u32 = 8;

/// Hour by which every booking must have ended (exclusive).
pub const CLOSING_HOUR: u32 = 22;

/// 08:00, the earliest permitted start.
pub fn opening_time() -> NaiveTime {
    NaiveTime::from_hms_opt(OPENING_HOUR, 0, 0).expect("valid constant time")
}

/// 22:00, the latest permitted end.
pub fn closing_time() -> NaiveTime {
    NaiveTime::from_hms_opt(CLOSING_HOUR, 0, 0).expect("valid constant time")
}

// ---------------------------------------------------------------------------
// Parsing / validation
// ---------------------------------------------------------------------------

/// Parse a time-of-day string as sent by clients.
///
/// Accepts `HH:MM`; a trailing `:SS` is tolerated for round-tripping values
/// the API itself emitted.
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime, CoreError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| CoreError::Validation(format!("Invalid time '{value}'. Expected HH:MM")))
}

/// Validate a requested booking interval: must be forward and inside the
/// facility's open hours.
pub fn validate_interval(start: NaiveTime, end: NaiveTime) -> Result<(), CoreError> {
    if end <= start {
        return Err(CoreError::Validation(
            "End time must be after start time".to_string(),
        ));
    }
    if start < opening_time() || end > closing_time() {
        return Err(CoreError::Validation(format!(
            "Bookings are available between {OPENING_HOUR:02}:00 and {CLOSING_HOUR}:00"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Overlap test
// ---------------------------------------------------------------------------

/// Half-open overlap test between a requested interval and an existing
/// booking on the same playground and date.
///
/// The three clauses mirror the SQL conflict predicate used when inserting
/// a booking; adjacency (`existing_end == requested_start` or vice versa)
/// is not a conflict.
pub fn overlaps(
    requested_start: NaiveTime,
    requested_end: NaiveTime,
    existing_start: NaiveTime,
    existing_end: NaiveTime,
) -> bool {
    // Existing booking covers the requested start.
    (existing_start <= requested_start && existing_end > requested_start)
        // Existing booking covers the requested end.
        || (existing_start < requested_end && existing_end >= requested_end)
        // Requested interval swallows the existing booking whole.
        || (existing_start >= requested_start && existing_end <= requested_end)
}

// ---------------------------------------------------------------------------
// Slot grid
// ---------------------------------------------------------------------------

/// The hourly slot grid offered to players: 08:00-09:00 through 21:00-22:00.
pub fn hourly_slots() -> Vec<(NaiveTime, NaiveTime)> {
    (OPENING_HOUR..CLOSING_HOUR)
        .map(|hour| {
            (
                NaiveTime::from_hms_opt(hour, 0, 0).expect("valid constant time"),
                NaiveTime::from_hms_opt(hour + 1, 0, 0).expect("valid constant time"),
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
