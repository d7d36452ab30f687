/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Monetary amounts in EGP, stored as DOUBLE PRECISION.
///
/// Totals are rounded to whole units at quote time, so the usual float
/// caveats stay out of the booking math.
pub type Money = f64;
