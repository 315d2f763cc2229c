/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates are day-granularity (no time zone).
pub type Date = chrono::NaiveDate;

/// Monetary amounts are integer minor units (e.g. cents).
///
/// All pricing arithmetic stays in integers; the only rounding point is
/// the tax computation in [`crate::pricing::quote`].
pub type Money = i64;
