//! Half-open stay ranges.
//!
//! A stay checking in on day X and out on day X+3 occupies X, X+1 and
//! X+2 but not X+3, so back-to-back bookings can share a boundary date.
//! Every date-range in the engine goes through [`StayRange`] so the
//! `check_out > check_in` invariant is established exactly once.

use chrono::Utc;

use crate::error::CoreError;
use crate::types::Date;

/// A validated half-open date interval `[check_in, check_out)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayRange {
    check_in: Date,
    check_out: Date,
}

impl StayRange {
    /// Build a range, rejecting `check_out <= check_in`.
    pub fn new(check_in: Date, check_out: Date) -> Result<Self, CoreError> {
        if check_out <= check_in {
            return Err(CoreError::InvalidRange(format!(
                "check_out_date {check_out} must be after check_in_date {check_in}"
            )));
        }
        Ok(Self { check_in, check_out })
    }

    /// Build a range for a new booking: additionally rejects a check-in
    /// before today (UTC). Availability queries over past dates use
    /// [`StayRange::new`] instead.
    pub fn new_for_booking(check_in: Date, check_out: Date) -> Result<Self, CoreError> {
        let range = Self::new(check_in, check_out)?;
        let today = Utc::now().date_naive();
        if check_in < today {
            return Err(CoreError::InvalidRange(format!(
                "check_in_date {check_in} is in the past"
            )));
        }
        Ok(range)
    }

    pub fn check_in(&self) -> Date {
        self.check_in
    }

    pub fn check_out(&self) -> Date {
        self.check_out
    }

    /// Number of occupied nights. Always >= 1.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Iterate the occupied dates: `check_in ..= check_out - 1`.
    pub fn days(&self) -> impl Iterator<Item = Date> {
        let nights = self.nights();
        let start = self.check_in;
        (0..nights).map(move |offset| start + chrono::Days::new(offset as u64))
    }

    /// Half-open overlap test: adjacent ranges do not overlap.
    pub fn overlaps(&self, other: &StayRange) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }
}
