//! Availability record entity model.
//!
//! One row per (property, date). Absence of a row means "available at
//! the property's default price". Rows with `blocked_reason_id` =
//! booked are owned by `reservation_id` and only the reservation
//! lifecycle may touch them.

use serde::Serialize;
use sqlx::FromRow;

use casabook_core::status::StatusId;
use casabook_core::types::{Date, DbId, Money, Timestamp};

/// A row from the `availability_records` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AvailabilityRecord {
    pub id: DbId,
    pub property_id: DbId,
    pub date: Date,
    pub is_available: bool,
    pub blocked_reason_id: Option<StatusId>,
    pub price_override: Option<Money>,
    pub minimum_stay: Option<i32>,
    pub reservation_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
