//! Reservation entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use casabook_core::pricing::PriceBreakdown;
use casabook_core::status::StatusId;
use casabook_core::types::{Date, DbId, Money, Timestamp};

/// A row from the `reservations` table.
///
/// `status_id` / `payment_status_id` map to the closed enums in
/// `casabook_core::status`; dates form the half-open interval
/// `[check_in_date, check_out_date)`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Reservation {
    pub id: DbId,
    pub property_id: DbId,
    pub customer_id: DbId,
    pub guest_name: String,
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
    pub guest_nationality: Option<String>,
    pub guest_count: i32,
    pub check_in_date: Date,
    pub check_out_date: Date,
    pub base_price: Money,
    pub cleaning_fee: Money,
    pub service_fee: Money,
    pub taxes: Money,
    pub total_amount: Money,
    pub status_id: StatusId,
    pub payment_status_id: StatusId,
    pub special_requests: Option<String>,
    pub cancellation_reason: Option<String>,
    pub cancelled_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for `ReservationRepo::create_booked`. Pricing is always the
/// server-computed breakdown; the customer has already been matched.
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub property_id: DbId,
    pub customer_id: DbId,
    pub guest_name: String,
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
    pub guest_nationality: Option<String>,
    pub guest_count: i32,
    pub check_in_date: Date,
    pub check_out_date: Date,
    pub pricing: PriceBreakdown,
    pub special_requests: Option<String>,
}
