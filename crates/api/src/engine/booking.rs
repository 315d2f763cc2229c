//! Booking creation and lifecycle transitions.
//!
//! A booking request flows customer matching -> conflict check ->
//! pricing -> transactional create (reservation row + booked calendar
//! rows). The conflict pre-check runs inside the same serializable
//! transaction as the writes; the storage-level unique constraint on
//! (property_id, date) is the definitive double-booking guard.

use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use casabook_core::dates::StayRange;
use casabook_core::error::CoreError;
use casabook_core::lifecycle;
use casabook_core::pricing::{self, PriceBreakdown};
use casabook_core::status::{PaymentStatus, ReservationStatus};
use casabook_core::types::{Date, DbId, Money};
use casabook_db::models::customer::GuestIdentity;
use casabook_db::models::property::Property;
use casabook_db::models::reservation::{NewReservation, Reservation};
use casabook_db::repositories::{
    AvailabilityRepo, CustomerRepo, PropertyRepo, ReservationRepo,
};
use casabook_events::BookingEvent;

use crate::auth::Principal;
use crate::engine::{record_mutation, AVAILABILITY_CONSTRAINT};
use crate::error::{is_range_conflict, AppError};
use crate::state::AppState;

/// Body of `POST /reservations`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReservationRequest {
    pub property_id: DbId,
    #[validate(length(min = 1, message = "guest_name must not be empty"))]
    pub guest_name: String,
    #[validate(email(message = "guest_email must be a valid email address"))]
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
    pub guest_nationality: Option<String>,
    pub guest_count: i32,
    pub check_in_date: Date,
    pub check_out_date: Date,
    pub special_requests: Option<String>,
    /// Pre-computed breakdown some UI flows send along. Never trusted:
    /// the engine always recomputes server-side and only logs a
    /// mismatch (client-supplied pricing is a correctness hole).
    pub pricing: Option<PriceBreakdown>,
}

/// Body of `PATCH /reservations/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct StatusChangeRequest {
    /// Target status label, e.g. `"confirmed"`, `"cancelled"`.
    pub status: String,
    pub cancellation_reason: Option<String>,
}

/// Body of `PATCH /reservations/{id}/payment`.
#[derive(Debug, Deserialize)]
pub struct PaymentStatusRequest {
    /// Target payment status label, e.g. `"paid"`, `"refunded"`.
    pub payment_status: String,
}

/// Create a reservation: the full engine flow.
pub async fn create_reservation(
    state: &AppState,
    principal: &Principal,
    request: CreateReservationRequest,
) -> Result<Reservation, AppError> {
    request
        .validate()
        .map_err(|err| AppError::Core(CoreError::Validation(err.to_string())))?;

    let range = StayRange::new_for_booking(request.check_in_date, request.check_out_date)?;

    let property = PropertyRepo::find_by_id(&state.pool, request.property_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Property",
            id: request.property_id,
        })?;

    validate_guest_count(&property, request.guest_count)?;

    let customer = CustomerRepo::find_or_create(
        &state.pool,
        &GuestIdentity {
            first_name: Some(first_name_of(&request.guest_name)),
            last_name: Some(last_name_of(&request.guest_name)),
            email: request.guest_email.clone(),
            phone: request.guest_phone.clone(),
            nationality: request.guest_nationality.clone(),
        },
    )
    .await?;

    let pricing = compute_pricing(state, &property, &range).await?;
    if let Some(client_pricing) = &request.pricing {
        if *client_pricing != pricing {
            tracing::warn!(
                property_id = property.id,
                client_total = client_pricing.total_amount,
                server_total = pricing.total_amount,
                "client-supplied pricing ignored; server recomputed"
            );
        }
    }

    let input = NewReservation {
        property_id: property.id,
        customer_id: customer.id,
        guest_name: request.guest_name.trim().to_string(),
        guest_email: request.guest_email,
        guest_phone: request.guest_phone,
        guest_nationality: request.guest_nationality,
        guest_count: request.guest_count,
        check_in_date: request.check_in_date,
        check_out_date: request.check_out_date,
        pricing,
        special_requests: request.special_requests,
    };

    let created = match ReservationRepo::create_booked(&state.pool, &input, &range).await {
        Ok(Ok(reservation)) => reservation,
        Ok(Err(_conflict)) => return Err(range_taken(property.id, &range)),
        Err(err) if is_range_conflict(&err, AVAILABILITY_CONSTRAINT) => {
            return Err(range_taken(property.id, &range));
        }
        Err(err) => return Err(err.into()),
    };

    record_mutation(
        state,
        principal,
        BookingEvent::new("reservation.created")
            .with_source("reservation", created.id)
            .with_payload(json!({
                "property_id": created.property_id,
                "check_in_date": created.check_in_date,
                "check_out_date": created.check_out_date,
                "total_amount": created.total_amount,
            })),
    )
    .await;

    Ok(created)
}

/// Apply a status transition requested over the API.
pub async fn change_status(
    state: &AppState,
    principal: &Principal,
    id: DbId,
    request: StatusChangeRequest,
) -> Result<Reservation, AppError> {
    let target = ReservationStatus::from_label(&request.status).ok_or_else(|| {
        CoreError::Validation(format!("unknown reservation status '{}'", request.status))
    })?;

    let reservation = ReservationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Reservation",
            id,
        })?;

    let current = ReservationStatus::try_from_id(reservation.status_id).ok_or_else(|| {
        CoreError::Internal(format!(
            "reservation {id} carries unknown status id {}",
            reservation.status_id
        ))
    })?;

    lifecycle::validate_transition(current, target)?;

    let cancelling = target == ReservationStatus::Cancelled;
    let updated = ReservationRepo::apply_transition(
        &state.pool,
        id,
        current,
        target,
        request.cancellation_reason.as_deref(),
        cancelling.then(Utc::now),
        lifecycle::releases_calendar(target),
    )
    .await?
    // The compare-and-set missed: someone else transitioned first.
    .ok_or(CoreError::InvalidTransition {
        from: current.label(),
        to: target.label(),
    })?;

    record_mutation(
        state,
        principal,
        BookingEvent::new(match target {
            ReservationStatus::Cancelled => "reservation.cancelled",
            ReservationStatus::Confirmed => "reservation.confirmed",
            ReservationStatus::Completed => "reservation.completed",
            ReservationStatus::NoShow => "reservation.no_show",
            ReservationStatus::Pending => "reservation.status_changed",
        })
        .with_source("reservation", updated.id)
        .with_payload(json!({
            "property_id": updated.property_id,
            "from": current.label(),
            "to": target.label(),
        })),
    )
    .await;

    Ok(updated)
}

/// Record a payment status change. Bookkeeping only: payment
/// processing happens outside this engine, so any label is accepted at
/// any time and nothing else changes.
pub async fn change_payment_status(
    state: &AppState,
    principal: &Principal,
    id: DbId,
    request: PaymentStatusRequest,
) -> Result<Reservation, AppError> {
    let target = PaymentStatus::from_label(&request.payment_status).ok_or_else(|| {
        CoreError::Validation(format!(
            "unknown payment status '{}'",
            request.payment_status
        ))
    })?;

    let updated = ReservationRepo::update_payment_status(&state.pool, id, target.id())
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Reservation",
            id,
        })?;

    record_mutation(
        state,
        principal,
        BookingEvent::new("reservation.payment_updated")
            .with_source("reservation", updated.id)
            .with_payload(json!({
                "property_id": updated.property_id,
                "payment_status": target.label(),
            })),
    )
    .await;

    Ok(updated)
}

/// Resolve per-night rates (price override when present, property base
/// otherwise) and compute the breakdown with the configured tax rate.
async fn compute_pricing(
    state: &AppState,
    property: &Property,
    range: &StayRange,
) -> Result<PriceBreakdown, AppError> {
    let overrides = AvailabilityRepo::price_overrides_in_range(&state.pool, property.id, range)
        .await?
        .into_iter()
        .collect::<std::collections::HashMap<_, _>>();

    let nightly: Vec<Money> = range
        .days()
        .map(|date| overrides.get(&date).copied().unwrap_or(property.base_price))
        .collect();

    let breakdown = pricing::quote(
        &nightly,
        property.cleaning_fee,
        property.service_fee,
        state.config.tax_rate,
    )?;
    Ok(breakdown)
}

fn validate_guest_count(property: &Property, guest_count: i32) -> Result<(), CoreError> {
    if guest_count < 1 {
        return Err(CoreError::Validation("guest_count must be at least 1".into()));
    }
    if let Some(max_guests) = property.max_guests {
        if guest_count > max_guests {
            return Err(CoreError::Validation(format!(
                "guest_count {guest_count} exceeds property capacity {max_guests}"
            )));
        }
    }
    Ok(())
}

fn range_taken(property_id: DbId, range: &StayRange) -> AppError {
    AppError::Core(CoreError::RangeNotAvailable(format!(
        "property {property_id} is not available between {} and {}",
        range.check_in(),
        range.check_out()
    )))
}

fn first_name_of(guest_name: &str) -> String {
    guest_name
        .trim()
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_string()
}

fn last_name_of(guest_name: &str) -> String {
    let mut parts = guest_name.trim().split_whitespace();
    parts.next();
    parts.collect::<Vec<_>>().join(" ")
}
