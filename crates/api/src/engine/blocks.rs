//! Administrative date-range blocks.
//!
//! Blocks mark ranges unavailable for maintenance, renovation or
//! personal use, optionally attaching a price override and minimum
//! stay. They never overwrite a date occupied by a booking, and
//! unblocking never releases a booking's dates.

use serde::Deserialize;
use serde_json::json;

use casabook_core::dates::StayRange;
use casabook_core::error::CoreError;
use casabook_core::status::BlockedReason;
use casabook_core::types::{Date, DbId, Money};
use casabook_db::repositories::{AvailabilityRepo, PropertyRepo};
use casabook_events::BookingEvent;

use crate::auth::Principal;
use crate::engine::record_mutation;
use crate::error::AppError;
use crate::state::AppState;

/// Body of `POST /availability/block`.
#[derive(Debug, Deserialize)]
pub struct BlockRequest {
    pub property_id: DbId,
    pub start_date: Date,
    pub end_date: Date,
    /// Reason label: `maintenance`, `renovation`, `personal` or `other`.
    pub reason: String,
    pub price_override: Option<Money>,
    pub minimum_stay: Option<i32>,
}

/// Body of `DELETE /availability/block`.
#[derive(Debug, Deserialize)]
pub struct UnblockRequest {
    pub property_id: DbId,
    pub start_date: Date,
    pub end_date: Date,
}

/// Block every date in the half-open range. All-or-nothing: an
/// occupied date anywhere in the range fails the whole call.
pub async fn block(
    state: &AppState,
    principal: &Principal,
    request: BlockRequest,
) -> Result<u64, AppError> {
    principal.require_manager()?;

    let range = StayRange::new(request.start_date, request.end_date)?;
    require_property(state, request.property_id).await?;

    let reason = BlockedReason::from_label(&request.reason)
        .filter(|reason| *reason != BlockedReason::Booked)
        .ok_or_else(|| {
            CoreError::Validation(format!("unknown block reason '{}'", request.reason))
        })?;

    let count = AvailabilityRepo::block_range(
        &state.pool,
        request.property_id,
        &range,
        reason,
        request.price_override,
        request.minimum_stay,
    )
    .await?;

    record_mutation(
        state,
        principal,
        BookingEvent::new("availability.blocked")
            .with_source("property", request.property_id)
            .with_payload(json!({
                "start_date": request.start_date,
                "end_date": request.end_date,
                "reason": reason.label(),
                "dates": count,
            })),
    )
    .await;

    Ok(count)
}

/// Clear manual blocks in the half-open range; booked dates in the
/// range are left untouched. Returns how many dates were released.
pub async fn unblock(
    state: &AppState,
    principal: &Principal,
    request: UnblockRequest,
) -> Result<u64, AppError> {
    principal.require_manager()?;

    let range = StayRange::new(request.start_date, request.end_date)?;
    require_property(state, request.property_id).await?;

    let count = AvailabilityRepo::unblock_range(&state.pool, request.property_id, &range).await?;

    record_mutation(
        state,
        principal,
        BookingEvent::new("availability.unblocked")
            .with_source("property", request.property_id)
            .with_payload(json!({
                "start_date": request.start_date,
                "end_date": request.end_date,
                "dates": count,
            })),
    )
    .await;

    Ok(count)
}

async fn require_property(state: &AppState, property_id: DbId) -> Result<(), AppError> {
    PropertyRepo::find_by_id(&state.pool, property_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Property",
            id: property_id,
        }))?;
    Ok(())
}
