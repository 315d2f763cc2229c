//! Reservation engine orchestration.
//!
//! Handlers stay thin; the control flow of a booking
//! (customer matching, conflict checking, pricing, the transactional
//! create) and of administrative blocks lives here, together with the
//! fire-and-forget audit and event side effects.

pub mod blocks;
pub mod booking;

use casabook_db::models::audit::CreateAuditLog;
use casabook_db::repositories::AuditLogRepo;
use casabook_events::BookingEvent;

use crate::auth::Principal;
use crate::state::AppState;

/// Name of the calendar uniqueness constraint; violations of it mean a
/// concurrent writer took the range first.
pub(crate) const AVAILABILITY_CONSTRAINT: &str = "uq_availability_property_date";

/// Record an audit entry and publish a booking event after a successful
/// mutation. Best-effort by contract: failures are logged, never
/// propagated to the caller.
pub(crate) async fn record_mutation(
    state: &AppState,
    principal: &Principal,
    event: BookingEvent,
) {
    let entry = CreateAuditLog {
        action_type: event.event_type.clone(),
        entity_type: event.source_entity_type.clone(),
        entity_id: event.source_entity_id,
        actor_role: Some(principal.role.label().to_string()),
        details_json: Some(event.payload.clone()),
    };
    if let Err(err) = AuditLogRepo::insert(&state.pool, &entry).await {
        tracing::warn!(error = %err, action = %event.event_type, "audit log write failed");
    }
    state.events.publish(event);
}
