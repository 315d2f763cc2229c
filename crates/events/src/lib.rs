//! Casabook booking event bus.
//!
//! The reservation engine announces successful mutations (create,
//! cancel, status change, block, unblock) on an in-process
//! publish/subscribe bus. Actual notification delivery (guest emails,
//! partner webhooks) is a separate subsystem that subscribes here;
//! publishing is fire-and-forget and can never fail a booking request.

pub mod bus;

pub use bus::{BookingEvent, EventBus};
