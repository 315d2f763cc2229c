//! Domain logic for the Casabook reservation & availability engine.
//!
//! This crate has zero internal dependencies so it can be used by the
//! repository layer, the API, and any future worker or CLI tooling.
//! Everything here is pure: date-range arithmetic, the reservation
//! state machine, pricing math, and guest-identity normalization.
//! Persistence and transport live in `casabook-db` / `casabook-api`.

pub mod customer;
pub mod dates;
pub mod error;
pub mod lifecycle;
pub mod pricing;
pub mod status;
pub mod types;

pub use error::CoreError;
