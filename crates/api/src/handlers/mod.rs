//! Request handlers for the reservation engine.
//!
//! Handlers stay thin: they extract, delegate to the engine or a
//! repository, and map errors via [`AppError`](crate::error::AppError).

pub mod availability;
pub mod health;
pub mod reservation;
