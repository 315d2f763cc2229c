//! Property entity model and DTOs.
//!
//! Properties are managed by the wider platform; the engine reads the
//! pricing constants and capacity from here. The create/list operations
//! exist for admin tooling and tests.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use casabook_core::types::{DbId, Money, Timestamp};

/// A row from the `properties` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Property {
    pub id: DbId,
    pub name: String,
    /// Default nightly rate, minor currency units.
    pub base_price: Money,
    /// Applied once per stay.
    pub cleaning_fee: Money,
    /// Applied once per stay.
    pub service_fee: Money,
    /// Guest capacity; `None` means unbounded.
    pub max_guests: Option<i32>,
    pub default_minimum_stay: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new property.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProperty {
    pub name: String,
    pub base_price: Money,
    /// Defaults to 0 if omitted.
    pub cleaning_fee: Option<Money>,
    /// Defaults to 0 if omitted.
    pub service_fee: Option<Money>,
    pub max_guests: Option<i32>,
    /// Defaults to 1 if omitted.
    pub default_minimum_stay: Option<i32>,
}
