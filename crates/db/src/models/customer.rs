//! Customer entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use casabook_core::types::{DbId, Timestamp};

/// A row from the `customers` table.
///
/// `email` and `phone` are stored normalized (see
/// `casabook_core::customer`) so the unique indexes deduplicate
/// regardless of input formatting.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Customer {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub nationality: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Guest identity as supplied by a booking request, before
/// normalization. Used by `CustomerRepo::find_or_create`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GuestIdentity {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub nationality: Option<String>,
}
