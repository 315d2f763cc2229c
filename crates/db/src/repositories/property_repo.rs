//! Repository for the `properties` table.

use sqlx::PgPool;

use casabook_core::types::DbId;

use crate::models::property::{CreateProperty, Property};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, base_price, cleaning_fee, service_fee, \
    max_guests, default_minimum_stay, created_at, updated_at";

/// Provides read and admin-create operations for properties.
pub struct PropertyRepo;

impl PropertyRepo {
    /// Insert a new property, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProperty) -> Result<Property, sqlx::Error> {
        let query = format!(
            "INSERT INTO properties
                (name, base_price, cleaning_fee, service_fee, max_guests, default_minimum_stay)
             VALUES ($1, $2, COALESCE($3, 0), COALESCE($4, 0), $5, COALESCE($6, 1))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Property>(&query)
            .bind(&input.name)
            .bind(input.base_price)
            .bind(input.cleaning_fee)
            .bind(input.service_fee)
            .bind(input.max_guests)
            .bind(input.default_minimum_stay)
            .fetch_one(pool)
            .await
    }

    /// Find a property by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Property>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM properties WHERE id = $1");
        sqlx::query_as::<_, Property>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all properties, ordered by creation time ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<Property>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM properties ORDER BY created_at ASC");
        sqlx::query_as::<_, Property>(&query).fetch_all(pool).await
    }
}
