//! Repository for the `availability_records` table.
//!
//! Covers the calendar store and the administrative block manager.
//! Manual blocks (maintenance, renovation, personal, other) are owned
//! here; rows with reason `booked` belong to their reservation and are
//! never mutated or deleted by these operations.

use sqlx::PgPool;

use casabook_core::dates::StayRange;
use casabook_core::error::CoreError;
use casabook_core::status::BlockedReason;
use casabook_core::types::{Date, DbId, Money};

use crate::models::availability::AvailabilityRecord;
use crate::repositories::reservation_repo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, property_id, date, is_available, blocked_reason_id, \
    price_override, minimum_stay, reservation_id, created_at, updated_at";

/// Calendar and manual-block operations.
pub struct AvailabilityRepo;

impl AvailabilityRepo {
    /// List all availability records for a property in `[start, end)`,
    /// ordered by date. Dates with no row are simply absent (available
    /// at the default price).
    pub async fn list_range(
        pool: &PgPool,
        property_id: DbId,
        range: &StayRange,
    ) -> Result<Vec<AvailabilityRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM availability_records
             WHERE property_id = $1 AND date >= $2 AND date < $3
             ORDER BY date ASC"
        );
        sqlx::query_as::<_, AvailabilityRecord>(&query)
            .bind(property_id)
            .bind(range.check_in())
            .bind(range.check_out())
            .fetch_all(pool)
            .await
    }

    /// Per-date price overrides in `[start, end)`, for the pricing
    /// calculator. Overrides on blocked dates are included; the caller
    /// has already established availability.
    pub async fn price_overrides_in_range(
        pool: &PgPool,
        property_id: DbId,
        range: &StayRange,
    ) -> Result<Vec<(Date, Money)>, sqlx::Error> {
        let rows: Vec<(Date, Money)> = sqlx::query_as(
            "SELECT date, price_override FROM availability_records
             WHERE property_id = $1 AND date >= $2 AND date < $3
               AND price_override IS NOT NULL
             ORDER BY date ASC",
        )
        .bind(property_id)
        .bind(range.check_in())
        .bind(range.check_out())
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    /// Mark every date in `[start, end)` unavailable with the given
    /// manual reason, optionally attaching a price override and minimum
    /// stay.
    ///
    /// Runs as one transaction: a conflict pre-check, then one guarded
    /// upsert per date. A date that already has an unavailable row is
    /// never partially blocked over; the whole call fails with
    /// [`CoreError::RangeNotAvailable`] and nothing is written.
    pub async fn block_range(
        pool: &PgPool,
        property_id: DbId,
        range: &StayRange,
        reason: BlockedReason,
        price_override: Option<Money>,
        minimum_stay: Option<i32>,
    ) -> Result<u64, CoreError> {
        if reason == BlockedReason::Booked {
            return Err(CoreError::Validation(
                "reason 'booked' is reserved for the reservation lifecycle".into(),
            ));
        }

        let mut tx = pool.begin().await.map_err(internal)?;

        if reservation_repo::conflict_exists(&mut *tx, property_id, range)
            .await
            .map_err(internal)?
        {
            return Err(CoreError::RangeNotAvailable(format!(
                "property {property_id} is not free between {} and {}",
                range.check_in(),
                range.check_out()
            )));
        }

        let mut blocked = 0u64;
        for date in range.days() {
            // The DO UPDATE arm only fires for rows that are still
            // available (price-override placeholders); occupied rows
            // fall through and surface as a missing write below.
            let result = sqlx::query(
                "INSERT INTO availability_records
                    (property_id, date, is_available, blocked_reason_id, price_override, minimum_stay)
                 VALUES ($1, $2, FALSE, $3, $4, $5)
                 ON CONFLICT ON CONSTRAINT uq_availability_property_date DO UPDATE SET
                    is_available = FALSE,
                    blocked_reason_id = EXCLUDED.blocked_reason_id,
                    price_override = COALESCE(EXCLUDED.price_override, availability_records.price_override),
                    minimum_stay = COALESCE(EXCLUDED.minimum_stay, availability_records.minimum_stay)
                 WHERE availability_records.is_available",
            )
            .bind(property_id)
            .bind(date)
            .bind(reason.id())
            .bind(price_override)
            .bind(minimum_stay)
            .execute(&mut *tx)
            .await
            .map_err(internal)?;
            blocked += result.rows_affected();
        }

        // A concurrent writer slipped in between the pre-check and the
        // upserts; roll everything back rather than partially block.
        if blocked != range.nights() as u64 {
            tx.rollback().await.map_err(internal)?;
            return Err(CoreError::RangeNotAvailable(format!(
                "property {property_id} became unavailable while blocking"
            )));
        }

        tx.commit().await.map_err(internal)?;
        Ok(blocked)
    }

    /// Clear manual blocks in `[start, end)`, returning how many dates
    /// were released.
    ///
    /// Dates blocked by a reservation (`reason = booked`) are skipped,
    /// not an error: a bulk unblock over a mixed range clears only the
    /// manual portion.
    pub async fn unblock_range(
        pool: &PgPool,
        property_id: DbId,
        range: &StayRange,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM availability_records
             WHERE property_id = $1 AND date >= $2 AND date < $3
               AND is_available = FALSE
               AND blocked_reason_id <> $4",
        )
        .bind(property_id)
        .bind(range.check_in())
        .bind(range.check_out())
        .bind(BlockedReason::Booked.id())
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}

fn internal(err: sqlx::Error) -> CoreError {
    CoreError::Internal(format!("availability query failed: {err}"))
}
