//! Repository for the `reservations` table and its calendar rows.
//!
//! Check-availability-then-write executes as a single serializable
//! transaction; the unique constraint on (property_id, date) is the
//! real race guard. The conflict pre-check exists so the common case
//! fails fast with a clean error instead of a constraint violation.

use sqlx::{PgConnection, PgPool};

use casabook_core::dates::StayRange;
use casabook_core::status::{BlockedReason, ReservationStatus, StatusId};
use casabook_core::types::{DbId, Timestamp};

use crate::models::reservation::{NewReservation, Reservation};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, property_id, customer_id, guest_name, guest_email, \
    guest_phone, guest_nationality, guest_count, check_in_date, check_out_date, \
    base_price, cleaning_fee, service_fee, taxes, total_amount, status_id, \
    payment_status_id, special_requests, cancellation_reason, cancelled_at, \
    created_at, updated_at";

/// Statuses that occupy the calendar. Cancelled and no-show
/// reservations do not conflict with new bookings.
const OCCUPYING_STATUS_IDS: [i16; 3] = [
    ReservationStatus::Pending.id(),
    ReservationStatus::Confirmed.id(),
    ReservationStatus::Completed.id(),
];

/// Reservation persistence plus the calendar writes that must stay
/// atomic with it.
pub struct ReservationRepo;

impl ReservationRepo {
    /// Insert a reservation in `pending` and one `booked` calendar row
    /// per occupied night, all in one serializable transaction.
    ///
    /// Returns the raw `sqlx::Error` on constraint violations; the
    /// engine translates `23505` on `uq_availability_property_date`
    /// (and `40001` serialization failures) into `RangeNotAvailable`.
    pub async fn create_booked(
        pool: &PgPool,
        input: &NewReservation,
        range: &StayRange,
    ) -> Result<Result<Reservation, RangeConflict>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await?;

        // Fast-path pre-check. The unique constraint below still
        // catches writers that race past this read.
        if conflict_exists(&mut *tx, input.property_id, range).await? {
            tx.rollback().await?;
            return Ok(Err(RangeConflict));
        }

        let query = format!(
            "INSERT INTO reservations
                (property_id, customer_id, guest_name, guest_email, guest_phone,
                 guest_nationality, guest_count, check_in_date, check_out_date,
                 base_price, cleaning_fee, service_fee, taxes, total_amount)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING {COLUMNS}"
        );
        let reservation = sqlx::query_as::<_, Reservation>(&query)
            .bind(input.property_id)
            .bind(input.customer_id)
            .bind(&input.guest_name)
            .bind(&input.guest_email)
            .bind(&input.guest_phone)
            .bind(&input.guest_nationality)
            .bind(input.guest_count)
            .bind(input.check_in_date)
            .bind(input.check_out_date)
            .bind(input.pricing.base_price)
            .bind(input.pricing.cleaning_fee)
            .bind(input.pricing.service_fee)
            .bind(input.pricing.taxes)
            .bind(input.pricing.total_amount)
            .fetch_one(&mut *tx)
            .await?;

        for date in range.days() {
            // Take over available placeholder rows (price overrides)
            // but keep their pricing data; a row that is already
            // unavailable violates uq_availability_property_date via
            // the un-matched DO UPDATE and is caught one level up.
            let result = sqlx::query(
                "INSERT INTO availability_records
                    (property_id, date, is_available, blocked_reason_id, reservation_id)
                 VALUES ($1, $2, FALSE, $3, $4)
                 ON CONFLICT ON CONSTRAINT uq_availability_property_date DO UPDATE SET
                    is_available = FALSE,
                    blocked_reason_id = EXCLUDED.blocked_reason_id,
                    reservation_id = EXCLUDED.reservation_id
                 WHERE availability_records.is_available",
            )
            .bind(input.property_id)
            .bind(date)
            .bind(BlockedReason::Booked.id())
            .bind(reservation.id)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                // Row exists and is occupied: same outcome as the
                // pre-check, discovered at write time.
                tx.rollback().await?;
                return Ok(Err(RangeConflict));
            }
        }

        tx.commit().await?;
        Ok(Ok(reservation))
    }

    /// Find a reservation by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Reservation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reservations WHERE id = $1");
        sqlx::query_as::<_, Reservation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all reservations for a property, newest first.
    pub async fn list_by_property(
        pool: &PgPool,
        property_id: DbId,
    ) -> Result<Vec<Reservation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reservations
             WHERE property_id = $1
             ORDER BY check_in_date DESC, id DESC"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(property_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a validated status transition, together with its calendar
    /// side effect, in one transaction.
    ///
    /// The caller (the lifecycle engine) has already checked the
    /// transition is legal; `expected_from` guards against a concurrent
    /// transition having won in between (compare-and-set on status_id).
    /// Returns `None` when the reservation no longer carries
    /// `expected_from`.
    pub async fn apply_transition(
        pool: &PgPool,
        id: DbId,
        expected_from: ReservationStatus,
        to: ReservationStatus,
        cancellation_reason: Option<&str>,
        cancelled_at: Option<Timestamp>,
        release_calendar: bool,
    ) -> Result<Option<Reservation>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE reservations SET
                status_id = $3,
                cancellation_reason = COALESCE($4, cancellation_reason),
                cancelled_at = COALESCE($5, cancelled_at)
             WHERE id = $1 AND status_id = $2
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Reservation>(&query)
            .bind(id)
            .bind(expected_from.id())
            .bind(to.id())
            .bind(cancellation_reason)
            .bind(cancelled_at)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(reservation) = updated else {
            tx.rollback().await?;
            return Ok(None);
        };

        if release_calendar {
            release_booked_rows(&mut *tx, id).await?;
        }

        tx.commit().await?;
        Ok(Some(reservation))
    }

    /// Update only the payment status. No calendar effect.
    pub async fn update_payment_status(
        pool: &PgPool,
        id: DbId,
        payment_status_id: StatusId,
    ) -> Result<Option<Reservation>, sqlx::Error> {
        let query = format!(
            "UPDATE reservations SET payment_status_id = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(id)
            .bind(payment_status_id)
            .fetch_optional(pool)
            .await
    }

    /// Availability query for display flows: true when no blocked date
    /// and no occupying reservation overlaps `[start, end)`. Runs at
    /// default isolation; booking flows re-check inside
    /// [`create_booked`]'s transaction.
    pub async fn is_available(
        pool: &PgPool,
        property_id: DbId,
        range: &StayRange,
    ) -> Result<bool, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        let conflict = conflict_exists(&mut *conn, property_id, range).await?;
        Ok(!conflict)
    }
}

/// Marker for "the range is taken", distinct from infrastructure
/// failures so callers can map it to the conflict error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeConflict;

/// Shared conflict check: any unavailable calendar day in the range, or
/// any pending/confirmed/completed reservation overlapping it with
/// half-open semantics.
pub(crate) async fn conflict_exists(
    conn: &mut PgConnection,
    property_id: DbId,
    range: &StayRange,
) -> Result<bool, sqlx::Error> {
    let (blocked,): (bool,) = sqlx::query_as(
        "SELECT EXISTS (
            SELECT 1 FROM availability_records
            WHERE property_id = $1 AND date >= $2 AND date < $3
              AND is_available = FALSE
         )",
    )
    .bind(property_id)
    .bind(range.check_in())
    .bind(range.check_out())
    .fetch_one(&mut *conn)
    .await?;
    if blocked {
        return Ok(true);
    }

    let (overlapping,): (bool,) = sqlx::query_as(
        "SELECT EXISTS (
            SELECT 1 FROM reservations
            WHERE property_id = $1
              AND status_id = ANY($2)
              AND check_in_date < $4
              AND check_out_date > $3
         )",
    )
    .bind(property_id)
    .bind(&OCCUPYING_STATUS_IDS[..])
    .bind(range.check_in())
    .bind(range.check_out())
    .fetch_one(&mut *conn)
    .await?;
    Ok(overlapping)
}

/// Release a reservation's `booked` rows: rows carrying pricing data
/// (price_override or minimum_stay) flip back to available so the
/// override survives cancellation; bare rows are deleted.
async fn release_booked_rows(
    conn: &mut PgConnection,
    reservation_id: DbId,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE availability_records SET
            is_available = TRUE,
            blocked_reason_id = NULL,
            reservation_id = NULL
         WHERE reservation_id = $1
           AND (price_override IS NOT NULL OR minimum_stay IS NOT NULL)",
    )
    .bind(reservation_id)
    .execute(&mut *conn)
    .await?;

    sqlx::query("DELETE FROM availability_records WHERE reservation_id = $1")
        .bind(reservation_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}
