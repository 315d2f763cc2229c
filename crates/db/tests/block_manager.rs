//! Integration tests for administrative date-range blocks: all-or-nothing
//! blocking, booked-date ownership, and unblock semantics.

use chrono::NaiveDate;
use sqlx::PgPool;

use assert_matches::assert_matches;
use casabook_core::dates::StayRange;
use casabook_core::error::CoreError;
use casabook_core::pricing::PriceBreakdown;
use casabook_core::status::BlockedReason;
use casabook_core::types::DbId;
use casabook_db::models::customer::GuestIdentity;
use casabook_db::models::property::CreateProperty;
use casabook_db::models::reservation::NewReservation;
use casabook_db::repositories::{
    AvailabilityRepo, CustomerRepo, PropertyRepo, ReservationRepo,
};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn range(start: &str, end: &str) -> StayRange {
    StayRange::new(d(start), d(end)).unwrap()
}

async fn seed_property(pool: &PgPool) -> DbId {
    PropertyRepo::create(
        pool,
        &CreateProperty {
            name: "Casa Mirlo".to_string(),
            base_price: 4000,
            cleaning_fee: None,
            service_fee: None,
            max_guests: None,
            default_minimum_stay: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_booking(pool: &PgPool, property_id: DbId, start: &str, end: &str) -> DbId {
    let customer = CustomerRepo::find_or_create(
        pool,
        &GuestIdentity {
            first_name: Some("Grace".into()),
            last_name: Some("Hopper".into()),
            email: Some("grace@example.com".into()),
            phone: None,
            nationality: None,
        },
    )
    .await
    .unwrap();

    let nights = range(start, end).nights();
    let input = NewReservation {
        property_id,
        customer_id: customer.id,
        guest_name: "Grace Hopper".to_string(),
        guest_email: Some("grace@example.com".to_string()),
        guest_phone: None,
        guest_nationality: None,
        guest_count: 1,
        check_in_date: d(start),
        check_out_date: d(end),
        pricing: PriceBreakdown {
            base_price: 4000 * nights,
            cleaning_fee: 0,
            service_fee: 0,
            taxes: 0,
            total_amount: 4000 * nights,
        },
        special_requests: None,
    };
    ReservationRepo::create_booked(pool, &input, &range(start, end))
        .await
        .unwrap()
        .unwrap()
        .id
}

// ---------------------------------------------------------------------------
// Block
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn block_marks_every_date_in_half_open_range(pool: PgPool) {
    let property = seed_property(&pool).await;

    let count = AvailabilityRepo::block_range(
        &pool,
        property,
        &range("2024-05-01", "2024-05-04"),
        BlockedReason::Maintenance,
        None,
        None,
    )
    .await
    .unwrap();
    assert_eq!(count, 3);

    let records = AvailabilityRepo::list_range(&pool, property, &range("2024-05-01", "2024-05-05"))
        .await
        .unwrap();
    assert_eq!(records.len(), 3, "end date is exclusive");
    for record in &records {
        assert!(!record.is_available);
        assert_eq!(record.blocked_reason_id, Some(BlockedReason::Maintenance.id()));
        assert_eq!(record.reservation_id, None);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn block_with_override_and_minimum_stay(pool: PgPool) {
    let property = seed_property(&pool).await;

    AvailabilityRepo::block_range(
        &pool,
        property,
        &range("2024-05-01", "2024-05-03"),
        BlockedReason::Renovation,
        Some(9000),
        Some(3),
    )
    .await
    .unwrap();

    let records = AvailabilityRepo::list_range(&pool, property, &range("2024-05-01", "2024-05-03"))
        .await
        .unwrap();
    for record in &records {
        assert_eq!(record.price_override, Some(9000));
        assert_eq!(record.minimum_stay, Some(3));
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn block_over_booked_range_fails_without_partial_writes(pool: PgPool) {
    let property = seed_property(&pool).await;
    seed_booking(&pool, property, "2024-05-03", "2024-05-05").await;

    // Range straddles free dates and the booking.
    let result = AvailabilityRepo::block_range(
        &pool,
        property,
        &range("2024-05-01", "2024-05-06"),
        BlockedReason::Personal,
        None,
        None,
    )
    .await;
    assert_matches!(result, Err(CoreError::RangeNotAvailable(_)));

    // The free dates were not partially blocked.
    let records = AvailabilityRepo::list_range(&pool, property, &range("2024-05-01", "2024-05-03"))
        .await
        .unwrap();
    assert!(records.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn block_rejects_the_booked_reason(pool: PgPool) {
    let property = seed_property(&pool).await;
    let result = AvailabilityRepo::block_range(
        &pool,
        property,
        &range("2024-05-01", "2024-05-02"),
        BlockedReason::Booked,
        None,
        None,
    )
    .await;
    assert_matches!(result, Err(CoreError::Validation(_)));
}

// ---------------------------------------------------------------------------
// Unblock
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn unblock_clears_manual_blocks_only(pool: PgPool) {
    let property = seed_property(&pool).await;
    seed_booking(&pool, property, "2024-05-03", "2024-05-05").await;
    AvailabilityRepo::block_range(
        &pool,
        property,
        &range("2024-05-01", "2024-05-03"),
        BlockedReason::Maintenance,
        None,
        None,
    )
    .await
    .unwrap();

    // Bulk unblock across both the manual block and the booking.
    let cleared = AvailabilityRepo::unblock_range(&pool, property, &range("2024-05-01", "2024-05-06"))
        .await
        .unwrap();
    assert_eq!(cleared, 2, "only the manual dates are released");

    // The booking's dates stay blocked.
    assert!(!ReservationRepo::is_available(&pool, property, &range("2024-05-03", "2024-05-05"))
        .await
        .unwrap());
    // The manual dates are free again.
    assert!(ReservationRepo::is_available(&pool, property, &range("2024-05-01", "2024-05-03"))
        .await
        .unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unblock_then_block_round_trips(pool: PgPool) {
    let property = seed_property(&pool).await;

    AvailabilityRepo::block_range(
        &pool,
        property,
        &range("2024-05-01", "2024-05-04"),
        BlockedReason::Other,
        None,
        None,
    )
    .await
    .unwrap();
    AvailabilityRepo::unblock_range(&pool, property, &range("2024-05-01", "2024-05-04"))
        .await
        .unwrap();
    let count = AvailabilityRepo::block_range(
        &pool,
        property,
        &range("2024-05-01", "2024-05-04"),
        BlockedReason::Other,
        None,
        None,
    )
    .await
    .unwrap();
    assert_eq!(count, 3);

    let records = AvailabilityRepo::list_range(&pool, property, &range("2024-05-01", "2024-05-04"))
        .await
        .unwrap();
    assert_eq!(records.len(), 3);
    for record in &records {
        assert_eq!(record.blocked_reason_id, Some(BlockedReason::Other.id()));
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unblock_on_empty_range_is_a_no_op(pool: PgPool) {
    let property = seed_property(&pool).await;
    let cleared = AvailabilityRepo::unblock_range(&pool, property, &range("2024-05-01", "2024-05-04"))
        .await
        .unwrap();
    assert_eq!(cleared, 0);
}
