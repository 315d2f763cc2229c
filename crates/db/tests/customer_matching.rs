//! Integration tests for guest deduplication: lookup precedence,
//! non-destructive merge, and idempotency.

use assert_matches::assert_matches;
use sqlx::PgPool;

use casabook_core::error::CoreError;
use casabook_db::models::customer::GuestIdentity;
use casabook_db::repositories::CustomerRepo;

fn guest(email: Option<&str>, phone: Option<&str>) -> GuestIdentity {
    GuestIdentity {
        first_name: Some("Ada".into()),
        last_name: Some("Lovelace".into()),
        email: email.map(Into::into),
        phone: phone.map(Into::into),
        nationality: None,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn creates_a_new_active_customer(pool: PgPool) {
    let customer = CustomerRepo::find_or_create(&pool, &guest(Some("ada@example.com"), None))
        .await
        .unwrap();
    assert_eq!(customer.status, "active");
    assert_eq!(customer.email.as_deref(), Some("ada@example.com"));
    assert_eq!(customer.first_name, "Ada");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn repeated_identical_calls_are_idempotent(pool: PgPool) {
    let first = CustomerRepo::find_or_create(&pool, &guest(Some("ada@example.com"), Some("+4915112345")))
        .await
        .unwrap();
    let second = CustomerRepo::find_or_create(&pool, &guest(Some("ada@example.com"), Some("+4915112345")))
        .await
        .unwrap();
    assert_eq!(first.id, second.id);

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM customers")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn email_formatting_differences_still_match(pool: PgPool) {
    let first = CustomerRepo::find_or_create(&pool, &guest(Some("ada@example.com"), None))
        .await
        .unwrap();
    let second = CustomerRepo::find_or_create(&pool, &guest(Some("  Ada@Example.COM "), None))
        .await
        .unwrap();
    assert_eq!(first.id, second.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn email_match_takes_precedence_over_phone(pool: PgPool) {
    let by_email = CustomerRepo::find_or_create(&pool, &guest(Some("ada@example.com"), None))
        .await
        .unwrap();
    let by_phone = CustomerRepo::find_or_create(&pool, &guest(None, Some("+4915112345")))
        .await
        .unwrap();
    assert_ne!(by_email.id, by_phone.id);

    // A request carrying the first customer's email and the second's
    // phone resolves to the email match.
    let resolved = CustomerRepo::find_or_create(
        &pool,
        &guest(Some("ada@example.com"), Some("+4915112345")),
    )
    .await
    .unwrap();
    assert_eq!(resolved.id, by_email.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn phone_match_when_email_is_unknown(pool: PgPool) {
    let original = CustomerRepo::find_or_create(&pool, &guest(None, Some("+49 151 123-45")))
        .await
        .unwrap();
    // Same number, different formatting, no email.
    let matched = CustomerRepo::find_or_create(&pool, &guest(None, Some("+4915112345")))
        .await
        .unwrap();
    assert_eq!(original.id, matched.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn merge_upgrades_fields_but_never_blanks_them(pool: PgPool) {
    let original = CustomerRepo::find_or_create(
        &pool,
        &GuestIdentity {
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            email: Some("ada@example.com".into()),
            phone: Some("+4915112345".into()),
            nationality: Some("GB".into()),
        },
    )
    .await
    .unwrap();

    // Re-book with a new last name but empty phone and nationality.
    let merged = CustomerRepo::find_or_create(
        &pool,
        &GuestIdentity {
            first_name: Some("Ada".into()),
            last_name: Some("King".into()),
            email: Some("ada@example.com".into()),
            phone: None,
            nationality: Some("".into()),
        },
    )
    .await
    .unwrap();

    assert_eq!(merged.id, original.id);
    assert_eq!(merged.last_name, "King", "differing field upgraded");
    assert_eq!(merged.phone.as_deref(), Some("+4915112345"), "absent field kept");
    assert_eq!(merged.nationality.as_deref(), Some("GB"), "empty field kept");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn guest_without_email_or_phone_is_rejected(pool: PgPool) {
    let result = CustomerRepo::find_or_create(&pool, &guest(None, None)).await;
    assert_matches!(result, Err(CoreError::Validation(_)));
}
