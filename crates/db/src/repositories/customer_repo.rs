//! Repository for the `customers` table, which doubles as the customer
//! matcher.

use sqlx::PgPool;

use casabook_core::customer::{normalize_email, normalize_phone};
use casabook_core::error::CoreError;
use casabook_core::types::DbId;

use crate::models::customer::{Customer, GuestIdentity};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, first_name, last_name, email, phone, nationality, status, created_at, updated_at";

/// Deduplicates guests into a stable customer identity.
pub struct CustomerRepo;

impl CustomerRepo {
    /// Find an existing customer by email (first) or phone (second),
    /// merging the incoming fields non-destructively; otherwise create
    /// a new customer with status `active`.
    ///
    /// Merge rule: an incoming non-empty field overwrites the stored
    /// value (last write wins per field), but an empty or absent field
    /// never erases one. Idempotent under repeated identical input.
    pub async fn find_or_create(
        pool: &PgPool,
        guest: &GuestIdentity,
    ) -> Result<Customer, CoreError> {
        let email = guest.email.as_deref().and_then(normalize_email);
        let phone = guest.phone.as_deref().and_then(normalize_phone);

        if email.is_none() && phone.is_none() {
            return Err(CoreError::Validation(
                "guest must supply an email or a phone number".into(),
            ));
        }

        let existing = Self::find_match(pool, email.as_deref(), phone.as_deref())
            .await
            .map_err(internal)?;

        let customer = match existing {
            Some(found) => Self::merge(pool, found.id, guest, email.as_deref(), phone.as_deref())
                .await
                .map_err(internal)?,
            None => Self::insert(pool, guest, email.as_deref(), phone.as_deref())
                .await
                .map_err(internal)?,
        };
        Ok(customer)
    }

    /// Lookup with explicit precedence: exact email match first, then
    /// exact phone match.
    async fn find_match(
        pool: &PgPool,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Option<Customer>, sqlx::Error> {
        if let Some(email) = email {
            let query = format!("SELECT {COLUMNS} FROM customers WHERE email = $1");
            let found = sqlx::query_as::<_, Customer>(&query)
                .bind(email)
                .fetch_optional(pool)
                .await?;
            if found.is_some() {
                return Ok(found);
            }
        }
        if let Some(phone) = phone {
            let query = format!("SELECT {COLUMNS} FROM customers WHERE phone = $1");
            return sqlx::query_as::<_, Customer>(&query)
                .bind(phone)
                .fetch_optional(pool)
                .await;
        }
        Ok(None)
    }

    /// Upgrade-only merge: `NULLIF` turns empty incoming values into
    /// NULL so `COALESCE` keeps the stored column.
    async fn merge(
        pool: &PgPool,
        id: DbId,
        guest: &GuestIdentity,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Customer, sqlx::Error> {
        let query = format!(
            "UPDATE customers SET
                first_name = COALESCE(NULLIF($2, ''), first_name),
                last_name = COALESCE(NULLIF($3, ''), last_name),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                nationality = COALESCE(NULLIF($6, ''), nationality)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .bind(guest.first_name.as_deref().unwrap_or("").trim())
            .bind(guest.last_name.as_deref().unwrap_or("").trim())
            .bind(email)
            .bind(phone)
            .bind(guest.nationality.as_deref().unwrap_or("").trim())
            .fetch_one(pool)
            .await
    }

    async fn insert(
        pool: &PgPool,
        guest: &GuestIdentity,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Customer, sqlx::Error> {
        // ON CONFLICT on the email index keeps concurrent identical
        // requests idempotent instead of failing the loser.
        let query = format!(
            "INSERT INTO customers (first_name, last_name, email, phone, nationality)
             VALUES ($1, $2, $3, $4, NULLIF($5, ''))
             ON CONFLICT (email) WHERE email IS NOT NULL DO UPDATE SET
                first_name = COALESCE(NULLIF(EXCLUDED.first_name, ''), customers.first_name),
                last_name = COALESCE(NULLIF(EXCLUDED.last_name, ''), customers.last_name),
                phone = COALESCE(EXCLUDED.phone, customers.phone),
                nationality = COALESCE(EXCLUDED.nationality, customers.nationality)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(guest.first_name.as_deref().unwrap_or("").trim())
            .bind(guest.last_name.as_deref().unwrap_or("").trim())
            .bind(email)
            .bind(phone)
            .bind(guest.nationality.as_deref().unwrap_or("").trim())
            .fetch_one(pool)
            .await
    }

    /// Find a customer by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers WHERE id = $1");
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

fn internal(err: sqlx::Error) -> CoreError {
    CoreError::Internal(format!("customer lookup failed: {err}"))
}
