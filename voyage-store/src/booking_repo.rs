use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use voyage_core::repository::{BookingRepository, CreatedBooking, StoreError};
use voyage_domain::{Booking, NewBooking, PaymentStatus};

const BOOKING_COLUMNS: &str = "id, package_id, name, email, phone, message, \
     stripe_session_id, stripe_payment_intent_id, amount, payment_status, \
     created_at, updated_at";

pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal struct for type-safe querying
#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    package_id: Uuid,
    name: String,
    email: String,
    phone: Option<String>,
    message: Option<String>,
    stripe_session_id: Option<String>,
    stripe_payment_intent_id: Option<String>,
    amount: Option<Decimal>,
    payment_status: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Booking {
            id: row.id,
            package_id: row.package_id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            message: row.message,
            stripe_session_id: row.stripe_session_id,
            stripe_payment_intent_id: row.stripe_payment_intent_id,
            amount: row.amount,
            payment_status: row.payment_status.as_deref().and_then(PaymentStatus::parse),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn db_err(e: sqlx::Error) -> StoreError {
    StoreError::Database(e.to_string())
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn create(&self, input: &NewBooking) -> Result<Option<CreatedBooking>, StoreError> {
        let title: Option<String> = sqlx::query_scalar("SELECT title FROM packages WHERE id = $1")
            .bind(input.package_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        let Some(package_title) = title else {
            return Ok(None);
        };

        let sql = format!(
            "INSERT INTO bookings (id, package_id, name, email, phone, message) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {BOOKING_COLUMNS}"
        );
        let row: BookingRow = sqlx::query_as(&sql)
            .bind(Uuid::new_v4())
            .bind(input.package_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.message)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(Some(CreatedBooking {
            booking: row.into(),
            package_title,
        }))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, StoreError> {
        let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1");
        let row: Option<BookingRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.map(Booking::from))
    }

    async fn find_by_payment_intent(
        &self,
        intent_id: &str,
    ) -> Result<Option<Booking>, StoreError> {
        let sql =
            format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE stripe_payment_intent_id = $1");
        let row: Option<BookingRow> = sqlx::query_as(&sql)
            .bind(intent_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.map(Booking::from))
    }

    async fn record_checkout_session(
        &self,
        id: Uuid,
        session_id: &str,
        amount: Decimal,
    ) -> Result<Option<Booking>, StoreError> {
        let sql = format!(
            "UPDATE bookings SET stripe_session_id = $2, amount = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING {BOOKING_COLUMNS}"
        );
        let row: Option<BookingRow> = sqlx::query_as(&sql)
            .bind(id)
            .bind(session_id)
            .bind(amount)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.map(Booking::from))
    }

    async fn record_payment_status(
        &self,
        id: Uuid,
        status: PaymentStatus,
        payment_intent_id: Option<&str>,
    ) -> Result<Option<Booking>, StoreError> {
        // COALESCE keeps the stored intent id when the event carries none.
        let sql = format!(
            "UPDATE bookings SET payment_status = $2, \
             stripe_payment_intent_id = COALESCE($3, stripe_payment_intent_id), \
             updated_at = NOW() \
             WHERE id = $1 RETURNING {BOOKING_COLUMNS}"
        );
        let row: Option<BookingRow> = sqlx::query_as(&sql)
            .bind(id)
            .bind(status.as_str())
            .bind(payment_intent_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.map(Booking::from))
    }
}
