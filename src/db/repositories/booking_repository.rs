use rust_decimal::Decimal;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::db::models::{Booking, CustomerBooking, NewBooking, ProviderBooking};
use crate::db::DatabaseError;

pub struct BookingRepository;

impl BookingRepository {
    /// Bookings for a provider whose `[start_time, end_time)` interval
    /// intersects `[from, to)`. Serves both the day fetch for slot listing
    /// and the commit-time conflict probe.
    pub async fn in_range(
        pool: &PgPool,
        provider_id: Uuid,
        from: OffsetDateTime,
        to: OffsetDateTime,
    ) -> Result<Vec<Booking>, DatabaseError> {
        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT b.id, b.service_id, b.customer_id, b.start_time, b.end_time, b.created_at
            FROM bookings b
            JOIN services s ON s.id = b.service_id
            WHERE s.provider_id = $1 AND b.start_time < $3 AND b.end_time > $2
            ORDER BY b.start_time
            "#,
        )
        .bind(provider_id)
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await?;

        Ok(bookings)
    }

    pub async fn insert(pool: &PgPool, booking: &NewBooking) -> Result<Booking, DatabaseError> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (service_id, customer_id, start_time, end_time)
            VALUES ($1, $2, $3, $4)
            RETURNING id, service_id, customer_id, start_time, end_time, created_at
            "#,
        )
        .bind(booking.service_id)
        .bind(booking.customer_id)
        .bind(booking.start_time)
        .bind(booking.end_time)
        .fetch_one(pool)
        .await?;

        Ok(booking)
    }

    pub async fn for_customer(
        pool: &PgPool,
        customer_id: Uuid,
    ) -> Result<Vec<CustomerBooking>, DatabaseError> {
        let bookings = sqlx::query_as::<_, CustomerBooking>(
            r#"
            SELECT b.id, b.service_id, b.start_time, b.end_time,
                   s.name AS service_name, u.name AS provider_name
            FROM bookings b
            JOIN services s ON s.id = b.service_id
            JOIN users u ON u.id = s.provider_id
            WHERE b.customer_id = $1
            ORDER BY b.start_time DESC
            "#,
        )
        .bind(customer_id)
        .fetch_all(pool)
        .await?;

        Ok(bookings)
    }

    /// Bookings starting inside `[from, to)` with customer details joined,
    /// for the provider dashboard.
    pub async fn upcoming_for_provider(
        pool: &PgPool,
        provider_id: Uuid,
        from: OffsetDateTime,
        to: OffsetDateTime,
    ) -> Result<Vec<ProviderBooking>, DatabaseError> {
        let bookings = sqlx::query_as::<_, ProviderBooking>(
            r#"
            SELECT b.id, b.start_time, b.end_time,
                   s.name AS service_name, c.name AS customer_name, c.email AS customer_email
            FROM bookings b
            JOIN services s ON s.id = b.service_id
            JOIN users c ON c.id = b.customer_id
            WHERE s.provider_id = $1 AND b.start_time >= $2 AND b.start_time < $3
            ORDER BY b.start_time
            "#,
        )
        .bind(provider_id)
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await?;

        Ok(bookings)
    }

    /// Booking count and earnings sum for bookings starting in `[from, to)`.
    pub async fn stats_for_provider(
        pool: &PgPool,
        provider_id: Uuid,
        from: OffsetDateTime,
        to: OffsetDateTime,
    ) -> Result<(i64, Decimal), DatabaseError> {
        let stats = sqlx::query_as::<_, (i64, Decimal)>(
            r#"
            SELECT COUNT(*), COALESCE(SUM(s.price), 0)
            FROM bookings b
            JOIN services s ON s.id = b.service_id
            WHERE s.provider_id = $1 AND b.start_time >= $2 AND b.start_time < $3
            "#,
        )
        .bind(provider_id)
        .bind(from)
        .bind(to)
        .fetch_one(pool)
        .await?;

        Ok(stats)
    }
}
