use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::db::models::{AvailabilityRule, Booking, NewBooking};
use crate::db::repositories::{AvailabilityRepository, BookingRepository};
use crate::db::DatabaseError;

/// Storage surface the scheduler depends on. The production implementation
/// is Postgres-backed; tests substitute an in-memory store.
#[async_trait]
pub trait SchedulerStore: Send + Sync {
    async fn availability_for_day(
        &self,
        provider_id: Uuid,
        day_of_week: i16,
    ) -> Result<Option<AvailabilityRule>, DatabaseError>;

    /// Bookings for `provider_id` whose interval intersects `[from, to)`.
    async fn bookings_in_range(
        &self,
        provider_id: Uuid,
        from: OffsetDateTime,
        to: OffsetDateTime,
    ) -> Result<Vec<Booking>, DatabaseError>;

    async fn insert_booking(&self, booking: &NewBooking) -> Result<Booking, DatabaseError>;
}

pub struct PgSchedulerStore {
    pool: PgPool,
}

impl PgSchedulerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchedulerStore for PgSchedulerStore {
    async fn availability_for_day(
        &self,
        provider_id: Uuid,
        day_of_week: i16,
    ) -> Result<Option<AvailabilityRule>, DatabaseError> {
        AvailabilityRepository::for_day(&self.pool, provider_id, day_of_week).await
    }

    async fn bookings_in_range(
        &self,
        provider_id: Uuid,
        from: OffsetDateTime,
        to: OffsetDateTime,
    ) -> Result<Vec<Booking>, DatabaseError> {
        BookingRepository::in_range(&self.pool, provider_id, from, to).await
    }

    async fn insert_booking(&self, booking: &NewBooking) -> Result<Booking, DatabaseError> {
        BookingRepository::insert(&self.pool, booking).await
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use tokio::sync::Mutex;

    use super::*;
    use crate::scheduling::slots::overlaps;

    /// In-memory stand-in for the Postgres store; every booking in the map
    /// belongs to the single provider the rules were registered for.
    pub struct MemoryStore {
        rules: Vec<AvailabilityRule>,
        bookings: Mutex<Vec<Booking>>,
    }

    impl MemoryStore {
        pub fn with_rules(rules: Vec<AvailabilityRule>) -> Self {
            Self {
                rules,
                bookings: Mutex::new(Vec::new()),
            }
        }

        pub async fn snapshot(&self) -> Vec<Booking> {
            self.bookings.lock().await.clone()
        }
    }

    #[async_trait]
    impl SchedulerStore for MemoryStore {
        async fn availability_for_day(
            &self,
            provider_id: Uuid,
            day_of_week: i16,
        ) -> Result<Option<AvailabilityRule>, DatabaseError> {
            Ok(self
                .rules
                .iter()
                .find(|rule| rule.provider_id == provider_id && rule.day_of_week == day_of_week)
                .cloned())
        }

        async fn bookings_in_range(
            &self,
            _provider_id: Uuid,
            from: OffsetDateTime,
            to: OffsetDateTime,
        ) -> Result<Vec<Booking>, DatabaseError> {
            let bookings = self.bookings.lock().await;
            Ok(bookings
                .iter()
                .filter(|booking| overlaps(from, to, booking.start_time, booking.end_time))
                .cloned()
                .collect())
        }

        async fn insert_booking(&self, booking: &NewBooking) -> Result<Booking, DatabaseError> {
            let committed = Booking {
                id: Uuid::new_v4(),
                service_id: booking.service_id,
                customer_id: booking.customer_id,
                start_time: booking.start_time,
                end_time: booking.end_time,
                created_at: OffsetDateTime::now_utc(),
            };
            self.bookings.lock().await.push(committed.clone());
            Ok(committed)
        }
    }
}
