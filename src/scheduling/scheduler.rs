use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use thiserror::Error;
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime};
use tracing::{debug, info};
use uuid::Uuid;

use crate::db::models::{Booking, NewBooking, Service};
use crate::db::DatabaseError;
use crate::notify::NotificationHub;

use super::slots::{candidate_slots, overlaps};
use super::store::SchedulerStore;
use super::window::{day_bounds, resolve_window, weekday};

#[derive(Debug, Error)]
pub enum SchedulingError {
    /// The requested interval overlaps a booking committed first. Expected
    /// and recoverable: the caller re-lists slots and retries.
    #[error("requested slot at {start_time} overlaps an existing booking")]
    Conflict { start_time: OffsetDateTime },

    #[error(transparent)]
    Storage(#[from] DatabaseError),
}

/// Per-provider mutual exclusion for the check-and-insert critical section.
#[derive(Default)]
struct ProviderLocks {
    inner: Mutex<HashMap<Uuid, Arc<tokio::sync::Mutex<()>>>>,
}

impl ProviderLocks {
    async fn acquire(&self, provider_id: Uuid) -> tokio::sync::OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().expect("provider lock map poisoned");
            Arc::clone(map.entry(provider_id).or_default())
        };
        lock.lock_owned().await
    }
}

/// Enumerates bookable slots and arbitrates booking conflicts. Creation is
/// serialized per provider; the listing path takes no lock and tolerates
/// staleness.
pub struct SlotScheduler {
    store: Arc<dyn SchedulerStore>,
    locks: ProviderLocks,
    notifier: NotificationHub,
}

impl SlotScheduler {
    pub fn new(store: Arc<dyn SchedulerStore>, notifier: NotificationHub) -> Self {
        Self {
            store,
            locks: ProviderLocks::default(),
            notifier,
        }
    }

    /// Bookable start instants for `service` with `provider_id` on `date`.
    /// No rule for that weekday means an empty list, not an error. The
    /// result is stale the moment it is returned; `create_booking` re-checks
    /// under the provider lock.
    pub async fn available_slots(
        &self,
        provider_id: Uuid,
        service: &Service,
        date: Date,
    ) -> Result<Vec<OffsetDateTime>, SchedulingError> {
        let rule = self
            .store
            .availability_for_day(provider_id, weekday(date))
            .await?;
        let Some(rule) = rule else {
            return Ok(Vec::new());
        };

        let window = resolve_window(&rule, date);
        let (day_start, day_end) = day_bounds(date);
        let existing = self
            .store
            .bookings_in_range(provider_id, day_start, day_end)
            .await?;

        Ok(candidate_slots(&window, service.duration_minutes, &existing))
    }

    /// Atomic check-and-insert. The overlap probe and the insert run under
    /// the provider's lock: of two concurrent overlapping requests exactly
    /// one commits, the other gets `Conflict`. The committed booking is
    /// announced to the provider's notification channel; delivery is
    /// best-effort and never affects the result.
    pub async fn create_booking(
        &self,
        service: &Service,
        customer_id: Uuid,
        start_time: OffsetDateTime,
    ) -> Result<Booking, SchedulingError> {
        let end_time = start_time + Duration::minutes(i64::from(service.duration_minutes));

        let _guard = self.locks.acquire(service.provider_id).await;

        let current = self
            .store
            .bookings_in_range(service.provider_id, start_time, end_time)
            .await?;
        if current
            .iter()
            .any(|booking| overlaps(start_time, end_time, booking.start_time, booking.end_time))
        {
            debug!(
                provider_id = %service.provider_id,
                %start_time,
                "booking rejected: slot already taken"
            );
            return Err(SchedulingError::Conflict { start_time });
        }

        let booking = self
            .store
            .insert_booking(&NewBooking {
                service_id: service.id,
                customer_id,
                start_time,
                end_time,
            })
            .await?;

        info!(
            booking_id = %booking.id,
            provider_id = %service.provider_id,
            service = %service.name,
            %start_time,
            "booking committed"
        );
        self.notify_provider(service, start_time);

        Ok(booking)
    }

    fn notify_provider(&self, service: &Service, start_time: OffsetDateTime) {
        let fmt = format_description!("[hour]:[minute]");
        let when = start_time
            .format(fmt)
            .unwrap_or_else(|_| start_time.to_string());
        let message = format!(
            "You have a new booking for \"{}\" at {}",
            service.name, when
        );
        self.notifier.publish(service.provider_id, &message);
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use time::macros::{date, datetime, time};
    use time::Time;

    use super::super::store::memory::MemoryStore;
    use super::*;
    use crate::db::models::AvailabilityRule;

    fn monday_rule(provider_id: Uuid, start: Time, end: Time) -> AvailabilityRule {
        AvailabilityRule {
            id: Uuid::new_v4(),
            provider_id,
            day_of_week: 1,
            start_time: start,
            end_time: end,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    fn haircut(provider_id: Uuid) -> Service {
        Service {
            id: Uuid::new_v4(),
            provider_id,
            name: "Haircut".to_string(),
            description: None,
            price: Decimal::new(2500, 2),
            duration_minutes: 60,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    fn scheduler_with_rule(
        provider_id: Uuid,
        notifier: NotificationHub,
    ) -> (Arc<MemoryStore>, SlotScheduler) {
        let store = Arc::new(MemoryStore::with_rules(vec![monday_rule(
            provider_id,
            time!(09:00),
            time!(17:00),
        )]));
        let scheduler = SlotScheduler::new(store.clone(), notifier);
        (store, scheduler)
    }

    #[tokio::test]
    async fn booking_commits_and_notifies_the_provider() {
        let provider_id = Uuid::new_v4();
        let notifier = NotificationHub::new();
        let mut rx = notifier.subscribe(provider_id);
        let (store, scheduler) = scheduler_with_rule(provider_id, notifier);
        let service = haircut(provider_id);

        let booking = scheduler
            .create_booking(
                &service,
                Uuid::new_v4(),
                datetime!(2024 - 08 - 12 10:00 UTC),
            )
            .await
            .expect("slot is free");

        assert_eq!(booking.end_time, datetime!(2024 - 08 - 12 11:00 UTC));
        assert_eq!(store.snapshot().await.len(), 1);

        let message = rx.recv().await.expect("notification delivered");
        assert!(message.contains("Haircut"));
        assert!(message.contains("10:00"));
    }

    #[tokio::test]
    async fn stale_slot_is_rejected_without_inserting() {
        let provider_id = Uuid::new_v4();
        let (store, scheduler) = scheduler_with_rule(provider_id, NotificationHub::new());
        let service = haircut(provider_id);

        scheduler
            .create_booking(
                &service,
                Uuid::new_v4(),
                datetime!(2024 - 08 - 12 10:00 UTC),
            )
            .await
            .expect("first booking commits");

        let second = scheduler
            .create_booking(
                &service,
                Uuid::new_v4(),
                datetime!(2024 - 08 - 12 10:30 UTC),
            )
            .await;

        assert!(matches!(second, Err(SchedulingError::Conflict { .. })));
        assert_eq!(store.snapshot().await.len(), 1);
    }

    #[tokio::test]
    async fn rebooking_the_same_start_conflicts() {
        let provider_id = Uuid::new_v4();
        let (store, scheduler) = scheduler_with_rule(provider_id, NotificationHub::new());
        let service = haircut(provider_id);
        let start = datetime!(2024 - 08 - 12 10:00 UTC);

        let slots = scheduler
            .available_slots(provider_id, &service, date!(2024 - 08 - 12))
            .await
            .expect("listing succeeds");
        assert!(slots.contains(&start));

        scheduler
            .create_booking(&service, Uuid::new_v4(), start)
            .await
            .expect("first booking commits");
        let second = scheduler
            .create_booking(&service, Uuid::new_v4(), start)
            .await;

        assert!(matches!(second, Err(SchedulingError::Conflict { .. })));
        assert_eq!(store.snapshot().await.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_overlapping_requests_commit_exactly_one() {
        let provider_id = Uuid::new_v4();
        let (store, scheduler) = scheduler_with_rule(provider_id, NotificationHub::new());
        let scheduler = Arc::new(scheduler);
        let service = haircut(provider_id);

        let first = {
            let scheduler = Arc::clone(&scheduler);
            let service = service.clone();
            tokio::spawn(async move {
                scheduler
                    .create_booking(
                        &service,
                        Uuid::new_v4(),
                        datetime!(2024 - 08 - 12 10:00 UTC),
                    )
                    .await
            })
        };
        let second = {
            let scheduler = Arc::clone(&scheduler);
            let service = service.clone();
            tokio::spawn(async move {
                scheduler
                    .create_booking(
                        &service,
                        Uuid::new_v4(),
                        datetime!(2024 - 08 - 12 10:30 UTC),
                    )
                    .await
            })
        };

        let outcomes = [
            first.await.expect("task completes"),
            second.await.expect("task completes"),
        ];

        let committed = outcomes.iter().filter(|r| r.is_ok()).count();
        let conflicts = outcomes
            .iter()
            .filter(|r| matches!(r, Err(SchedulingError::Conflict { .. })))
            .count();
        assert_eq!(committed, 1);
        assert_eq!(conflicts, 1);

        let bookings = store.snapshot().await;
        assert_eq!(bookings.len(), 1);
        for (i, a) in bookings.iter().enumerate() {
            for b in bookings.iter().skip(i + 1) {
                assert!(!overlaps(a.start_time, a.end_time, b.start_time, b.end_time));
            }
        }
    }

    #[tokio::test]
    async fn no_rule_for_the_weekday_means_no_slots() {
        let provider_id = Uuid::new_v4();
        let store = Arc::new(MemoryStore::with_rules(Vec::new()));
        let scheduler = SlotScheduler::new(store, NotificationHub::new());
        let service = haircut(provider_id);

        let slots = scheduler
            .available_slots(provider_id, &service, date!(2024 - 08 - 12))
            .await
            .expect("listing succeeds");

        assert!(slots.is_empty());
    }

    #[tokio::test]
    async fn listing_reflects_committed_bookings() {
        let provider_id = Uuid::new_v4();
        let (_store, scheduler) = scheduler_with_rule(provider_id, NotificationHub::new());
        let service = haircut(provider_id);

        scheduler
            .create_booking(
                &service,
                Uuid::new_v4(),
                datetime!(2024 - 08 - 12 10:00 UTC),
            )
            .await
            .expect("booking commits");

        let slots = scheduler
            .available_slots(provider_id, &service, date!(2024 - 08 - 12))
            .await
            .expect("listing succeeds");

        assert!(!slots.contains(&datetime!(2024 - 08 - 12 09:30 UTC)));
        assert!(!slots.contains(&datetime!(2024 - 08 - 12 10:00 UTC)));
        assert!(!slots.contains(&datetime!(2024 - 08 - 12 10:30 UTC)));
        assert!(slots.contains(&datetime!(2024 - 08 - 12 09:00 UTC)));
        assert!(slots.contains(&datetime!(2024 - 08 - 12 11:00 UTC)));
    }
}
