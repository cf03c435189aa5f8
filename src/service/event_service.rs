//! Event service: validates input, drives the store and emits changes.

use std::sync::Arc;

use crate::domain::{CatalogChange, ChangeBus, Event, EventDetails, EventId, MAX_CAPACITY};
use crate::error::BookingError;
use crate::store::EventStore;

/// Orchestration layer for all event operations.
///
/// Owns a handle to the [`EventStore`] for state and the [`ChangeBus`] for
/// notifications. Every mutation follows the pattern: validate → call the
/// store → log → publish change → return the stored copy. Nothing is
/// published when the store call fails.
#[derive(Debug, Clone)]
pub struct EventService {
    store: Arc<dyn EventStore>,
    change_bus: ChangeBus,
}

impl EventService {
    /// Creates a new `EventService`.
    #[must_use]
    pub fn new(store: Arc<dyn EventStore>, change_bus: ChangeBus) -> Self {
        Self { store, change_bus }
    }

    /// Returns a reference to the inner [`ChangeBus`].
    #[must_use]
    pub fn change_bus(&self) -> &ChangeBus {
        &self.change_bus
    }

    /// Returns every event ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::StorageUnavailable`] if the store fails.
    pub async fn list_events(&self) -> Result<Vec<Event>, BookingError> {
        self.store.list().await
    }

    /// Returns one event.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::EventNotFound`] if the id is unknown.
    pub async fn get_event(&self, id: EventId) -> Result<Event, BookingError> {
        self.store.get(id).await
    }

    /// Creates an unbooked event.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidArgument`] if the capacity is out of
    /// range, or a storage error.
    pub async fn create_event(&self, details: EventDetails) -> Result<Event, BookingError> {
        check_capacity(details.total_capacity)?;
        let event = self.store.insert(details).await?;

        tracing::info!(event_id = %event.id, total_capacity = event.total_capacity, "event created");
        let _ = self.change_bus.publish(CatalogChange::created(&event));
        Ok(event)
    }

    /// Replaces the editable fields of an event, keeping its bookings.
    ///
    /// A capacity below the current booked count is accepted and only
    /// logged.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::EventNotFound`] if the id is unknown, or
    /// [`BookingError::InvalidArgument`] if the capacity is out of range.
    pub async fn update_event(
        &self,
        id: EventId,
        details: EventDetails,
    ) -> Result<Event, BookingError> {
        check_capacity(details.total_capacity)?;
        let event = self.store.update(id, details).await?;

        if event.total_capacity < event.booked_seats {
            tracing::warn!(
                event_id = %id,
                total_capacity = event.total_capacity,
                booked_seats = event.booked_seats,
                "capacity lowered below booked seats"
            );
        }
        tracing::info!(event_id = %id, "event updated");
        let _ = self.change_bus.publish(CatalogChange::updated(&event));
        Ok(event)
    }

    /// Deletes an event, whatever its bookings.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::EventNotFound`] if the id is unknown.
    pub async fn delete_event(&self, id: EventId) -> Result<(), BookingError> {
        self.store.remove(id).await?;

        tracing::info!(event_id = %id, "event deleted");
        let _ = self.change_bus.publish(CatalogChange::EventDeleted {
            event_id: id,
            timestamp: chrono::Utc::now(),
        });
        Ok(())
    }

    /// Books seats on an event.
    ///
    /// A non-positive request is rejected before the store is consulted.
    /// Requests larger than any storable capacity go through to the store
    /// and fail its capacity check, so an unknown id still reports
    /// [`BookingError::EventNotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidArgument`] for `seats <= 0`,
    /// [`BookingError::EventNotFound`] for an unknown id and
    /// [`BookingError::CapacityExceeded`] when the seats do not fit.
    pub async fn book_seats(&self, id: EventId, seats: i64) -> Result<Event, BookingError> {
        if seats <= 0 {
            return Err(BookingError::InvalidArgument(format!(
                "seats must be a positive integer, got {seats}"
            )));
        }
        let requested = u32::try_from(seats).unwrap_or(u32::MAX);

        let event = self
            .store
            .book_seats(id, requested)
            .await
            .inspect_err(|err| {
                tracing::debug!(event_id = %id, seats, error = %err, "booking rejected");
            })?;

        tracing::info!(
            event_id = %id,
            seats = requested,
            available_seats = event.available_seats(),
            "seats booked"
        );
        let _ = self
            .change_bus
            .publish(CatalogChange::seats_booked(&event, requested));
        Ok(event)
    }
}

/// Rejects capacities that cannot be stored.
fn check_capacity(total_capacity: u32) -> Result<(), BookingError> {
    if total_capacity > MAX_CAPACITY {
        return Err(BookingError::InvalidArgument(format!(
            "totalCapacity must be at most {MAX_CAPACITY}, got {total_capacity}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use tokio::sync::broadcast::error::TryRecvError;
    use tokio_test::{assert_err, assert_ok};

    use super::*;
    use crate::domain::event::tests::details;
    use crate::store::InMemoryEventStore;

    fn make_service() -> EventService {
        EventService::new(Arc::new(InMemoryEventStore::new()), ChangeBus::new(64))
    }

    async fn created(service: &EventService, capacity: u32) -> Event {
        let Ok(event) = service.create_event(details("Concert", capacity)).await else {
            panic!("create failed");
        };
        event
    }

    #[tokio::test]
    async fn create_event_emits_change() {
        let service = make_service();
        let mut rx = service.change_bus().subscribe();

        let event = created(&service, 10).await;
        assert_eq!(event.booked_seats, 0);

        let Ok(change) = rx.recv().await else {
            panic!("expected change");
        };
        assert_eq!(change.change_type_str(), "event_created");
        assert_eq!(change.event_id(), event.id);
    }

    #[tokio::test]
    async fn booking_within_capacity_emits_change() {
        let service = make_service();
        let event = created(&service, 5).await;
        let mut rx = service.change_bus().subscribe();

        let booked = assert_ok!(service.book_seats(event.id, 5).await);
        assert_eq!(booked.booked_seats, 5);
        assert_eq!(booked.available_seats(), 0);

        let Ok(change) = rx.recv().await else {
            panic!("expected change");
        };
        assert_eq!(change.change_type_str(), "seats_booked");
    }

    #[tokio::test]
    async fn non_positive_seats_are_rejected_without_side_effects() {
        let service = make_service();
        let event = created(&service, 10).await;
        let mut rx = service.change_bus().subscribe();

        for seats in [0, -3] {
            let result = service.book_seats(event.id, seats).await;
            assert!(matches!(result, Err(BookingError::InvalidArgument(_))));
        }

        let Ok(after) = service.get_event(event.id).await else {
            panic!("event missing");
        };
        assert_eq!(after.booked_seats, 0);
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn non_positive_seats_on_unknown_event_is_invalid_argument() {
        let service = make_service();
        let result = service.book_seats(EventId::new(77), 0).await;
        assert!(matches!(result, Err(BookingError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn full_event_rejects_one_more_seat() {
        let service = make_service();
        let event = created(&service, 5).await;
        assert_ok!(service.book_seats(event.id, 5).await);

        let mut rx = service.change_bus().subscribe();
        let result = service.book_seats(event.id, 1).await;
        assert!(matches!(
            result,
            Err(BookingError::CapacityExceeded {
                requested: 1,
                available: 0
            })
        ));
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn oversized_request_is_capacity_exceeded() {
        let service = make_service();
        let event = created(&service, 5).await;
        let result = service.book_seats(event.id, i64::MAX).await;
        assert!(matches!(result, Err(BookingError::CapacityExceeded { .. })));
    }

    #[tokio::test]
    async fn update_preserves_bookings() {
        let service = make_service();
        let event = created(&service, 50).await;
        assert_ok!(service.book_seats(event.id, 10).await);

        let mut next = details("Renamed", 50);
        next.location = "Open Air Stage".to_string();
        let updated = assert_ok!(service.update_event(event.id, next).await);

        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.location, "Open Air Stage");
        assert_eq!(updated.booked_seats, 10);
    }

    #[tokio::test]
    async fn update_below_bookings_is_accepted() {
        let service = make_service();
        let event = created(&service, 10).await;
        assert_ok!(service.book_seats(event.id, 8).await);

        let updated = assert_ok!(service.update_event(event.id, details("Concert", 4)).await);
        assert_eq!(updated.total_capacity, 4);
        assert_eq!(updated.booked_seats, 8);
        assert_eq!(updated.available_seats(), 0);
    }

    #[tokio::test]
    async fn capacity_above_column_range_is_rejected() {
        let service = make_service();
        let result = service.create_event(details("Huge", u32::MAX)).await;
        assert!(matches!(result, Err(BookingError::InvalidArgument(_))));
        let events = assert_ok!(service.list_events().await);
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn unknown_id_is_not_found_everywhere() {
        let service = make_service();
        let mut rx = service.change_bus().subscribe();
        let id = EventId::new(999);

        assert!(matches!(
            service.get_event(id).await,
            Err(BookingError::EventNotFound(_))
        ));
        assert!(matches!(
            service.update_event(id, details("x", 1)).await,
            Err(BookingError::EventNotFound(_))
        ));
        assert!(matches!(
            service.delete_event(id).await,
            Err(BookingError::EventNotFound(_))
        ));
        assert!(matches!(
            service.book_seats(id, 1).await,
            Err(BookingError::EventNotFound(_))
        ));
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn delete_is_unconditional() {
        let service = make_service();
        let event = created(&service, 10).await;
        assert_ok!(service.book_seats(event.id, 7).await);

        assert_ok!(service.delete_event(event.id).await);
        assert_err!(service.get_event(event.id).await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_bookings_yield_one_winner() {
        let service = make_service();
        let event = created(&service, 10).await;

        let (a, b) = tokio::join!(
            service.book_seats(event.id, 6),
            service.book_seats(event.id, 6)
        );
        assert_eq!(usize::from(a.is_ok()) + usize::from(b.is_ok()), 1);
        let failure = if a.is_err() { a } else { b };
        assert!(matches!(failure, Err(BookingError::CapacityExceeded { .. })));

        let Ok(after) = service.get_event(event.id).await else {
            panic!("event missing");
        };
        assert_eq!(after.booked_seats, 6);
    }
}
