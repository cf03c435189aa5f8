//! Storage layer: the [`EventStore`] trait and its implementations.
//!
//! - [`InMemoryEventStore`]: process-local map with a lock per event.
//! - [`PostgresEventStore`]: `sqlx::PgPool` backed, row locks inside a
//!   transaction for bookings.

pub mod memory;
pub mod models;
pub mod postgres;

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::{Event, EventDetails, EventId};
use crate::error::BookingError;

pub use memory::InMemoryEventStore;
pub use postgres::PostgresEventStore;

/// Owner of the canonical event records.
///
/// Every method returns owned copies. `book_seats` is the only path that
/// changes `booked_seats`, and it must run the check and the write as one
/// atomic unit scoped to the single event.
#[async_trait]
pub trait EventStore: Send + Sync + Debug {
    /// Returns every stored event ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::StorageUnavailable`] on backend failure.
    async fn list(&self) -> Result<Vec<Event>, BookingError>;

    /// Returns one event.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::EventNotFound`] if the id is unknown.
    async fn get(&self, id: EventId) -> Result<Event, BookingError>;

    /// Stores a new unbooked event under a freshly allocated id.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::StorageUnavailable`] on backend failure.
    async fn insert(&self, details: EventDetails) -> Result<Event, BookingError>;

    /// Replaces the editable fields of an event, keeping its bookings.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::EventNotFound`] if the id is unknown.
    async fn update(&self, id: EventId, details: EventDetails) -> Result<Event, BookingError>;

    /// Deletes an event regardless of its bookings.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::EventNotFound`] if the id is unknown.
    async fn remove(&self, id: EventId) -> Result<(), BookingError>;

    /// Atomically checks availability and books `seats` seats.
    ///
    /// Returns the event as it stands after the booking.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::EventNotFound`] if the id is unknown and
    /// [`BookingError::CapacityExceeded`] if the seats do not fit; in both
    /// cases nothing is written.
    async fn book_seats(&self, id: EventId, seats: u32) -> Result<Event, BookingError>;
}
