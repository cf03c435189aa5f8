//! Change notifications emitted after catalog mutations.
//!
//! Every successful create, update, delete and booking publishes one
//! [`CatalogChange`] through the [`super::ChangeBus`]. WebSocket clients
//! subscribe to receive them.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Event, EventId};

/// Notification describing one committed mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "change_type", rename_all = "snake_case")]
pub enum CatalogChange {
    /// A new event was created.
    EventCreated {
        /// Event identifier.
        event_id: EventId,
        /// Event name at creation.
        name: String,
        /// Capacity at creation.
        total_capacity: u32,
        /// When the change was committed.
        timestamp: DateTime<Utc>,
    },

    /// An event's editable fields were replaced.
    EventUpdated {
        /// Event identifier.
        event_id: EventId,
        /// New capacity.
        total_capacity: u32,
        /// Booked seats, unchanged by the update.
        booked_seats: u32,
        /// When the change was committed.
        timestamp: DateTime<Utc>,
    },

    /// An event was deleted.
    EventDeleted {
        /// Event identifier.
        event_id: EventId,
        /// When the change was committed.
        timestamp: DateTime<Utc>,
    },

    /// Seats were booked on an event.
    SeatsBooked {
        /// Event identifier.
        event_id: EventId,
        /// Seats granted by this booking.
        seats: u32,
        /// Total booked after the booking.
        booked_seats: u32,
        /// Remaining seats after the booking.
        available_seats: u32,
        /// When the change was committed.
        timestamp: DateTime<Utc>,
    },
}

impl CatalogChange {
    /// Builds an [`CatalogChange::EventCreated`] from the stored event.
    #[must_use]
    pub fn created(event: &Event) -> Self {
        Self::EventCreated {
            event_id: event.id,
            name: event.name.clone(),
            total_capacity: event.total_capacity,
            timestamp: Utc::now(),
        }
    }

    /// Builds an [`CatalogChange::EventUpdated`] from the stored event.
    #[must_use]
    pub fn updated(event: &Event) -> Self {
        Self::EventUpdated {
            event_id: event.id,
            total_capacity: event.total_capacity,
            booked_seats: event.booked_seats,
            timestamp: Utc::now(),
        }
    }

    /// Builds an [`CatalogChange::SeatsBooked`] from the event after booking.
    #[must_use]
    pub fn seats_booked(event: &Event, seats: u32) -> Self {
        Self::SeatsBooked {
            event_id: event.id,
            seats,
            booked_seats: event.booked_seats,
            available_seats: event.available_seats(),
            timestamp: Utc::now(),
        }
    }

    /// Returns the event ID the change refers to.
    #[must_use]
    pub fn event_id(&self) -> EventId {
        match self {
            Self::EventCreated { event_id, .. }
            | Self::EventUpdated { event_id, .. }
            | Self::EventDeleted { event_id, .. }
            | Self::SeatsBooked { event_id, .. } => *event_id,
        }
    }

    /// Returns the change type as a static string slice.
    #[must_use]
    pub const fn change_type_str(&self) -> &'static str {
        match self {
            Self::EventCreated { .. } => "event_created",
            Self::EventUpdated { .. } => "event_updated",
            Self::EventDeleted { .. } => "event_deleted",
            Self::SeatsBooked { .. } => "seats_booked",
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::event::tests::details;

    #[test]
    fn seats_booked_reports_remaining() {
        let mut event = Event::new(EventId::new(4), details("Gala", 10));
        assert!(event.reserve(3).is_ok());

        let change = CatalogChange::seats_booked(&event, 3);
        let CatalogChange::SeatsBooked {
            seats,
            booked_seats,
            available_seats,
            ..
        } = change
        else {
            panic!("expected seats_booked");
        };
        assert_eq!(seats, 3);
        assert_eq!(booked_seats, 3);
        assert_eq!(available_seats, 7);
    }

    #[test]
    fn serializes_with_tag() {
        let event = Event::new(EventId::new(9), details("Gala", 10));
        let json = serde_json::to_string(&CatalogChange::created(&event));
        let json_str = json.unwrap_or_default();
        assert!(json_str.contains("\"change_type\":\"event_created\""));
        assert!(json_str.contains("\"event_id\":9"));
    }

    #[test]
    fn event_id_accessor() {
        let change = CatalogChange::EventDeleted {
            event_id: EventId::new(12),
            timestamp: Utc::now(),
        };
        assert_eq!(change.event_id(), EventId::new(12));
        assert_eq!(change.change_type_str(), "event_deleted");
    }
}
