//! The event record and the seat reservation rule.

use chrono::NaiveDateTime;

use super::EventId;
use crate::error::BookingError;

/// Largest capacity (and seat count) the service accepts.
///
/// Capacities are stored in a signed 32-bit column.
pub const MAX_CAPACITY: u32 = i32::MAX as u32;

/// Caller-editable fields of an event.
///
/// Used both for creation and for wholesale replacement on update. It has no
/// booked-seat field, so neither path can set reservations directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetails {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// When the event takes place.
    pub date: NaiveDateTime,
    /// Where the event takes place.
    pub location: String,
    /// Maximum number of seats that can ever be booked.
    pub total_capacity: u32,
}

/// A stored event with its reservation count.
///
/// The store owns the canonical copy; everything handed to callers is a
/// clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Store-assigned identifier.
    pub id: EventId,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// When the event takes place.
    pub date: NaiveDateTime,
    /// Where the event takes place.
    pub location: String,
    /// Maximum number of seats that can ever be booked.
    pub total_capacity: u32,
    /// Seats reserved so far. Only [`Event::reserve`] increases it.
    pub booked_seats: u32,
}

impl Event {
    /// Creates an unbooked event from its details.
    #[must_use]
    pub fn new(id: EventId, details: EventDetails) -> Self {
        Self {
            id,
            name: details.name,
            description: details.description,
            date: details.date,
            location: details.location,
            total_capacity: details.total_capacity,
            booked_seats: 0,
        }
    }

    /// Seats still available.
    ///
    /// Saturates at zero when an update lowered the capacity below the
    /// booked count.
    #[must_use]
    pub const fn available_seats(&self) -> u32 {
        self.total_capacity.saturating_sub(self.booked_seats)
    }

    /// Replaces every editable field, leaving `booked_seats` untouched.
    pub fn apply_details(&mut self, details: EventDetails) {
        self.name = details.name;
        self.description = details.description;
        self.date = details.date;
        self.location = details.location;
        self.total_capacity = details.total_capacity;
    }

    /// Books `seats` seats if they fit in the remaining capacity.
    ///
    /// On failure the event is left unchanged. Callers must hold exclusive
    /// access to the record for the check and the increment to be atomic.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidArgument`] for a zero request and
    /// [`BookingError::CapacityExceeded`] when `seats` exceeds
    /// [`Event::available_seats`].
    pub fn reserve(&mut self, seats: u32) -> Result<(), BookingError> {
        if seats == 0 {
            return Err(BookingError::InvalidArgument(
                "seats must be a positive integer".to_string(),
            ));
        }
        let available = self.available_seats();
        if seats > available {
            return Err(BookingError::CapacityExceeded {
                requested: seats,
                available,
            });
        }
        // seats <= total - booked, so the sum stays within total_capacity.
        self.booked_seats += seats;
        Ok(())
    }
}
