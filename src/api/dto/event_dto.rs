//! Event DTOs for create, update, get and list operations.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Event, EventDetails, EventId, MAX_CAPACITY};
use crate::error::BookingError;

/// Request body for `POST /events` and `PUT /events/{id}`.
///
/// There is no `bookedSeats` field: a client-supplied value is dropped during
/// deserialization, so creation always starts unbooked and updates never
/// overwrite reservations.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Local date-time, e.g. `2025-06-01T20:00:00`.
    #[schema(value_type = String, example = "2025-06-01T20:00:00")]
    pub date: NaiveDateTime,
    /// Location text.
    pub location: String,
    /// Maximum bookable seats, `0..=2147483647`.
    pub total_capacity: i64,
}

impl TryFrom<EventRequest> for EventDetails {
    type Error = BookingError;

    fn try_from(req: EventRequest) -> Result<Self, Self::Error> {
        let total_capacity = u32::try_from(req.total_capacity)
            .ok()
            .filter(|c| *c <= MAX_CAPACITY)
            .ok_or_else(|| {
                BookingError::InvalidArgument(format!(
                    "totalCapacity must be between 0 and {MAX_CAPACITY}, got {}",
                    req.total_capacity
                ))
            })?;
        Ok(Self {
            name: req.name,
            description: req.description,
            date: req.date,
            location: req.location,
            total_capacity,
        })
    }
}

/// An event as returned by every event endpoint.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    /// Event identifier.
    pub id: EventId,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Local date-time.
    #[schema(value_type = String, example = "2025-06-01T20:00:00")]
    pub date: NaiveDateTime,
    /// Location text.
    pub location: String,
    /// Maximum bookable seats.
    pub total_capacity: u32,
    /// Seats booked so far.
    pub booked_seats: u32,
    /// `totalCapacity - bookedSeats`, never negative.
    pub available_seats: u32,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        let available_seats = event.available_seats();
        Self {
            id: event.id,
            name: event.name,
            description: event.description,
            date: event.date,
            location: event.location,
            total_capacity: event.total_capacity,
            booked_seats: event.booked_seats,
            available_seats,
        }
    }
}

/// Response body for `DELETE /events/{id}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteResponse {
    /// Confirmation text.
    pub message: String,
}
