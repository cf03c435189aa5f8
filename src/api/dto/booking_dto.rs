//! Seat booking DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::EventId;
use crate::error::BookingError;

/// Request body for `POST /events/{id}/book`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct BookingRequest {
    /// Number of seats to book. Must be a positive integer.
    #[serde(default)]
    pub seats: Option<i64>,
}

impl BookingRequest {
    /// Returns the requested seat count.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidArgument`] if `seats` is missing.
    pub fn seats(&self) -> Result<i64, BookingError> {
        self.seats
            .ok_or_else(|| BookingError::InvalidArgument("seats is required".to_string()))
    }
}

/// Response body for a successful booking.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    /// Confirmation text.
    pub message: String,
    /// Event the seats were booked on.
    pub event_id: EventId,
    /// Seats granted by this booking.
    pub seats_booked: u32,
    /// Seats left after this booking.
    pub available_seats: u32,
}
