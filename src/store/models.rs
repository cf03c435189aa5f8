//! Database row model for the `events` table.

use chrono::NaiveDateTime;

use crate::domain::{Event, EventId};
use crate::error::BookingError;

/// A row of the `events` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventRow {
    /// `BIGSERIAL` primary key.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Event date-time (`TIMESTAMP`, no zone).
    pub date: NaiveDateTime,
    /// Location text.
    pub location: String,
    /// Maximum bookable seats.
    pub total_capacity: i32,
    /// Seats booked so far.
    pub booked_seats: i32,
}

impl TryFrom<EventRow> for Event {
    type Error = BookingError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let total_capacity = u32::try_from(row.total_capacity).map_err(|_| {
            BookingError::Internal(format!(
                "event {} has negative capacity {}",
                row.id, row.total_capacity
            ))
        })?;
        let booked_seats = u32::try_from(row.booked_seats).map_err(|_| {
            BookingError::Internal(format!(
                "event {} has negative booked seats {}",
                row.id, row.booked_seats
            ))
        })?;
        Ok(Self {
            id: EventId::new(row.id),
            name: row.name,
            description: row.description,
            date: row.date,
            location: row.location,
            total_capacity,
            booked_seats,
        })
    }
}

/// Converts a seat count to the column type.
///
/// # Errors
///
/// Returns [`BookingError::InvalidArgument`] if the value exceeds `i32::MAX`.
pub fn to_column(value: u32, field: &str) -> Result<i32, BookingError> {
    i32::try_from(value)
        .map_err(|_| BookingError::InvalidArgument(format!("{field} out of range: {value}")))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn row(total_capacity: i32, booked_seats: i32) -> EventRow {
        let Some(date) = NaiveDate::from_ymd_opt(2025, 1, 1).and_then(|d| d.and_hms_opt(9, 0, 0))
        else {
            panic!("valid date");
        };
        EventRow {
            id: 3,
            name: "Expo".to_string(),
            description: "Trade fair".to_string(),
            date,
            location: "Hall B".to_string(),
            total_capacity,
            booked_seats,
        }
    }

    #[test]
    fn row_converts_to_event() {
        let Ok(event) = Event::try_from(row(100, 40)) else {
            panic!("conversion failed");
        };
        assert_eq!(event.id, EventId::new(3));
        assert_eq!(event.available_seats(), 60);
    }

    #[test]
    fn negative_counts_are_rejected() {
        assert!(Event::try_from(row(-1, 0)).is_err());
        assert!(Event::try_from(row(10, -2)).is_err());
    }

    #[test]
    fn to_column_bounds() {
        assert_eq!(to_column(7, "seats").ok(), Some(7));
        assert!(to_column(u32::MAX, "seats").is_err());
    }
}
