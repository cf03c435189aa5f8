//! Type-safe event identifier.
//!
//! [`EventId`] is a newtype wrapper around the `i64` identity assigned by the
//! store, so that event identifiers cannot be confused with seat counts or
//! other integers flowing through the same call.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Unique identifier for an event record.
///
/// Allocated by the [`crate::store::EventStore`] on insert and immutable
/// thereafter. Identifiers increase monotonically, so ordering by id is
/// ordering by creation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct EventId(i64);

impl EventId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EventId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl From<EventId> for i64 {
    fn from(id: EventId) -> Self {
        id.0
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn display_is_plain_integer() {
        assert_eq!(EventId::new(42).to_string(), "42");
    }

    #[test]
    fn serializes_transparently() {
        let Ok(json) = serde_json::to_string(&EventId::new(7)) else {
            panic!("serialization failed");
        };
        assert_eq!(json, "7");
    }

    #[test]
    fn orders_by_raw_value() {
        let mut ids = vec![EventId::new(3), EventId::new(1), EventId::new(2)];
        ids.sort();
        assert_eq!(ids, vec![EventId::new(1), EventId::new(2), EventId::new(3)]);
    }

    #[test]
    fn raw_round_trip() {
        let id = EventId::from(99);
        assert_eq!(i64::from(id), 99);
        assert_eq!(id.get(), 99);
    }
}
