//! Domain layer: event record, identifiers, and change notifications.
//!
//! The booking rule lives on [`Event::reserve`]; stores call it while holding
//! exclusive access to a single record.

pub mod catalog_change;
pub mod change_bus;
pub mod event;
pub mod event_id;

pub use catalog_change::CatalogChange;
pub use change_bus::ChangeBus;
pub use event::{Event, EventDetails, MAX_CAPACITY};
pub use event_id::EventId;
