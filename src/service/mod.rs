//! Service layer: business logic orchestration.
//!
//! [`EventService`] validates requests, delegates storage and the atomic
//! booking primitive to an [`crate::store::EventStore`], and emits changes
//! through the [`crate::domain::ChangeBus`].

pub mod event_service;

pub use event_service::EventService;
