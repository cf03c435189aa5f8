//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::ChangeBus;
use crate::service::EventService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Event service for all business logic.
    pub event_service: Arc<EventService>,
    /// Change bus for WebSocket subscriptions.
    pub change_bus: ChangeBus,
}

impl AppState {
    /// Builds the state around a service, sharing its change bus.
    #[must_use]
    pub fn new(event_service: EventService) -> Self {
        let change_bus = event_service.change_bus().clone();
        Self {
            event_service: Arc::new(event_service),
            change_bus,
        }
    }
}
