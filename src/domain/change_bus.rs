//! Broadcast channel for catalog changes.
//!
//! [`ChangeBus`] wraps a [`tokio::sync::broadcast`] channel. The service
//! publishes a [`CatalogChange`] after every committed mutation, and each
//! WebSocket connection holds its own receiver.

use tokio::sync::broadcast;

use super::CatalogChange;

/// Broadcast bus for [`CatalogChange`]s.
///
/// When the ring buffer is full the oldest changes are dropped for lagging
/// receivers.
#[derive(Debug, Clone)]
pub struct ChangeBus {
    sender: broadcast::Sender<CatalogChange>,
}

impl ChangeBus {
    /// Creates a new `ChangeBus` with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes a change to all subscribers.
    ///
    /// Returns the number of receivers that got it. With no receivers the
    /// change is dropped.
    pub fn publish(&self, change: CatalogChange) -> usize {
        self.sender.send(change).unwrap_or(0)
    }

    /// Creates a receiver for all future changes.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CatalogChange> {
        self.sender.subscribe()
    }

    /// Returns the current number of active receivers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
