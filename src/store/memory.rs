//! In-memory event storage with per-event fine-grained locking.
//!
//! [`InMemoryEventStore`] keeps every record in a `BTreeMap` where each
//! entry is individually protected by a [`tokio::sync::RwLock`]. Bookings on
//! the same event are serialized; bookings on different events proceed
//! concurrently.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::EventStore;
use crate::domain::{Event, EventDetails, EventId};
use crate::error::BookingError;

/// Process-local store for event records.
///
/// Uses a `RwLock<BTreeMap<...>>` for the outer map and per-entry
/// `Arc<RwLock<Event>>` for fine-grained per-event locking.
///
/// # Concurrency
///
/// - The outer lock is held only to look up, insert or remove an entry.
/// - Reads of the same event may run concurrently.
/// - Writes to the same event are serialized; writes to different events
///   are concurrent.
#[derive(Debug)]
pub struct InMemoryEventStore {
    events: RwLock<BTreeMap<EventId, Arc<RwLock<Event>>>>,
    next_id: AtomicI64,
}

impl InMemoryEventStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Returns the lock guarding one event.
    async fn entry(&self, id: EventId) -> Result<Arc<RwLock<Event>>, BookingError> {
        let map = self.events.read().await;
        map.get(&id).cloned().ok_or(BookingError::EventNotFound(id))
    }

    /// Returns the number of stored events.
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    /// Returns `true` if the store holds no events.
    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

impl Default for InMemoryEventStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn list(&self) -> Result<Vec<Event>, BookingError> {
        let map = self.events.read().await;
        let mut events = Vec::with_capacity(map.len());
        for entry_lock in map.values() {
            events.push(entry_lock.read().await.clone());
        }
        Ok(events)
    }

    async fn get(&self, id: EventId) -> Result<Event, BookingError> {
        let entry_lock = self.entry(id).await?;
        let event = entry_lock.read().await.clone();
        Ok(event)
    }

    async fn insert(&self, details: EventDetails) -> Result<Event, BookingError> {
        let mut map = self.events.write().await;
        // Ids are never reused, even after the highest one is deleted.
        let id = EventId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let event = Event::new(id, details);
        map.insert(id, Arc::new(RwLock::new(event.clone())));
        Ok(event)
    }

    async fn update(&self, id: EventId, details: EventDetails) -> Result<Event, BookingError> {
        let entry_lock = self.entry(id).await?;
        let mut event = entry_lock.write().await;
        event.apply_details(details);
        Ok(event.clone())
    }

    async fn remove(&self, id: EventId) -> Result<(), BookingError> {
        let mut map = self.events.write().await;
        map.remove(&id).ok_or(BookingError::EventNotFound(id))?;
        Ok(())
    }

    async fn book_seats(&self, id: EventId, seats: u32) -> Result<Event, BookingError> {
        let entry_lock = self.entry(id).await?;
        let mut event = entry_lock.write().await;
        event.reserve(seats)?;
        Ok(event.clone())
    }
}
