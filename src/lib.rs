//! # seat-gateway
//!
//! REST API and WebSocket change feed for event records with atomic seat
//! booking.
//!
//! Clients create, read, update and delete events and book seats against an
//! event's capacity. A booking succeeds only if
//! `booked_seats + requested <= total_capacity`, and the check and the
//! increment run as one atomic unit scoped to the single event.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── EventService (service/)
//!     ├── ChangeBus (domain/)
//!     │
//!     └── EventStore (store/)
//!           ├── InMemoryEventStore   per-event RwLock
//!           └── PostgresEventStore   SELECT ... FOR UPDATE
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod store;
pub mod ws;
