//! WebSocket layer: live catalog change feed.
//!
//! The endpoint at `/ws` lets clients subscribe to changes of specific
//! events (or all of them) and pushes every matching [`crate::domain::CatalogChange`].

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
