//! Data Transfer Objects for REST request/response serialization.
//!
//! Bodies use camelCase field names, the shape existing clients of the event
//! service already send and read.

pub mod booking_dto;
pub mod event_dto;

pub use booking_dto::*;
pub use event_dto::*;
