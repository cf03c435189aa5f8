//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use super::dto::{BookingRequest, BookingResponse, DeleteResponse, EventRequest, EventResponse};
use super::handlers::{booking, event, system};
use crate::error::{ErrorBody, ErrorResponse};

/// Generated OpenAPI 3 description of every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "seat-gateway",
        description = "Event records with atomic seat booking."
    ),
    paths(
        event::list_events,
        event::get_event,
        event::create_event,
        event::update_event,
        event::delete_event,
        booking::book_seats,
        system::health_handler,
    ),
    components(schemas(
        EventRequest,
        EventResponse,
        DeleteResponse,
        BookingRequest,
        BookingResponse,
        ErrorResponse,
        ErrorBody,
        system::HealthResponse,
    )),
    tags(
        (name = "Events", description = "Event CRUD"),
        (name = "Bookings", description = "Seat reservations"),
        (name = "System", description = "Operational endpoints"),
    )
)]
pub struct ApiDoc;
