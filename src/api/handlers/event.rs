//! Event CRUD handlers: create, list, get, update, delete.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{DeleteResponse, EventRequest, EventResponse};
use crate::app_state::AppState;
use crate::domain::{EventDetails, EventId};
use crate::error::{BookingError, ErrorResponse};

/// `GET /events` — List all events.
///
/// # Errors
///
/// Returns [`BookingError::StorageUnavailable`] if the store fails.
#[utoipa::path(
    get,
    path = "/api/events",
    tag = "Events",
    summary = "List events",
    description = "Returns every event ordered by id, with booked and available seat counts.",
    responses(
        (status = 200, description = "All events", body = Vec<EventResponse>),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn list_events(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, BookingError> {
    let events = state.event_service.list_events().await?;
    let data: Vec<EventResponse> = events.into_iter().map(EventResponse::from).collect();
    Ok(Json(data))
}

/// `GET /events/{id}` — Get one event.
///
/// # Errors
///
/// Returns [`BookingError::EventNotFound`] if the event does not exist.
#[utoipa::path(
    get,
    path = "/api/events/{id}",
    tag = "Events",
    summary = "Get event",
    params(
        ("id" = i64, Path, description = "Event id"),
    ),
    responses(
        (status = 200, description = "Event details", body = EventResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, BookingError> {
    let Path(id) = id?;
    let event = state.event_service.get_event(EventId::new(id)).await?;
    Ok(Json(EventResponse::from(event)))
}

/// `POST /events` — Create an event.
///
/// # Errors
///
/// Returns [`BookingError::InvalidArgument`] on a malformed body.
#[utoipa::path(
    post,
    path = "/api/events",
    tag = "Events",
    summary = "Create event",
    description = "Creates an event with no seats booked. A `bookedSeats` field in the body is ignored.",
    request_body = EventRequest,
    responses(
        (status = 201, description = "Event created", body = EventResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
    )
)]
pub async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<EventRequest>, JsonRejection>,
) -> Result<impl IntoResponse, BookingError> {
    let Json(req) = payload?;
    let details = EventDetails::try_from(req)?;
    let event = state.event_service.create_event(details).await?;
    Ok((StatusCode::CREATED, Json(EventResponse::from(event))))
}

/// `PUT /events/{id}` — Replace an event's editable fields.
///
/// # Errors
///
/// Returns [`BookingError::EventNotFound`] if the event does not exist, or
/// [`BookingError::InvalidArgument`] on a malformed body.
#[utoipa::path(
    put,
    path = "/api/events/{id}",
    tag = "Events",
    summary = "Update event",
    description = "Replaces name, description, date, location and totalCapacity. Booked seats are kept as they are.",
    params(
        ("id" = i64, Path, description = "Event id"),
    ),
    request_body = EventRequest,
    responses(
        (status = 200, description = "Event updated", body = EventResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn update_event(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<EventRequest>, JsonRejection>,
) -> Result<impl IntoResponse, BookingError> {
    let Path(id) = id?;
    let Json(req) = payload?;
    let details = EventDetails::try_from(req)?;
    let event = state
        .event_service
        .update_event(EventId::new(id), details)
        .await?;
    Ok(Json(EventResponse::from(event)))
}

/// `DELETE /events/{id}` — Delete an event.
///
/// # Errors
///
/// Returns [`BookingError::EventNotFound`] if the event does not exist.
#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    tag = "Events",
    summary = "Delete event",
    description = "Deletes the event whether or not seats are booked.",
    params(
        ("id" = i64, Path, description = "Event id"),
    ),
    responses(
        (status = 200, description = "Event deleted", body = DeleteResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn delete_event(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, BookingError> {
    let Path(id) = id?;
    state.event_service.delete_event(EventId::new(id)).await?;
    Ok(Json(DeleteResponse {
        message: "Event successfully deleted".to_string(),
    }))
}

/// Event management routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route(
            "/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
}
