//! Seat booking handler.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{BookingRequest, BookingResponse};
use crate::app_state::AppState;
use crate::domain::EventId;
use crate::error::{BookingError, ErrorResponse};

/// `POST /events/{id}/book` — Book seats on an event.
///
/// # Errors
///
/// Returns [`BookingError::InvalidArgument`] when `seats` is missing or not
/// positive, [`BookingError::EventNotFound`] for an unknown event and
/// [`BookingError::CapacityExceeded`] when the seats do not fit.
#[utoipa::path(
    post,
    path = "/api/events/{id}/book",
    tag = "Bookings",
    summary = "Book seats",
    description = "Atomically checks remaining capacity and books the requested number of seats.",
    params(
        ("id" = i64, Path, description = "Event id"),
    ),
    request_body = BookingRequest,
    responses(
        (status = 200, description = "Seats booked", body = BookingResponse),
        (status = 400, description = "Missing or non-positive seat count", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 422, description = "Not enough seats available", body = ErrorResponse),
    )
)]
pub async fn book_seats(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<impl IntoResponse, BookingError> {
    let Path(id) = id?;
    let Json(req) = payload?;
    let seats = req.seats()?;

    let event = state
        .event_service
        .book_seats(EventId::new(id), seats)
        .await?;

    // book_seats only succeeds for 1..=u32::MAX.
    let seats_booked = u32::try_from(seats).unwrap_or(u32::MAX);
    Ok(Json(BookingResponse {
        message: format!("Successfully booked {seats_booked} seats"),
        event_id: event.id,
        seats_booked,
        available_seats: event.available_seats(),
    }))
}

/// Booking routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/events/{id}/book", post(book_seats))
}
