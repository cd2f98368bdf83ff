use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::services::availability;
use crate::services::booking::{self, CreateEventBooking, CreateMovieBooking};
use crate::utils::error::AppError;
use crate::utils::response::{created, success};
use crate::AppState;

/// The acting user, injected by the authenticating gateway in front of
/// this service.
#[derive(Deserialize)]
pub struct ActingUser {
    pub user_id: Uuid,
}

#[derive(Deserialize)]
pub struct ZoneAvailabilityQuery {
    pub event_date_id: String,
}

pub async fn create_movie_booking(
    State(state): State<AppState>,
    Json(req): Json<CreateMovieBooking>,
) -> Result<Response, AppError> {
    let saved = booking::create_movie_booking(&state.pool, req).await?;
    Ok(created(saved, "Movie booking confirmed").into_response())
}

pub async fn create_event_booking(
    State(state): State<AppState>,
    Json(req): Json<CreateEventBooking>,
) -> Result<Response, AppError> {
    let saved = booking::create_event_booking(&state.pool, req).await?;
    Ok(created(saved, "Event booking confirmed").into_response())
}

pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(acting): Query<ActingUser>,
) -> Result<Response, AppError> {
    let found = booking::get_booking(&state.pool, id, acting.user_id).await?;
    Ok(success(found, "Booking found").into_response())
}

pub async fn cancel_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(acting): Json<ActingUser>,
) -> Result<Response, AppError> {
    let cancelled = booking::cancel_booking(&state.pool, id, acting.user_id).await?;
    Ok(success(cancelled, "Booking cancelled").into_response())
}

/// Public lookup by booking code for QR scans; the payload is redacted.
pub async fn get_booking_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Response, AppError> {
    let public = booking::get_booking_by_code(&state.pool, &code).await?;
    Ok(success(public, "Booking found").into_response())
}

pub async fn bookings_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let bookings = booking::bookings_for_user(&state.pool, user_id).await?;
    Ok(success(bookings, "Bookings for user").into_response())
}

pub async fn blocked_seats(
    State(state): State<AppState>,
    Path(show_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let seats = availability::blocked_seats_for_show(&state.pool, show_id).await?;
    Ok(success(seats, "Blocked seats for show").into_response())
}

pub async fn zone_availability(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Query(query): Query<ZoneAvailabilityQuery>,
) -> Result<Response, AppError> {
    let zones =
        availability::zone_availability_for_event(&state.pool, event_id, &query.event_date_id)
            .await?;
    Ok(success(zones, "Zone availability for event").into_response())
}
