use std::collections::{BTreeMap, BTreeSet};

use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::availability::{self, ZoneAvailability};
use crate::models::{Booking, BookingStatus, Event, EventConfig};
use crate::utils::error::AppError;

/// Seats already held by confirmed bookings for a show.
pub async fn blocked_seats_for_show(
    pool: &PgPool,
    show_id: Uuid,
) -> Result<BTreeSet<String>, AppError> {
    let bookings =
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE show_id = $1 AND status = $2")
            .bind(show_id)
            .bind(BookingStatus::Confirmed)
            .fetch_all(pool)
            .await?;
    Ok(availability::blocked_seats(&bookings))
}

/// Remaining capacity per zone for one event date, derived from the
/// confirmed booking log against the capacities declared in the event's
/// config document.
pub async fn zone_availability_for_event(
    pool: &PgPool,
    event_id: Uuid,
    event_date_id: &str,
) -> Result<BTreeMap<String, ZoneAvailability>, AppError> {
    let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
        .bind(event_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Event not found with id: {event_id}")))?;

    // Without parseable zone capacities there is nothing to report against.
    let config: EventConfig = serde_json::from_str(&event.event_config)
        .map_err(|e| AppError::ValidationError(format!("event config is not valid JSON: {e}")))?;

    let bookings = sqlx::query_as::<_, Booking>(
        "SELECT * FROM bookings WHERE event_id = $1 AND event_date_id = $2 AND status = $3",
    )
    .bind(event_id)
    .bind(event_date_id)
    .bind(BookingStatus::Confirmed)
    .fetch_all(pool)
    .await?;

    Ok(availability::zone_availability(&config.zones, &bookings))
}
