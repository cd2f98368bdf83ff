use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::analytics::{summarize, AnalyticsRow, AnalyticsSummary};
use crate::models::{BookingKind, BookingStatus};
use crate::utils::error::AppError;

/// Revenue/seat/venue summary over confirmed movie bookings for a movie,
/// optionally restricted to shows at venues belonging to one owner.
pub async fn movie_analytics(
    pool: &PgPool,
    movie_id: i64,
    owner_id: Option<Uuid>,
) -> Result<AnalyticsSummary, AppError> {
    let rows = match owner_id {
        Some(owner) => {
            sqlx::query_as::<_, AnalyticsRow>(
                r#"
                SELECT b.total_amount, b.details, v.name AS venue_name
                FROM bookings b
                JOIN shows s ON s.id = b.show_id
                JOIN venues v ON v.id = s.venue_id
                WHERE s.movie_id = $1 AND v.owner_id = $2 AND b.status = $3
                "#,
            )
            .bind(movie_id)
            .bind(owner)
            .bind(BookingStatus::Confirmed)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, AnalyticsRow>(
                r#"
                SELECT b.total_amount, b.details, v.name AS venue_name
                FROM bookings b
                JOIN shows s ON s.id = b.show_id
                JOIN venues v ON v.id = s.venue_id
                WHERE s.movie_id = $1 AND b.status = $2
                "#,
            )
            .bind(movie_id)
            .bind(BookingStatus::Confirmed)
            .fetch_all(pool)
            .await?
        }
    };
    Ok(summarize(&rows, BookingKind::Movie))
}

/// Revenue/seat/venue summary over confirmed bookings for an event. The
/// grouping venue name resolves in order: event venue name, event address,
/// "Unknown Venue" (the last step happens inside the fold).
pub async fn event_analytics(
    pool: &PgPool,
    event_id: Uuid,
    owner_id: Option<Uuid>,
) -> Result<AnalyticsSummary, AppError> {
    let rows = match owner_id {
        Some(owner) => {
            sqlx::query_as::<_, AnalyticsRow>(
                r#"
                SELECT b.total_amount, b.details, COALESCE(v.name, e.address) AS venue_name
                FROM bookings b
                JOIN events e ON e.id = b.event_id
                LEFT JOIN venues v ON v.id = e.venue_id
                WHERE b.event_id = $1 AND e.owner_id = $2 AND b.status = $3
                "#,
            )
            .bind(event_id)
            .bind(owner)
            .bind(BookingStatus::Confirmed)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, AnalyticsRow>(
                r#"
                SELECT b.total_amount, b.details, COALESCE(v.name, e.address) AS venue_name
                FROM bookings b
                JOIN events e ON e.id = b.event_id
                LEFT JOIN venues v ON v.id = e.venue_id
                WHERE b.event_id = $1 AND b.status = $2
                "#,
            )
            .bind(event_id)
            .bind(BookingStatus::Confirmed)
            .fetch_all(pool)
            .await?
        }
    };
    Ok(summarize(&rows, BookingKind::Event))
}
