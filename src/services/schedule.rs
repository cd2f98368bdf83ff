use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::domain::schedule::expand;
use crate::models::{ListingStatus, MovieSchedule, NewShow, Venue};
use crate::utils::error::AppError;

#[derive(Debug, Deserialize)]
pub struct CreateSchedule {
    pub venue_id: Uuid,
    pub movie_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Time labels in the order shows should appear: ["09:00 AM", "12:00 PM"]
    pub showtimes: Vec<String>,
    pub silver_price: Option<Decimal>,
    pub gold_price: Option<Decimal>,
    pub vip_price: Option<Decimal>,
}

#[derive(Debug, Serialize)]
pub struct ScheduleCreated {
    pub schedule_id: Uuid,
    pub generated_show_count: usize,
}

/// Persist a schedule template and immediately materialize its shows.
pub async fn create_schedule(
    pool: &PgPool,
    req: CreateSchedule,
) -> Result<ScheduleCreated, AppError> {
    find_venue(pool, req.venue_id).await?;

    let showtimes_json = serde_json::to_string(&req.showtimes)
        .map_err(|e| AppError::InternalServerError(format!("failed to serialize showtimes: {e}")))?;

    let schedule = sqlx::query_as::<_, MovieSchedule>(
        r#"
        INSERT INTO movie_schedules
            (venue_id, movie_id, start_date, end_date, showtimes,
             silver_price, gold_price, vip_price, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(req.venue_id)
    .bind(req.movie_id)
    .bind(req.start_date)
    .bind(req.end_date)
    .bind(&showtimes_json)
    .bind(req.silver_price.unwrap_or(Decimal::ZERO))
    .bind(req.gold_price.unwrap_or(Decimal::ZERO))
    .bind(req.vip_price.unwrap_or(Decimal::ZERO))
    .bind(ListingStatus::Active)
    .fetch_one(pool)
    .await?;

    let drafts = expand(&schedule);
    insert_shows(pool, &drafts).await?;

    info!(
        schedule_id = %schedule.id,
        venue_id = %schedule.venue_id,
        shows = drafts.len(),
        "schedule created and expanded"
    );
    Ok(ScheduleCreated {
        schedule_id: schedule.id,
        generated_show_count: drafts.len(),
    })
}

/// Active templates for a venue that are still running at `from_date`
/// (today when unspecified).
pub async fn schedules_for_venue(
    pool: &PgPool,
    venue_id: Uuid,
    from_date: Option<NaiveDate>,
) -> Result<Vec<MovieSchedule>, AppError> {
    find_venue(pool, venue_id).await?;
    let from = from_date.unwrap_or_else(|| Utc::now().date_naive());
    let schedules = sqlx::query_as::<_, MovieSchedule>(
        r#"
        SELECT * FROM movie_schedules
        WHERE venue_id = $1 AND end_date >= $2 AND status = $3
        ORDER BY start_date
        "#,
    )
    .bind(venue_id)
    .bind(from)
    .bind(ListingStatus::Active)
    .fetch_all(pool)
    .await?;
    Ok(schedules)
}

async fn insert_shows(pool: &PgPool, drafts: &[NewShow]) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    for draft in drafts {
        sqlx::query(
            r#"
            INSERT INTO shows
                (venue_id, schedule_id, movie_id, show_date, show_time,
                 silver_price, gold_price, vip_price, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(draft.venue_id)
        .bind(draft.schedule_id)
        .bind(draft.movie_id)
        .bind(draft.show_date)
        .bind(&draft.show_time)
        .bind(draft.silver_price)
        .bind(draft.gold_price)
        .bind(draft.vip_price)
        .bind(ListingStatus::Active)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    Ok(())
}

async fn find_venue(pool: &PgPool, venue_id: Uuid) -> Result<Venue, AppError> {
    sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE id = $1")
        .bind(venue_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Venue not found with id: {venue_id}")))
}
