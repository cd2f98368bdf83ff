use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::services::schedule::{self, CreateSchedule};
use crate::utils::error::AppError;
use crate::utils::response::{created, success};
use crate::AppState;

#[derive(Deserialize)]
pub struct FromDateQuery {
    pub from_date: Option<NaiveDate>,
}

pub async fn create_schedule(
    State(state): State<AppState>,
    Json(req): Json<CreateSchedule>,
) -> Result<Response, AppError> {
    let result = schedule::create_schedule(&state.pool, req).await?;
    Ok(created(result, "Schedule created").into_response())
}

pub async fn schedules_for_venue(
    State(state): State<AppState>,
    Path(venue_id): Path<Uuid>,
    Query(query): Query<FromDateQuery>,
) -> Result<Response, AppError> {
    let schedules = schedule::schedules_for_venue(&state.pool, venue_id, query.from_date).await?;
    Ok(success(schedules, "Schedules for venue").into_response())
}
