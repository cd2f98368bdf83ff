use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use uuid::Uuid;

use crate::services::analytics;
use crate::utils::error::AppError;
use crate::utils::response::success;
use crate::AppState;

#[derive(Deserialize)]
pub struct OwnerFilter {
    pub owner_id: Option<Uuid>,
}

pub async fn movie_analytics(
    State(state): State<AppState>,
    Path(movie_id): Path<i64>,
    Query(filter): Query<OwnerFilter>,
) -> Result<Response, AppError> {
    let summary = analytics::movie_analytics(&state.pool, movie_id, filter.owner_id).await?;
    Ok(success(summary, "Movie analytics").into_response())
}

pub async fn event_analytics(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Query(filter): Query<OwnerFilter>,
) -> Result<Response, AppError> {
    let summary = analytics::event_analytics(&state.pool, event_id, filter.owner_id).await?;
    Ok(success(summary, "Event analytics").into_response())
}
