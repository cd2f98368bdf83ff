use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::status::ListingStatus;

/// A date-range + recurring-showtime template. The schedule expander
/// materializes it into one `Show` row per date/time combination.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MovieSchedule {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub movie_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// JSON array of time labels: ["09:00 AM", "12:00 PM"]
    pub showtimes: String,
    pub silver_price: Decimal,
    pub gold_price: Decimal,
    pub vip_price: Decimal,
    pub status: ListingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
