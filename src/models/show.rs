use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::status::ListingStatus;

/// One concrete screening instance (venue + movie + date + time).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Show {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub schedule_id: Uuid,
    pub movie_id: i64,
    pub show_date: NaiveDate,
    pub show_time: String,
    pub silver_price: Decimal,
    pub gold_price: Decimal,
    pub vip_price: Decimal,
    /// JSON document: { takenSeats: [...], vipRows: [...], totalSeats: 150 }
    pub seat_state: Option<String>,
    pub status: ListingStatus,
    pub created_at: DateTime<Utc>,
}

/// Draft produced by the schedule expander before bulk insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShow {
    pub venue_id: Uuid,
    pub schedule_id: Uuid,
    pub movie_id: i64,
    pub show_date: NaiveDate,
    pub show_time: String,
    pub silver_price: Decimal,
    pub gold_price: Decimal,
    pub vip_price: Decimal,
}
