use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::status::ListingStatus;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub venue_id: Option<Uuid>,
    pub owner_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub poster_url: Option<String>,
    pub address: String,
    /// JSON document: { dates: [...], zones: [{name, capacity}], categories: [...] }
    pub event_config: String,
    pub status: ListingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Typed view of the `event_config` document. Zone capacities drive the
/// availability accounting; dates carry the client-assigned `event_date_id`
/// values that bookings reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventConfig {
    #[serde(default)]
    pub dates: Vec<serde_json::Value>,
    #[serde(default)]
    pub zones: Vec<ZoneConfig>,
    #[serde(default)]
    pub categories: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneConfig {
    pub name: String,
    pub capacity: i32,
}
