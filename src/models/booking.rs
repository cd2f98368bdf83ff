use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::status::{BookingKind, BookingStatus, PaymentStatus};

/// A confirmed or cancelled reservation. Exactly one of `show_id` /
/// `event_id` is set, matching `kind`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: Uuid,
    /// Public booking reference shown to users (non-sequential).
    /// Example: BK8F3KZ1P9Q2XA
    pub booking_code: String,
    pub user_id: Uuid,
    pub kind: BookingKind,
    pub show_id: Option<Uuid>,
    pub event_id: Option<Uuid>,
    /// For events: which date from eventConfig.dates.
    pub event_date_id: Option<String>,
    /// JSON document: {"seats": [...]} for movies, {"selectedZones": {...}} for events.
    pub details: String,
    pub total_amount: Decimal,
    pub payment_method: String,
    pub payment_status: PaymentStatus,
    pub status: BookingStatus,
    pub booked_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Details payload of a movie booking: the individual seats held.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatSelection {
    pub seats: Vec<String>,
}

/// Details payload of an event booking: passes per zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneSelection {
    pub selected_zones: BTreeMap<String, ZoneCounts>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ZoneCounts {
    #[serde(default)]
    pub adult: i32,
    #[serde(default)]
    pub child: i32,
}

impl ZoneCounts {
    pub fn total(&self) -> i32 {
        self.adult + self.child
    }
}
