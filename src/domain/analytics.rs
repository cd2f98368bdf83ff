use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use tracing::warn;

use crate::models::{BookingKind, SeatSelection, ZoneSelection};

/// One confirmed booking as the aggregator sees it: its amount, its raw
/// details document, and the venue name already resolved by the query
/// (show's venue for movie bookings; event venue falling back to the event
/// address for event bookings, NULL when neither exists).
#[derive(Debug, Clone, FromRow)]
pub struct AnalyticsRow {
    pub total_amount: Option<Decimal>,
    pub details: String,
    pub venue_name: Option<String>,
}

const UNKNOWN_VENUE: &str = "Unknown Venue";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_revenue: Decimal,
    pub total_bookings: u64,
    pub total_seats: i64,
    pub revenue_by_venue: BTreeMap<String, VenueStats>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct VenueStats {
    pub revenue: Decimal,
    pub bookings: u64,
    pub seats: i64,
}

/// Fold a set of confirmed bookings into revenue/seat/venue totals.
/// A missing amount counts as zero; a details payload that does not parse
/// counts as zero seats but the booking still counts toward totals.
pub fn summarize(rows: &[AnalyticsRow], kind: BookingKind) -> AnalyticsSummary {
    let mut total_revenue = Decimal::ZERO;
    let mut total_seats: i64 = 0;
    let mut revenue_by_venue: BTreeMap<String, VenueStats> = BTreeMap::new();

    for row in rows {
        let amount = row.total_amount.unwrap_or(Decimal::ZERO);
        total_revenue += amount;

        let seats = seats_in_booking(&row.details, kind);
        total_seats += seats;

        let venue = row
            .venue_name
            .clone()
            .unwrap_or_else(|| UNKNOWN_VENUE.to_string());
        let stats = revenue_by_venue.entry(venue).or_default();
        stats.revenue += amount;
        stats.bookings += 1;
        stats.seats += seats;
    }

    AnalyticsSummary {
        total_revenue,
        total_bookings: rows.len() as u64,
        total_seats,
        revenue_by_venue,
    }
}

fn seats_in_booking(details: &str, kind: BookingKind) -> i64 {
    let parsed = match kind {
        BookingKind::Movie => {
            serde_json::from_str::<SeatSelection>(details).map(|s| s.seats.len() as i64)
        }
        BookingKind::Event => serde_json::from_str::<ZoneSelection>(details).map(|s| {
            s.selected_zones
                .values()
                .map(|counts| i64::from(counts.total()))
                .sum()
        }),
    };

    match parsed {
        Ok(count) => count,
        Err(err) => {
            warn!(error = %err, "counting zero seats for booking with malformed details");
            0
        }
    }
}
