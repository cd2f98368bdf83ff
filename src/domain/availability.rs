use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::warn;

use crate::models::{Booking, BookingStatus, SeatSelection, ZoneConfig, ZoneSelection};

/// Seats held by confirmed bookings for a show, as a set union across all
/// of their seat lists. Cancelled bookings contribute nothing. A booking
/// whose details payload does not parse also contributes nothing — one
/// corrupt record must never block the whole seat map.
pub fn blocked_seats(bookings: &[Booking]) -> BTreeSet<String> {
    let mut seats = BTreeSet::new();
    for booking in confirmed(bookings) {
        match serde_json::from_str::<SeatSelection>(&booking.details) {
            Ok(selection) => seats.extend(selection.seats),
            Err(err) => {
                warn!(
                    booking_id = %booking.id,
                    error = %err,
                    "skipping booking with malformed seat details"
                );
            }
        }
    }
    seats
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneAvailability {
    pub capacity: i32,
    pub booked: i32,
    pub available: i32,
    pub is_available: bool,
}

/// Remaining capacity per zone, derived on read from the confirmed booking
/// log rather than kept as a live counter. `available` may go negative when
/// a zone is oversold; the negative number is surfaced so operators can
/// detect overselling. Zone names a booking records that the event never
/// declared are ignored, as are bookings with malformed details.
pub fn zone_availability(
    zones: &[ZoneConfig],
    bookings: &[Booking],
) -> BTreeMap<String, ZoneAvailability> {
    let mut parsed = Vec::with_capacity(bookings.len());
    for booking in confirmed(bookings) {
        match serde_json::from_str::<ZoneSelection>(&booking.details) {
            Ok(selection) => parsed.push(selection),
            Err(err) => {
                warn!(
                    booking_id = %booking.id,
                    error = %err,
                    "skipping booking with malformed zone details"
                );
            }
        }
    }

    let mut availability = BTreeMap::new();
    for zone in zones {
        let booked: i32 = parsed
            .iter()
            .filter_map(|selection| selection.selected_zones.get(&zone.name))
            .map(|counts| counts.total())
            .sum();
        let available = zone.capacity - booked;
        availability.insert(
            zone.name.clone(),
            ZoneAvailability {
                capacity: zone.capacity,
                booked,
                available,
                is_available: available > 0,
            },
        );
    }
    availability
}

fn confirmed(bookings: &[Booking]) -> impl Iterator<Item = &Booking> {
    bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Confirmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingKind, PaymentStatus};
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn booking(status: BookingStatus, details: &str) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            booking_code: "BKTESTTESTTEST".to_string(),
            user_id: Uuid::new_v4(),
            kind: BookingKind::Movie,
            show_id: Some(Uuid::new_v4()),
            event_id: None,
            event_date_id: None,
            details: details.to_string(),
            total_amount: Decimal::ZERO,
            payment_method: "card".to_string(),
            payment_status: PaymentStatus::Completed,
            status,
            booked_at: Utc::now(),
            created_at: Utc::now(),
        }
    }

    fn zone(name: &str, capacity: i32) -> ZoneConfig {
        ZoneConfig {
            name: name.to_string(),
            capacity,
        }
    }

    #[test]
    fn blocked_seats_unions_confirmed_and_skips_cancelled() {
        let bookings = vec![
            booking(BookingStatus::Confirmed, r#"{"seats":["A1","A2"]}"#),
            booking(BookingStatus::Cancelled, r#"{"seats":["A3"]}"#),
            booking(BookingStatus::Confirmed, r#"{"seats":["A2","B5"]}"#),
        ];

        let blocked = blocked_seats(&bookings);
        let expected: BTreeSet<String> =
            ["A1", "A2", "B5"].iter().map(|s| s.to_string()).collect();
        assert_eq!(blocked, expected);
    }

    #[test]
    fn blocked_seats_ignores_malformed_details() {
        let bookings = vec![
            booking(BookingStatus::Confirmed, "not json at all"),
            booking(BookingStatus::Confirmed, r#"{"seats":["C4"]}"#),
        ];

        let blocked = blocked_seats(&bookings);
        assert_eq!(blocked.len(), 1);
        assert!(blocked.contains("C4"));
    }

    #[test]
    fn zone_availability_reports_remaining_capacity() {
        let zones = vec![zone("VIP", 100)];
        let bookings = vec![
            booking(
                BookingStatus::Confirmed,
                r#"{"selectedZones":{"VIP":{"adult":30,"child":10}}}"#,
            ),
            booking(
                BookingStatus::Cancelled,
                r#"{"selectedZones":{"VIP":{"adult":50,"child":0}}}"#,
            ),
        ];

        let availability = zone_availability(&zones, &bookings);
        let vip = &availability["VIP"];
        assert_eq!(vip.capacity, 100);
        assert_eq!(vip.booked, 40);
        assert_eq!(vip.available, 60);
        assert!(vip.is_available);
    }

    #[test]
    fn oversold_zone_surfaces_negative_availability() {
        let zones = vec![zone("General", 100)];
        let bookings = vec![booking(
            BookingStatus::Confirmed,
            r#"{"selectedZones":{"General":{"adult":100,"child":10}}}"#,
        )];

        let availability = zone_availability(&zones, &bookings);
        let general = &availability["General"];
        assert_eq!(general.available, -10);
        assert!(!general.is_available);
    }

    #[test]
    fn unknown_zones_and_malformed_details_are_skipped() {
        let zones = vec![zone("Balcony", 50)];
        let bookings = vec![
            booking(
                BookingStatus::Confirmed,
                r#"{"selectedZones":{"Pit":{"adult":5,"child":0}}}"#,
            ),
            booking(BookingStatus::Confirmed, "{broken"),
            booking(
                BookingStatus::Confirmed,
                r#"{"selectedZones":{"Balcony":{"adult":2,"child":1}}}"#,
            ),
        ];

        let availability = zone_availability(&zones, &bookings);
        assert_eq!(availability.len(), 1);
        assert_eq!(availability["Balcony"].booked, 3);
        assert_eq!(availability["Balcony"].available, 47);
    }
}
