use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::models::{Booking, BookingStatus};
use crate::utils::error::AppError;

/// Bookings may be cancelled up to this long after they were made.
/// The boundary is inclusive: a cancellation at exactly 30 minutes succeeds.
pub const CANCELLATION_WINDOW_MINUTES: i64 = 30;

pub fn window_expired(booked_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now - booked_at > Duration::minutes(CANCELLATION_WINDOW_MINUTES)
}

/// Ownership and time-window rules for cancelling a booking, checked in
/// order: ownership, current status, elapsed time.
pub fn authorize_cancellation(
    booking: &Booking,
    acting_user_id: Uuid,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    if booking.user_id != acting_user_id {
        return Err(AppError::Forbidden(
            "You can only cancel your own bookings".to_string(),
        ));
    }
    if booking.status == BookingStatus::Cancelled {
        return Err(AppError::AlreadyCancelled);
    }
    if window_expired(booking.booked_at, now) {
        return Err(AppError::WindowExpired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingKind, PaymentStatus};
    use rust_decimal::Decimal;

    fn booked_at() -> DateTime<Utc> {
        "2026-01-10T12:00:00Z".parse().unwrap()
    }

    fn booking(status: BookingStatus) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            booking_code: "BKAAAAAAAAAAAA".to_string(),
            user_id: Uuid::new_v4(),
            kind: BookingKind::Movie,
            show_id: Some(Uuid::new_v4()),
            event_id: None,
            event_date_id: None,
            details: r#"{"seats":["A1"]}"#.to_string(),
            total_amount: Decimal::from(100),
            payment_method: "card".to_string(),
            payment_status: PaymentStatus::Completed,
            status,
            booked_at: booked_at(),
            created_at: booked_at(),
        }
    }

    #[test]
    fn within_window_is_not_expired() {
        let now = booked_at() + Duration::minutes(5);
        assert!(!window_expired(booked_at(), now));
    }

    #[test]
    fn boundary_is_inclusive_at_exactly_thirty_minutes() {
        let now = booked_at() + Duration::minutes(30);
        assert!(!window_expired(booked_at(), now));
    }

    #[test]
    fn one_second_past_the_boundary_is_expired() {
        let now = booked_at() + Duration::minutes(30) + Duration::seconds(1);
        assert!(window_expired(booked_at(), now));
    }

    #[test]
    fn owner_can_cancel_inside_the_window() {
        let booking = booking(BookingStatus::Confirmed);
        let now = booked_at() + Duration::minutes(10);
        assert!(authorize_cancellation(&booking, booking.user_id, now).is_ok());
    }

    #[test]
    fn non_owner_is_rejected() {
        let booking = booking(BookingStatus::Confirmed);
        let now = booked_at() + Duration::minutes(1);
        let err = authorize_cancellation(&booking, Uuid::new_v4(), now).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn cancelling_twice_reports_already_cancelled() {
        let booking = booking(BookingStatus::Cancelled);
        let now = booked_at() + Duration::minutes(1);
        let err = authorize_cancellation(&booking, booking.user_id, now).unwrap_err();
        assert!(matches!(err, AppError::AlreadyCancelled));
    }

    #[test]
    fn expired_window_is_rejected_for_the_owner() {
        let booking = booking(BookingStatus::Confirmed);
        let now = booked_at() + Duration::minutes(31);
        let err = authorize_cancellation(&booking, booking.user_id, now).unwrap_err();
        assert!(matches!(err, AppError::WindowExpired));
    }
}
