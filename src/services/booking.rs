use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::cancellation;
use crate::domain::code::{generate_booking_code, MAX_CODE_ATTEMPTS};
use crate::models::{
    Booking, BookingKind, BookingStatus, Event, PaymentStatus, SeatSelection, Show, User,
    ZoneCounts, ZoneSelection,
};
use crate::utils::error::AppError;

/// Matches the UNIQUE (show_id, seat_label) constraint declared in the
/// initial migration; a rename there must be mirrored here.
const SEAT_HOLD_CONSTRAINT: &str = "booking_seats_unique_hold";

#[derive(Debug, Deserialize)]
pub struct CreateMovieBooking {
    pub user_id: Uuid,
    pub show_id: Uuid,
    pub seats: Vec<String>,
    pub total_amount: Option<Decimal>,
    /// "card", "upi", "netbanking", "wallet"
    pub payment_method: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateEventBooking {
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub event_date_id: String,
    pub selected_zones: BTreeMap<String, ZoneCounts>,
    pub total_amount: Option<Decimal>,
    pub payment_method: String,
}

/// Booking view for public ticket/QR lookups. Never carries the owning
/// user's identity or contact fields, regardless of who asks.
#[derive(Debug, Serialize)]
pub struct PublicBooking {
    pub id: Uuid,
    pub booking_code: String,
    pub kind: BookingKind,
    pub show_id: Option<Uuid>,
    pub event_id: Option<Uuid>,
    pub event_date_id: Option<String>,
    pub details: String,
    pub total_amount: Decimal,
    pub payment_method: String,
    pub status: BookingStatus,
    pub booked_at: DateTime<Utc>,
}

impl From<Booking> for PublicBooking {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            booking_code: b.booking_code,
            kind: b.kind,
            show_id: b.show_id,
            event_id: b.event_id,
            event_date_id: b.event_date_id,
            details: b.details,
            total_amount: b.total_amount,
            payment_method: b.payment_method,
            status: b.status,
            booked_at: b.booked_at,
        }
    }
}

pub async fn create_movie_booking(
    pool: &PgPool,
    req: CreateMovieBooking,
) -> Result<Booking, AppError> {
    find_user(pool, req.user_id).await?;
    find_show(pool, req.show_id).await?;
    validate_seats(&req.seats)?;
    let total_amount = validate_amount(req.total_amount)?;

    let details = serialize_details(&SeatSelection {
        seats: req.seats.clone(),
    })?;
    let code = assign_booking_code(pool).await?;

    let mut tx = pool.begin().await?;
    let booking = sqlx::query_as::<_, Booking>(
        r#"
        INSERT INTO bookings
            (booking_code, user_id, kind, show_id, details,
             total_amount, payment_method, payment_status, status, booked_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(&code)
    .bind(req.user_id)
    .bind(BookingKind::Movie)
    .bind(req.show_id)
    .bind(&details)
    .bind(total_amount)
    .bind(&req.payment_method)
    .bind(PaymentStatus::Completed)
    .bind(BookingStatus::Confirmed)
    .bind(Utc::now())
    .fetch_one(&mut *tx)
    .await?;

    // Seat holds live in their own table so the unique constraint on
    // (show, seat) can reject a concurrent booking of the same seat.
    for seat in &req.seats {
        sqlx::query("INSERT INTO booking_seats (booking_id, show_id, seat_label) VALUES ($1, $2, $3)")
            .bind(booking.id)
            .bind(req.show_id)
            .bind(seat)
            .execute(&mut *tx)
            .await
            .map_err(|e| seat_conflict(e, seat))?;
    }
    tx.commit().await?;

    info!(
        booking_id = %booking.id,
        code = %booking.booking_code,
        show_id = %req.show_id,
        seats = req.seats.len(),
        "movie booking confirmed"
    );
    Ok(booking)
}

pub async fn create_event_booking(
    pool: &PgPool,
    req: CreateEventBooking,
) -> Result<Booking, AppError> {
    find_user(pool, req.user_id).await?;
    find_event(pool, req.event_id).await?;
    validate_zones(&req.selected_zones)?;
    let total_amount = validate_amount(req.total_amount)?;

    let details = serialize_details(&ZoneSelection {
        selected_zones: req.selected_zones,
    })?;
    let code = assign_booking_code(pool).await?;

    let booking = sqlx::query_as::<_, Booking>(
        r#"
        INSERT INTO bookings
            (booking_code, user_id, kind, event_id, event_date_id, details,
             total_amount, payment_method, payment_status, status, booked_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(&code)
    .bind(req.user_id)
    .bind(BookingKind::Event)
    .bind(req.event_id)
    .bind(&req.event_date_id)
    .bind(&details)
    .bind(total_amount)
    .bind(&req.payment_method)
    .bind(PaymentStatus::Completed)
    .bind(BookingStatus::Confirmed)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    info!(
        booking_id = %booking.id,
        code = %booking.booking_code,
        event_id = %req.event_id,
        "event booking confirmed"
    );
    Ok(booking)
}

pub async fn cancel_booking(
    pool: &PgPool,
    booking_id: Uuid,
    acting_user_id: Uuid,
) -> Result<Booking, AppError> {
    let booking = find_booking(pool, booking_id).await?;
    cancellation::authorize_cancellation(&booking, acting_user_id, Utc::now())?;

    let mut tx = pool.begin().await?;
    let cancelled = sqlx::query_as::<_, Booking>(
        "UPDATE bookings SET status = $1, payment_status = $2 WHERE id = $3 RETURNING *",
    )
    .bind(BookingStatus::Cancelled)
    .bind(PaymentStatus::Refunded)
    .bind(booking_id)
    .fetch_one(&mut *tx)
    .await?;

    // Release the seat holds so the seats become bookable again.
    sqlx::query("DELETE FROM booking_seats WHERE booking_id = $1")
        .bind(booking_id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    info!(booking_id = %booking_id, code = %cancelled.booking_code, "booking cancelled");
    Ok(cancelled)
}

/// Owner-only read of a single booking.
pub async fn get_booking(
    pool: &PgPool,
    booking_id: Uuid,
    acting_user_id: Uuid,
) -> Result<Booking, AppError> {
    let booking = find_booking(pool, booking_id).await?;
    if booking.user_id != acting_user_id {
        return Err(AppError::Forbidden(
            "You can only view your own bookings".to_string(),
        ));
    }
    Ok(booking)
}

/// Public lookup by booking code, used for ticket/QR scans.
pub async fn get_booking_by_code(pool: &PgPool, code: &str) -> Result<PublicBooking, AppError> {
    let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE booking_code = $1")
        .bind(code)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Booking not found with code: {code}")))?;
    Ok(PublicBooking::from(booking))
}

pub async fn bookings_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Booking>, AppError> {
    find_user(pool, user_id).await?;
    let bookings =
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE user_id = $1 ORDER BY booked_at DESC")
            .bind(user_id)
            .fetch_all(pool)
            .await?;
    Ok(bookings)
}

async fn find_booking(pool: &PgPool, booking_id: Uuid) -> Result<Booking, AppError> {
    sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
        .bind(booking_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Booking not found with id: {booking_id}")))
}

/// Pick a candidate code and check it against existing bookings, retrying a
/// bounded number of times. The 36^12 code space makes a collision all but
/// impossible, so exhaustion indicates something badly wrong with the store.
async fn assign_booking_code(pool: &PgPool) -> Result<String, AppError> {
    for _ in 0..MAX_CODE_ATTEMPTS {
        let code = generate_booking_code();
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM bookings WHERE booking_code = $1)")
                .bind(&code)
                .fetch_one(pool)
                .await?;
        if !exists {
            return Ok(code);
        }
        warn!(code = %code, "booking code collision, retrying");
    }
    Err(AppError::CodeGenerationExhausted)
}

fn seat_conflict(err: sqlx::Error, seat: &str) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.constraint() == Some(SEAT_HOLD_CONSTRAINT) => {
            AppError::SeatTaken(seat.to_string())
        }
        _ => AppError::DatabaseError(err),
    }
}

/// Missing amounts default to zero (free passes); negative amounts are a
/// client error, never persisted.
fn validate_amount(amount: Option<Decimal>) -> Result<Decimal, AppError> {
    let amount = amount.unwrap_or(Decimal::ZERO);
    if amount < Decimal::ZERO {
        return Err(AppError::ValidationError(
            "total amount cannot be negative".to_string(),
        ));
    }
    Ok(amount)
}

/// Repeated seat labels would trip the seat-hold primary key mid-transaction,
/// so they are rejected up front.
fn validate_seats(seats: &[String]) -> Result<(), AppError> {
    if seats.is_empty() {
        return Err(AppError::ValidationError(
            "at least one seat must be selected".to_string(),
        ));
    }
    let mut seen = BTreeSet::new();
    for seat in seats {
        if !seen.insert(seat.as_str()) {
            return Err(AppError::ValidationError(format!(
                "seat selected more than once: {seat}"
            )));
        }
    }
    Ok(())
}

fn validate_zones(zones: &BTreeMap<String, ZoneCounts>) -> Result<(), AppError> {
    if zones.is_empty() {
        return Err(AppError::ValidationError(
            "at least one zone must be selected".to_string(),
        ));
    }
    for (zone, counts) in zones {
        if counts.adult < 0 || counts.child < 0 {
            return Err(AppError::ValidationError(format!(
                "negative pass count for zone: {zone}"
            )));
        }
    }
    Ok(())
}

fn serialize_details<T: Serialize>(details: &T) -> Result<String, AppError> {
    serde_json::to_string(details)
        .map_err(|e| AppError::InternalServerError(format!("failed to serialize booking details: {e}")))
}

async fn find_user(pool: &PgPool, user_id: Uuid) -> Result<User, AppError> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User not found with id: {user_id}")))
}

async fn find_show(pool: &PgPool, show_id: Uuid) -> Result<Show, AppError> {
    sqlx::query_as::<_, Show>("SELECT * FROM shows WHERE id = $1")
        .bind(show_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Show not found with id: {show_id}")))
}

async fn find_event(pool: &PgPool, event_id: Uuid) -> Result<Event, AppError> {
    sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
        .bind(event_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Event not found with id: {event_id}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_booking() -> Booking {
        Booking {
            id: Uuid::new_v4(),
            booking_code: "BK8F3KZ1P9Q2XA".to_string(),
            user_id: Uuid::new_v4(),
            kind: BookingKind::Movie,
            show_id: Some(Uuid::new_v4()),
            event_id: None,
            event_date_id: None,
            details: r#"{"seats":["A1"]}"#.to_string(),
            total_amount: Decimal::from(150),
            payment_method: "upi".to_string(),
            payment_status: PaymentStatus::Completed,
            status: BookingStatus::Confirmed,
            booked_at: Utc::now(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn public_view_never_exposes_the_owner() {
        let booking = sample_booking();
        let public = PublicBooking::from(booking.clone());

        let json = serde_json::to_value(&public).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert!(!keys.contains(&"user_id"));
        assert!(!keys.contains(&"payment_status"));
        assert_eq!(json["booking_code"], booking.booking_code);
    }

    #[test]
    fn movie_details_serialize_under_the_seats_key() {
        let details = serialize_details(&SeatSelection {
            seats: vec!["A1".to_string(), "A2".to_string()],
        })
        .unwrap();
        assert_eq!(details, r#"{"seats":["A1","A2"]}"#);
    }

    #[test]
    fn negative_total_amount_is_rejected() {
        let err = validate_amount(Some(Decimal::from(-1))).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn missing_total_amount_defaults_to_zero() {
        assert_eq!(validate_amount(None).unwrap(), Decimal::ZERO);
        assert_eq!(
            validate_amount(Some(Decimal::from(150))).unwrap(),
            Decimal::from(150)
        );
    }

    #[test]
    fn duplicate_seat_labels_are_rejected() {
        let seats = vec!["A1".to_string(), "A2".to_string(), "A1".to_string()];
        let err = validate_seats(&seats).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert!(validate_seats(&["A1".to_string(), "A2".to_string()]).is_ok());
    }

    #[test]
    fn empty_seat_selection_is_rejected() {
        assert!(matches!(
            validate_seats(&[]).unwrap_err(),
            AppError::ValidationError(_)
        ));
    }

    #[test]
    fn negative_zone_counts_are_rejected() {
        let mut zones = BTreeMap::new();
        zones.insert("VIP".to_string(), ZoneCounts { adult: 2, child: -1 });
        let err = validate_zones(&zones).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        zones.insert("VIP".to_string(), ZoneCounts { adult: 2, child: 1 });
        assert!(validate_zones(&zones).is_ok());
        assert!(matches!(
            validate_zones(&BTreeMap::new()).unwrap_err(),
            AppError::ValidationError(_)
        ));
    }

    #[test]
    fn seat_hold_constraint_matches_the_migration() {
        let migration = include_str!("../../migrations/0001_initial.sql");
        assert!(migration.contains(&format!("CONSTRAINT {SEAT_HOLD_CONSTRAINT} UNIQUE")));
        assert!(migration.contains("CHECK (total_amount >= 0)"));
    }

    #[test]
    fn non_constraint_errors_stay_database_errors() {
        let err = seat_conflict(sqlx::Error::RowNotFound, "A1");
        assert!(matches!(err, AppError::DatabaseError(_)));
    }

    #[test]
    fn event_details_serialize_under_the_selected_zones_key() {
        let mut zones = BTreeMap::new();
        zones.insert("VIP".to_string(), ZoneCounts { adult: 2, child: 1 });
        let details = serialize_details(&ZoneSelection {
            selected_zones: zones,
        })
        .unwrap();
        assert_eq!(details, r#"{"selectedZones":{"VIP":{"adult":2,"child":1}}}"#);
    }
}
