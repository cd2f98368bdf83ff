use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, security_headers};
use crate::handlers::{self, analytics, bookings, schedules};
use crate::AppState;

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/bookings/movie", post(bookings::create_movie_booking))
        .route("/api/bookings/event", post(bookings::create_event_booking))
        .route(
            "/api/bookings/public/:code",
            get(bookings::get_booking_by_code),
        )
        .route(
            "/api/bookings/user/:user_id",
            get(bookings::bookings_for_user),
        )
        .route(
            "/api/bookings/show/:show_id/blocked-seats",
            get(bookings::blocked_seats),
        )
        .route(
            "/api/bookings/event/:event_id/zone-availability",
            get(bookings::zone_availability),
        )
        .route("/api/bookings/:id", get(bookings::get_booking))
        .route("/api/bookings/:id/cancel", post(bookings::cancel_booking))
        .route("/api/schedules", post(schedules::create_schedule))
        .route(
            "/api/schedules/venue/:venue_id",
            get(schedules::schedules_for_venue),
        )
        .route(
            "/api/analytics/movie/:movie_id",
            get(analytics::movie_analytics),
        )
        .route(
            "/api/analytics/event/:event_id",
            get(analytics::event_analytics),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(create_cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
