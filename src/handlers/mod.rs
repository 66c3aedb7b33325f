pub mod admin;
pub mod bookings;
pub mod calendar;
pub mod health;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use chrono::NaiveDate;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::errors::BookingError;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/calendar/:year/:month", get(calendar::get_month))
        .route("/api/availability", get(calendar::check_slot))
        .route("/api/availability/day", get(calendar::get_day_slots))
        .route(
            "/api/bookings",
            get(bookings::get_my_bookings).post(bookings::create_booking),
        )
        .route("/api/bookings/:id/cancel", post(bookings::cancel_booking))
        .route("/api/admin/bookings", get(admin::get_bookings))
        .route("/api/admin/bookings/:id/status", post(admin::set_status))
        .route("/api/admin/stats", get(admin::get_stats))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn parse_date_param(name: &str, value: &str) -> Result<NaiveDate, BookingError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| BookingError::Validation(format!("invalid {name}: {value}")))
}
