use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::BookingError;
use crate::models::Booking;
use crate::services::lifecycle::{self, CreateRequest, UserListFilter};
use crate::services::notify::Level;
use crate::state::AppState;

use super::parse_date_param;

#[derive(Deserialize)]
pub struct CreateBookingBody {
    pub resource: String,
    pub date: String,
    pub time_slot: String,
    pub purpose: String,
}

#[derive(Serialize)]
pub struct BookingResponse {
    pub id: String,
    pub booking_ref: String,
    pub resource: String,
    pub resource_name: String,
    pub date: String,
    pub time_slot: String,
    pub time_slot_display: String,
    pub purpose: String,
    pub requester_email: String,
    pub requester_name: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
    pub updated_by: Option<String>,
}

impl BookingResponse {
    pub fn from_booking(booking: &Booking, today: NaiveDate) -> Self {
        Self {
            id: booking.id.clone(),
            booking_ref: booking.booking_ref.clone(),
            resource: booking.resource.as_str().to_string(),
            resource_name: booking.resource.display_name().to_string(),
            date: booking.date.format("%Y-%m-%d").to_string(),
            time_slot: booking.time_slot.to_string(),
            time_slot_display: booking.time_slot.display(),
            purpose: booking.purpose.clone(),
            requester_email: booking.requester_email.clone(),
            requester_name: booking.requester_name.clone(),
            status: booking.display_status(today).as_str().to_string(),
            created_at: booking.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            updated_at: booking.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            updated_by: booking.updated_by.clone(),
        }
    }
}

// POST /api/bookings
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateBookingBody>,
) -> Result<Json<BookingResponse>, BookingError> {
    let actor = state.identity.resolve(&headers);

    let result = {
        let db = state.db.lock().unwrap();
        lifecycle::create_booking(
            &db,
            &CreateRequest {
                resource: body.resource,
                date: body.date,
                time_slot: body.time_slot,
                purpose: body.purpose,
            },
            actor.as_ref(),
        )
    };

    match result {
        Ok(booking) => {
            state
                .notifier
                .notify(
                    &format!("Booking {} created", booking.booking_ref),
                    Level::Success,
                )
                .await;
            Ok(Json(BookingResponse::from_booking(
                &booking,
                Utc::now().date_naive(),
            )))
        }
        Err(e) => {
            state.notifier.notify(&e.to_string(), e.level()).await;
            Err(e)
        }
    }
}

// GET /api/bookings
#[derive(Deserialize)]
pub struct MyBookingsQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub exclude_cancelled: Option<bool>,
}

pub async fn get_my_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<MyBookingsQuery>,
) -> Result<Json<Vec<BookingResponse>>, BookingError> {
    let actor = state
        .identity
        .resolve(&headers)
        .ok_or(BookingError::NotAuthenticated)?;

    let filter = UserListFilter {
        from: query
            .from
            .as_deref()
            .map(|v| parse_date_param("from", v))
            .transpose()?,
        to: query
            .to
            .as_deref()
            .map(|v| parse_date_param("to", v))
            .transpose()?,
        exclude_cancelled: query.exclude_cancelled.unwrap_or(true),
    };

    let bookings = {
        let db = state.db.lock().unwrap();
        lifecycle::list_for_user(&db, &actor.uid, &filter)?
    };

    let today = Utc::now().date_naive();
    let response = bookings
        .iter()
        .map(|b| BookingResponse::from_booking(b, today))
        .collect();
    Ok(Json(response))
}

// POST /api/bookings/:id/cancel
pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, BookingError> {
    let actor = state.identity.resolve(&headers);

    let result = {
        let db = state.db.lock().unwrap();
        lifecycle::cancel_booking(&db, &id, actor.as_ref())
    };

    match result {
        Ok(()) => {
            state
                .notifier
                .notify("Booking cancelled successfully", Level::Success)
                .await;
            Ok(Json(serde_json::json!({ "ok": true })))
        }
        Err(e) => {
            state.notifier.notify(&e.to_string(), e.level()).await;
            Err(e)
        }
    }
}
