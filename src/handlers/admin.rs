use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::db::queries;
use crate::errors::BookingError;
use crate::models::{Actor, BookingStatus};
use crate::services::lifecycle::{self, AdminListFilter};
use crate::services::notify::Level;
use crate::state::AppState;

use super::bookings::BookingResponse;

fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<Actor, BookingError> {
    let actor = state
        .identity
        .resolve(headers)
        .ok_or(BookingError::NotAuthenticated)?;
    if !actor.is_admin {
        return Err(BookingError::PermissionDenied);
    }
    Ok(actor)
}

// GET /api/admin/bookings
#[derive(Deserialize)]
pub struct AdminBookingsQuery {
    pub status: Option<String>,
    pub search: Option<String>,
}

pub async fn get_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<AdminBookingsQuery>,
) -> Result<Json<Vec<BookingResponse>>, BookingError> {
    require_admin(&state, &headers)?;

    let status = match query.status.as_deref() {
        None | Some("all") => None,
        Some(s) => Some(
            BookingStatus::from_param(s)
                .ok_or_else(|| BookingError::Validation(format!("unknown status: {s}")))?,
        ),
    };

    let bookings = {
        let db = state.db.lock().unwrap();
        lifecycle::list_all(
            &db,
            &AdminListFilter {
                status,
                search: query.search,
            },
        )?
    };

    let today = Utc::now().date_naive();
    let response = bookings
        .iter()
        .map(|b| BookingResponse::from_booking(b, today))
        .collect();
    Ok(Json(response))
}

// POST /api/admin/bookings/:id/status
#[derive(Deserialize)]
pub struct SetStatusBody {
    pub status: String,
}

pub async fn set_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<SetStatusBody>,
) -> Result<Json<serde_json::Value>, BookingError> {
    let actor = state.identity.resolve(&headers);

    let new_status = BookingStatus::from_param(&body.status)
        .ok_or_else(|| BookingError::Validation(format!("unknown status: {}", body.status)))?;

    let result = {
        let db = state.db.lock().unwrap();
        lifecycle::set_status(&db, &id, new_status, actor.as_ref())
    };

    match result {
        Ok(()) => {
            state
                .notifier
                .notify(
                    &format!("Booking {} successfully", new_status.as_str()),
                    Level::Success,
                )
                .await;
            Ok(Json(serde_json::json!({ "ok": true })))
        }
        Err(e) => {
            state.notifier.notify(&e.to_string(), e.level()).await;
            Err(e)
        }
    }
}

// GET /api/admin/stats
#[derive(Serialize)]
pub struct StatsResponse {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
    pub denied: i64,
}

pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<StatsResponse>, BookingError> {
    require_admin(&state, &headers)?;

    let stats = {
        let db = state.db.lock().unwrap();
        queries::get_booking_stats(&db).map_err(BookingError::Query)?
    };

    Ok(Json(StatsResponse {
        total: stats.total,
        pending: stats.pending,
        approved: stats.approved,
        denied: stats.denied,
    }))
}
