use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::db::queries;
use crate::errors::BookingError;
use crate::models::{DayAvailability, Resource, TimeSlot};
use crate::services::{availability, calendar};
use crate::state::AppState;

use super::parse_date_param;

// GET /api/calendar/:year/:month
#[derive(Deserialize)]
pub struct MonthQuery {
    pub selected: Option<String>,
}

pub async fn get_month(
    State(state): State<Arc<AppState>>,
    Path((year, month)): Path<(i32, u32)>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<calendar::MonthView>, BookingError> {
    let selected = query
        .selected
        .as_deref()
        .map(|v| parse_date_param("selected", v))
        .transpose()?;

    let (first, last) = calendar::month_range(year, month)
        .ok_or_else(|| BookingError::Validation(format!("invalid month: {year}-{month:02}")))?;

    let bookings = {
        let db = state.db.lock().unwrap();
        queries::get_bookings_in_range(&db, first, last).map_err(BookingError::Query)?
    };

    let view = calendar::month_view(
        year,
        month,
        &bookings,
        &state.config.maintenance_days,
        Utc::now().date_naive(),
        selected,
    )
    .ok_or_else(|| BookingError::Validation(format!("invalid month: {year}-{month:02}")))?;

    Ok(Json(view))
}

// GET /api/availability
#[derive(Deserialize)]
pub struct SlotQuery {
    pub resource: String,
    pub date: String,
    pub time_slot: String,
}

pub async fn check_slot(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<serde_json::Value>, BookingError> {
    let resource = Resource::parse(&query.resource)
        .ok_or_else(|| BookingError::Validation(format!("unknown resource: {}", query.resource)))?;
    let date = parse_date_param("date", &query.date)?;
    let time_slot = TimeSlot::parse(&query.time_slot).ok_or_else(|| {
        BookingError::Validation(format!("invalid time slot: {}", query.time_slot))
    })?;

    let available = {
        let db = state.db.lock().unwrap();
        availability::is_slot_available(&db, resource, date, time_slot)?
    };

    Ok(Json(serde_json::json!({ "available": available })))
}

// GET /api/availability/day
#[derive(Deserialize)]
pub struct DayQuery {
    pub resource: String,
    pub date: String,
}

#[derive(Serialize)]
pub struct DaySlotsResponse {
    pub resource: String,
    pub date: String,
    #[serde(flatten)]
    pub day: DayAvailability,
    pub free_slots: Vec<String>,
}

pub async fn get_day_slots(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DayQuery>,
) -> Result<Json<DaySlotsResponse>, BookingError> {
    let resource = Resource::parse(&query.resource)
        .ok_or_else(|| BookingError::Validation(format!("unknown resource: {}", query.resource)))?;
    let date = parse_date_param("date", &query.date)?;

    let (free, active_for_date) = {
        let db = state.db.lock().unwrap();
        let free = availability::free_slots(&db, resource, date)?;
        let active =
            queries::count_active_for_date(&db, date).map_err(BookingError::Query)?;
        (free, active)
    };

    let day = availability::day_availability(
        date,
        active_for_date.max(0) as u32,
        &state.config.maintenance_days,
    );

    // no slot is offered on a maintenance day
    let free_slots = if day.total_slots == 0 {
        vec![]
    } else {
        free.iter().map(|slot| slot.to_string()).collect()
    };

    Ok(Json(DaySlotsResponse {
        resource: resource.as_str().to_string(),
        date: date.format("%Y-%m-%d").to_string(),
        day,
        free_slots,
    }))
}
