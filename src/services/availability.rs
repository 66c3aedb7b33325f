use chrono::{Datelike, NaiveDate};
use rusqlite::Connection;

use crate::db::queries;
use crate::errors::BookingError;
use crate::models::slot::TOTAL_SLOTS;
use crate::models::{DayAvailability, DayStatus, Resource, TimeSlot};

/// True iff no active (non-cancelled) booking occupies the triple.
///
/// A store failure surfaces as an error; callers must treat that as
/// "not available" rather than letting a booking through.
pub fn is_slot_available(
    conn: &Connection,
    resource: Resource,
    date: NaiveDate,
    time_slot: TimeSlot,
) -> Result<bool, BookingError> {
    let active = queries::count_active_for_slot(conn, resource, date, time_slot)
        .map_err(BookingError::Query)?;
    Ok(active == 0)
}

/// Aggregate status of one day given the number of active bookings on
/// it. Maintenance days report zero slots regardless of bookings.
pub fn day_availability(
    date: NaiveDate,
    active_bookings: u32,
    maintenance_days: &[u32],
) -> DayAvailability {
    if maintenance_days.contains(&date.day()) {
        return DayAvailability {
            status: DayStatus::Maintenance,
            available_slots: 0,
            total_slots: 0,
        };
    }

    let available_slots = TOTAL_SLOTS.saturating_sub(active_bookings);
    let status = if available_slots == 0 {
        DayStatus::Booked
    } else {
        DayStatus::Available
    };

    DayAvailability {
        status,
        available_slots,
        total_slots: TOTAL_SLOTS,
    }
}

/// Slots still free on a day for one resource, in grid order.
pub fn free_slots(
    conn: &Connection,
    resource: Resource,
    date: NaiveDate,
) -> Result<Vec<TimeSlot>, BookingError> {
    let taken =
        queries::active_slots_for_day(conn, resource, date).map_err(BookingError::Query)?;
    Ok(TimeSlot::all().filter(|slot| !taken.contains(slot)).collect())
}
