use chrono::{NaiveDate, Utc};
use rusqlite::Connection;
use uuid::Uuid;

use crate::db::queries;
use crate::errors::BookingError;
use crate::models::{Actor, Booking, BookingStatus, Resource, TimeSlot};
use crate::services::{availability, reference};

/// Raw user input for a new booking; everything is validated here before
/// it touches the store.
pub struct CreateRequest {
    pub resource: String,
    pub date: String,
    pub time_slot: String,
    pub purpose: String,
}

#[derive(Default)]
pub struct UserListFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub exclude_cancelled: bool,
}

#[derive(Default)]
pub struct AdminListFilter {
    pub status: Option<BookingStatus>,
    pub search: Option<String>,
}

pub fn create_booking(
    conn: &Connection,
    request: &CreateRequest,
    actor: Option<&Actor>,
) -> Result<Booking, BookingError> {
    let resource = Resource::parse(request.resource.trim()).ok_or_else(|| {
        BookingError::Validation(format!("unknown resource: {}", request.resource))
    })?;
    let date = NaiveDate::parse_from_str(request.date.trim(), "%Y-%m-%d")
        .map_err(|_| BookingError::Validation(format!("invalid date: {}", request.date)))?;
    let time_slot = TimeSlot::parse(request.time_slot.trim()).ok_or_else(|| {
        BookingError::Validation(format!("invalid time slot: {}", request.time_slot))
    })?;
    let purpose = request.purpose.trim();
    if purpose.is_empty() {
        return Err(BookingError::Validation(
            "purpose must not be empty".to_string(),
        ));
    }

    let actor = actor.ok_or(BookingError::NotAuthenticated)?;

    // Fast pre-check for a friendly failure. The conditional insert
    // below remains the authority under concurrent writers.
    if !availability::is_slot_available(conn, resource, date, time_slot)? {
        return Err(BookingError::SlotConflict);
    }

    let now = Utc::now().naive_utc();
    let booking = Booking {
        id: Uuid::new_v4().to_string(),
        booking_ref: reference::generate(),
        resource,
        date,
        time_slot,
        purpose: purpose.to_string(),
        requester_id: actor.uid.clone(),
        requester_email: actor.email.clone(),
        requester_name: actor.display_name.clone(),
        status: BookingStatus::Pending,
        created_at: now,
        updated_at: now,
        updated_by: None,
    };

    let inserted = queries::insert_booking_if_slot_free(conn, &booking).map_err(|e| match e {
        // the partial unique index fires when two writers pass the
        // pre-check at the same time
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            BookingError::SlotConflict
        }
        other => BookingError::Write(other),
    })?;
    if !inserted {
        return Err(BookingError::SlotConflict);
    }

    Ok(booking)
}

/// Owner or administrator cancellation. Cancelling an already-cancelled
/// booking is harmless: the row stays cancelled.
pub fn cancel_booking(
    conn: &Connection,
    booking_id: &str,
    actor: Option<&Actor>,
) -> Result<(), BookingError> {
    let actor = actor.ok_or(BookingError::NotAuthenticated)?;

    let booking = queries::get_booking(conn, booking_id)
        .map_err(BookingError::Query)?
        .ok_or_else(|| BookingError::NotFound(booking_id.to_string()))?;

    if booking.requester_id != actor.uid && !actor.is_admin {
        return Err(BookingError::PermissionDenied);
    }

    queries::update_status(conn, booking_id, BookingStatus::Cancelled, &actor.email)
        .map_err(BookingError::Write)?;
    Ok(())
}

/// Administrative adjudication of a pending booking.
pub fn set_status(
    conn: &Connection,
    booking_id: &str,
    new_status: BookingStatus,
    actor: Option<&Actor>,
) -> Result<(), BookingError> {
    let actor = actor.ok_or(BookingError::NotAuthenticated)?;
    if !actor.is_admin {
        return Err(BookingError::PermissionDenied);
    }

    let booking = queries::get_booking(conn, booking_id)
        .map_err(BookingError::Query)?
        .ok_or_else(|| BookingError::NotFound(booking_id.to_string()))?;

    if !booking.status.admin_transition_allowed(new_status) {
        return Err(BookingError::InvalidTransition {
            from: booking.status.as_str(),
            to: new_status.as_str(),
        });
    }

    queries::update_status(conn, booking_id, new_status, &actor.email)
        .map_err(BookingError::Write)?;
    Ok(())
}

pub fn list_for_user(
    conn: &Connection,
    requester_id: &str,
    filter: &UserListFilter,
) -> Result<Vec<Booking>, BookingError> {
    queries::get_bookings_for_user(conn, requester_id, filter).map_err(BookingError::Query)
}

pub fn list_all(
    conn: &Connection,
    filter: &AdminListFilter,
) -> Result<Vec<Booking>, BookingError> {
    let mut bookings =
        queries::get_all_bookings(conn, filter.status).map_err(BookingError::Query)?;

    if let Some(term) = filter.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        let term = term.to_lowercase();
        bookings.retain(|booking| matches_search(booking, &term));
    }

    Ok(bookings)
}

/// Case-insensitive match against the fields an administrator sees in
/// the list: reference, requester email, resource display name, date,
/// purpose.
fn matches_search(booking: &Booking, term: &str) -> bool {
    booking.booking_ref.to_lowercase().contains(term)
        || booking.requester_email.to_lowercase().contains(term)
        || booking.resource.display_name().to_lowercase().contains(term)
        || booking.date.format("%Y-%m-%d").to_string().contains(term)
        || booking.purpose.to_lowercase().contains(term)
}
