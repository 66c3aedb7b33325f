use chrono::{NaiveDate, NaiveDateTime, Utc};
use rusqlite::{params, Connection};

use crate::models::{Booking, BookingStatus, Resource, TimeSlot};
use crate::services::lifecycle::UserListFilter;

const DATE_FMT: &str = "%Y-%m-%d";
const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

/// Insert a booking only if no active booking occupies its
/// `(resource, date, time_slot)` triple. The whole check-and-write runs
/// as one statement inside SQLite, and a partial unique index on active
/// rows backs it up, so two racing writers can never both succeed.
/// Returns false when the slot was taken.
pub fn insert_booking_if_slot_free(
    conn: &Connection,
    booking: &Booking,
) -> rusqlite::Result<bool> {
    let count = conn.execute(
        "INSERT INTO bookings (id, booking_ref, resource, date, time_slot, purpose,
                               requester_id, requester_email, requester_name,
                               status, created_at, updated_at, updated_by)
         SELECT ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13
         WHERE NOT EXISTS (
             SELECT 1 FROM bookings
             WHERE resource = ?3 AND date = ?4 AND time_slot = ?5 AND status != 'cancelled'
         )",
        params![
            booking.id,
            booking.booking_ref,
            booking.resource.as_str(),
            booking.date.format(DATE_FMT).to_string(),
            booking.time_slot.to_string(),
            booking.purpose,
            booking.requester_id,
            booking.requester_email,
            booking.requester_name,
            booking.status.as_str(),
            booking.created_at.format(DATETIME_FMT).to_string(),
            booking.updated_at.format(DATETIME_FMT).to_string(),
            booking.updated_by,
        ],
    )?;
    Ok(count > 0)
}

pub fn count_active_for_slot(
    conn: &Connection,
    resource: Resource,
    date: NaiveDate,
    time_slot: TimeSlot,
) -> rusqlite::Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM bookings
         WHERE resource = ?1 AND date = ?2 AND time_slot = ?3 AND status != 'cancelled'",
        params![
            resource.as_str(),
            date.format(DATE_FMT).to_string(),
            time_slot.to_string()
        ],
        |row| row.get(0),
    )
}

/// Active bookings on a date across all resources; feeds the per-day
/// capacity aggregate.
pub fn count_active_for_date(conn: &Connection, date: NaiveDate) -> rusqlite::Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM bookings WHERE date = ?1 AND status != 'cancelled'",
        params![date.format(DATE_FMT).to_string()],
        |row| row.get(0),
    )
}

/// Slots on a day already held by active bookings of one resource.
pub fn active_slots_for_day(
    conn: &Connection,
    resource: Resource,
    date: NaiveDate,
) -> rusqlite::Result<Vec<TimeSlot>> {
    let mut stmt = conn.prepare(
        "SELECT time_slot FROM bookings
         WHERE resource = ?1 AND date = ?2 AND status != 'cancelled'",
    )?;
    let rows = stmt.query_map(
        params![resource.as_str(), date.format(DATE_FMT).to_string()],
        |row| row.get::<_, String>(0),
    )?;

    let mut slots = vec![];
    for row in rows {
        if let Some(slot) = TimeSlot::parse(&row?) {
            slots.push(slot);
        }
    }
    Ok(slots)
}

pub fn get_booking(conn: &Connection, id: &str) -> rusqlite::Result<Option<Booking>> {
    let result = conn.query_row(
        "SELECT id, booking_ref, resource, date, time_slot, purpose,
                requester_id, requester_email, requester_name,
                status, created_at, updated_at, updated_by
         FROM bookings WHERE id = ?1",
        params![id],
        parse_booking_row,
    );

    match result {
        Ok(booking) => Ok(Some(booking)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

pub fn update_status(
    conn: &Connection,
    id: &str,
    status: BookingStatus,
    updated_by: &str,
) -> rusqlite::Result<bool> {
    let now = Utc::now().naive_utc().format(DATETIME_FMT).to_string();
    let count = conn.execute(
        "UPDATE bookings SET status = ?1, updated_at = ?2, updated_by = ?3 WHERE id = ?4",
        params![status.as_str(), now, updated_by, id],
    )?;
    Ok(count > 0)
}

pub fn get_bookings_for_user(
    conn: &Connection,
    requester_id: &str,
    filter: &UserListFilter,
) -> rusqlite::Result<Vec<Booking>> {
    let mut sql = String::from(
        "SELECT id, booking_ref, resource, date, time_slot, purpose,
                requester_id, requester_email, requester_name,
                status, created_at, updated_at, updated_by
         FROM bookings WHERE requester_id = ?1",
    );
    let mut values: Vec<Box<dyn rusqlite::types::ToSql>> =
        vec![Box::new(requester_id.to_string())];

    if let Some(from) = filter.from {
        values.push(Box::new(from.format(DATE_FMT).to_string()));
        sql.push_str(&format!(" AND date >= ?{}", values.len()));
    }
    if let Some(to) = filter.to {
        values.push(Box::new(to.format(DATE_FMT).to_string()));
        sql.push_str(&format!(" AND date <= ?{}", values.len()));
    }
    if filter.exclude_cancelled {
        sql.push_str(" AND status != 'cancelled'");
    }
    sql.push_str(" ORDER BY date ASC, time_slot ASC");

    let mut stmt = conn.prepare(&sql)?;
    let value_refs: Vec<&dyn rusqlite::types::ToSql> =
        values.iter().map(|v| v.as_ref()).collect();
    let rows = stmt.query_map(value_refs.as_slice(), parse_booking_row)?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row?);
    }
    Ok(bookings)
}

/// Administrative listing, newest first.
pub fn get_all_bookings(
    conn: &Connection,
    status: Option<BookingStatus>,
) -> rusqlite::Result<Vec<Booking>> {
    let mut sql = String::from(
        "SELECT id, booking_ref, resource, date, time_slot, purpose,
                requester_id, requester_email, requester_name,
                status, created_at, updated_at, updated_by
         FROM bookings",
    );
    let mut values: Vec<Box<dyn rusqlite::types::ToSql>> = vec![];

    if let Some(status) = status {
        values.push(Box::new(status.as_str().to_string()));
        sql.push_str(" WHERE status = ?1");
    }
    sql.push_str(" ORDER BY created_at DESC");

    let mut stmt = conn.prepare(&sql)?;
    let value_refs: Vec<&dyn rusqlite::types::ToSql> =
        values.iter().map(|v| v.as_ref()).collect();
    let rows = stmt.query_map(value_refs.as_slice(), parse_booking_row)?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row?);
    }
    Ok(bookings)
}

/// All bookings in a closed date range, any status. Callers decide what
/// counts toward capacity.
pub fn get_bookings_in_range(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
) -> rusqlite::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(
        "SELECT id, booking_ref, resource, date, time_slot, purpose,
                requester_id, requester_email, requester_name,
                status, created_at, updated_at, updated_by
         FROM bookings WHERE date >= ?1 AND date <= ?2
         ORDER BY date ASC, time_slot ASC",
    )?;
    let rows = stmt.query_map(
        params![
            start.format(DATE_FMT).to_string(),
            end.format(DATE_FMT).to_string()
        ],
        parse_booking_row,
    )?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row?);
    }
    Ok(bookings)
}

pub struct BookingStats {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
    pub denied: i64,
}

pub fn get_booking_stats(conn: &Connection) -> rusqlite::Result<BookingStats> {
    conn.query_row(
        "SELECT COUNT(*),
                COALESCE(SUM(status = 'pending'), 0),
                COALESCE(SUM(status = 'approved'), 0),
                COALESCE(SUM(status = 'denied'), 0)
         FROM bookings",
        [],
        |row| {
            Ok(BookingStats {
                total: row.get(0)?,
                pending: row.get(1)?,
                approved: row.get(2)?,
                denied: row.get(3)?,
            })
        },
    )
}

fn parse_booking_row(row: &rusqlite::Row) -> rusqlite::Result<Booking> {
    let resource_str: String = row.get(2)?;
    let resource = Resource::parse(&resource_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            rusqlite::types::Type::Text,
            format!("unknown resource: {resource_str}").into(),
        )
    })?;

    let date_str: String = row.get(3)?;
    let date = NaiveDate::parse_from_str(&date_str, DATE_FMT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let slot_str: String = row.get(4)?;
    let time_slot = TimeSlot::parse(&slot_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            rusqlite::types::Type::Text,
            format!("invalid time slot: {slot_str}").into(),
        )
    })?;

    let status_str: String = row.get(9)?;
    let created_at_str: String = row.get(10)?;
    let updated_at_str: String = row.get(11)?;

    let created_at = NaiveDateTime::parse_from_str(&created_at_str, DATETIME_FMT)
        .unwrap_or_else(|_| Utc::now().naive_utc());
    let updated_at = NaiveDateTime::parse_from_str(&updated_at_str, DATETIME_FMT)
        .unwrap_or_else(|_| Utc::now().naive_utc());

    Ok(Booking {
        id: row.get(0)?,
        booking_ref: row.get(1)?,
        resource,
        date,
        time_slot,
        purpose: row.get(5)?,
        requester_id: row.get(6)?,
        requester_email: row.get(7)?,
        requester_name: row.get(8)?,
        status: BookingStatus::parse(&status_str),
        created_at,
        updated_at,
        updated_by: row.get(12)?,
    })
}
