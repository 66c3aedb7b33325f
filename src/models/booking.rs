use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::{Resource, TimeSlot};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    /// Storage key, assigned at creation.
    pub id: String,
    /// Human-readable reference (`BK-...`), for display and search only.
    pub booking_ref: String,
    pub resource: Resource,
    pub date: NaiveDate,
    pub time_slot: TimeSlot,
    pub purpose: String,
    pub requester_id: String,
    pub requester_email: String,
    pub requester_name: String,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    /// Identity of the last administrative actor, if any.
    pub updated_by: Option<String>,
}

impl Booking {
    /// A booking counts against slot capacity unless it was cancelled.
    pub fn counts_against_capacity(&self) -> bool {
        self.status != BookingStatus::Cancelled
    }

    /// Status as shown to users: active bookings whose date has passed
    /// display as completed. Never written back to the store.
    pub fn display_status(&self, today: NaiveDate) -> BookingStatus {
        match self.status {
            BookingStatus::Pending | BookingStatus::Approved | BookingStatus::Confirmed
                if self.date < today =>
            {
                BookingStatus::Completed
            }
            status => status,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Approved,
    Confirmed,
    Denied,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Approved => "approved",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Denied => "denied",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }

    /// Lossy parse for stored rows: legacy rows without a status are pending.
    pub fn parse(s: &str) -> Self {
        Self::from_param(s).unwrap_or(BookingStatus::Pending)
    }

    /// Strict parse for request input.
    pub fn from_param(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BookingStatus::Pending),
            "approved" => Some(BookingStatus::Approved),
            "confirmed" => Some(BookingStatus::Confirmed),
            "denied" => Some(BookingStatus::Denied),
            "cancelled" => Some(BookingStatus::Cancelled),
            "completed" => Some(BookingStatus::Completed),
            _ => None,
        }
    }

    /// The administrative transition table: only a pending booking can be
    /// adjudicated, and only to approved or denied. Cancellation goes
    /// through its own owner-checked path.
    pub fn admin_transition_allowed(&self, to: BookingStatus) -> bool {
        matches!(
            (self, to),
            (BookingStatus::Pending, BookingStatus::Approved)
                | (BookingStatus::Pending, BookingStatus::Denied)
        )
    }
}
