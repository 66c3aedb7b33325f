use serde::{Deserialize, Serialize};

/// Aggregate availability of a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    pub status: DayStatus,
    pub available_slots: u32,
    pub total_slots: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Available,
    Booked,
    Maintenance,
}

impl DayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayStatus::Available => "available",
            DayStatus::Booked => "booked",
            DayStatus::Maintenance => "maintenance",
        }
    }
}
