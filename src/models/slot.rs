use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of bookable one-hour slots per day.
pub const TOTAL_SLOTS: u32 = 8;

const FIRST_HOUR: u32 = 9;
const LAST_HOUR: u32 = FIRST_HOUR + TOTAL_SLOTS - 1;

/// One of the eight fixed one-hour slots between 09:00 and 17:00,
/// serialized as "HH:MM-HH:MM". Arbitrary intervals are not representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSlot {
    start_hour: u32,
}

impl TimeSlot {
    /// All slots in grid order.
    pub fn all() -> impl Iterator<Item = TimeSlot> {
        (FIRST_HOUR..=LAST_HOUR).map(|start_hour| TimeSlot { start_hour })
    }

    /// Parse "HH:MM-HH:MM", accepting only slots on the fixed grid:
    /// on-the-hour start between 09:00 and 16:00, exactly one hour long.
    pub fn parse(s: &str) -> Option<Self> {
        let (start, end) = s.split_once('-')?;
        let start_hour = parse_on_the_hour(start)?;
        let end_hour = parse_on_the_hour(end)?;
        if start_hour < FIRST_HOUR || start_hour > LAST_HOUR || end_hour != start_hour + 1 {
            return None;
        }
        Some(TimeSlot { start_hour })
    }

    /// 12-hour form for display, e.g. "9:00 AM - 10:00 AM".
    pub fn display(&self) -> String {
        format!(
            "{} - {}",
            format_12h(self.start_hour),
            format_12h(self.start_hour + 1)
        )
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:00-{:02}:00",
            self.start_hour,
            self.start_hour + 1
        )
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        TimeSlot::parse(&s).ok_or_else(|| format!("invalid time slot: {s}"))
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> String {
        slot.to_string()
    }
}

fn parse_on_the_hour(s: &str) -> Option<u32> {
    let (hour, minute) = s.split_once(':')?;
    if minute != "00" {
        return None;
    }
    let hour: u32 = hour.parse().ok()?;
    if hour > 23 {
        return None;
    }
    Some(hour)
}

fn format_12h(hour: u32) -> String {
    let period = if hour >= 12 { "PM" } else { "AM" };
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{hour12}:00 {period}")
}
