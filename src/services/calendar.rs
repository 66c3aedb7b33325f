use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::{Booking, DayAvailability};
use crate::services::availability;

/// One day of the displayed month. `is_today` and `is_selected` are
/// presentation state carried through from the request, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub availability: DayAvailability,
    pub is_today: bool,
    pub is_selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub days: Vec<DayCell>,
}

/// First and last day of a calendar month, for the range fetch.
pub fn month_range(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = first.with_day(days_in_month(year, month)?)?;
    Some((first, last))
}

/// Summarize one displayed month from the bookings whose date falls in
/// it. All inputs are explicit; callers re-fetch the month range and
/// rebuild the view after navigation or any successful mutation.
pub fn month_view(
    year: i32,
    month: u32,
    bookings: &[Booking],
    maintenance_days: &[u32],
    today: NaiveDate,
    selected: Option<NaiveDate>,
) -> Option<MonthView> {
    let day_count = days_in_month(year, month)?;

    let mut active_per_day: HashMap<NaiveDate, u32> = HashMap::new();
    for booking in bookings.iter().filter(|b| b.counts_against_capacity()) {
        *active_per_day.entry(booking.date).or_insert(0) += 1;
    }

    let mut days = Vec::with_capacity(day_count as usize);
    for day in 1..=day_count {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let active = active_per_day.get(&date).copied().unwrap_or(0);
        days.push(DayCell {
            date,
            availability: availability::day_availability(date, active, maintenance_days),
            is_today: date == today,
            is_selected: selected == Some(date),
        });
    }

    Some(MonthView { year, month, days })
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }?;
    Some(next_first.pred_opt()?.day())
}
