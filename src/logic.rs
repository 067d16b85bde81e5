/*
Trip log generation logic.
Module was independently written from HTTP / Axum for testing
*/


use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone};
use uuid::Uuid;

use crate::models::{DutyStatus, Entry, LogSheet, Trip, ValidationError};


// Fixed single-day duty plan: (status, start hour, end hour, note).
// Placeholder until a map API supplies real route times; the four spans
// always cover the full 24-hour day.
const DAY_ONE_PLAN: [(DutyStatus, u32, u32, Option<&str>); 4] = [
    (DutyStatus::OffDuty, 0, 6, None),
    (DutyStatus::Driving, 6, 16, None),
    (DutyStatus::OnDuty, 16, 18, Some("pickup & dropoff")),
    (DutyStatus::OffDuty, 18, 24, None),
];

// Build a timestamp at `hour`:00 on `date`.
// Hour 24 means midnight at the end of the day.
fn clock(date: NaiveDate, hour: u32, offset: FixedOffset) -> DateTime<FixedOffset> {
    let (day, hour) = if hour == 24 {
        (date + Duration::days(1), 0)
    } else {
        (date, hour)
    };
    let naive = day.and_hms_opt(hour, 0, 0).unwrap();
    offset.from_local_datetime(&naive).unwrap()
}

/// Seed a newly created trip with its first day's log sheet.
///
/// The plan is fixed rather than computed from the route: 10 hours of
/// driving, an hour each for pickup and dropoff, and the rest of the day
/// off duty. Every entry is appended through the sheet's own mutation API,
/// so the stored hour totals are whatever its recompute derives, including
/// the cycle hours left, which accounts for the trip's declared usage.
///
/// Fails when `trip.current_cycle_used` is outside `0..=70`.
pub fn generate_logs(
    trip: &Trip,
    date: NaiveDate,
    offset: FixedOffset,
) -> Result<LogSheet, ValidationError> {
    let mut sheet = LogSheet::new(date, trip.current_cycle_used)?;

    for (status, start_hour, end_hour, note) in DAY_ONE_PLAN {
        sheet.add_entry(Entry {
            id: Uuid::new_v4(),
            status,
            start_time: clock(date, start_hour, offset),
            end_time: clock(date, end_hour, offset),
            note: note.map(str::to_string),
            location: None,
            remarks: None,
        })?;
    }

    Ok(sheet)
}
