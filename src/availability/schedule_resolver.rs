//! Schedule resolution: which weekly rule applies on a date.

use chrono::NaiveDate;

use crate::models::{TimeInterval, WeeklySchedule};

use super::OperatingZone;

/// Picks the single schedule row that governs `date`.
///
/// Rows that do not cover the date are ignored, even if the store returned
/// them. Among the rest the most recently started rule (latest
/// `valid_from`) wins; exact ties go to the lowest id so the choice is stable.
///
/// # Example
///
/// ```
/// use salon_availability::availability::select_active_schedule;
/// use salon_availability::models::WeeklySchedule;
/// use chrono::{NaiveDate, NaiveTime};
/// use uuid::Uuid;
///
/// let row = |valid_from: &str| WeeklySchedule {
///     id: Uuid::new_v4(),
///     employee_id: Uuid::nil(),
///     day_of_week: 1,
///     start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     valid_from: valid_from.parse().unwrap(),
///     valid_until: None,
///     notes: String::new(),
/// };
///
/// let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(); // Monday
/// let rows = [row("2024-01-01"), row("2024-06-01")];
/// let picked = select_active_schedule(&rows, date).unwrap();
/// assert_eq!(picked.valid_from, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
/// ```
pub fn select_active_schedule(rows: &[WeeklySchedule], date: NaiveDate) -> Option<&WeeklySchedule> {
    rows.iter()
        .filter(|row| row.is_active_on(date))
        .max_by(|a, b| {
            a.valid_from
                .cmp(&b.valid_from)
                .then_with(|| b.id.cmp(&a.id))
        })
}

/// The schedule's working window anchored to `date`.
///
/// Midnight-crossing schedules end on the following day.
pub fn schedule_window(
    schedule: &WeeklySchedule,
    date: NaiveDate,
    zone: &OperatingZone,
) -> Option<TimeInterval> {
    zone.anchor(date, schedule.start_time, schedule.end_time)
}
