//! Recurring weekly records: working schedules and breaks.
//!
//! Both carry date-less clock times and a numeric weekday. They are anchored
//! to a concrete date by [`crate::availability::OperatingZone::anchor`].

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// Returns the numeric weekday of a date, 0 (Sunday) through 6 (Saturday).
///
/// ```
/// use salon_availability::models::weekday_number;
/// use chrono::NaiveDate;
///
/// // 2024-07-01 is a Monday
/// assert_eq!(weekday_number(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()), 1);
/// // 2024-07-07 is a Sunday
/// assert_eq!(weekday_number(NaiveDate::from_ymd_opt(2024, 7, 7).unwrap()), 0);
/// ```
pub fn weekday_number(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Parses a wall-clock time given as `HH:MM:SS` or `HH:MM`.
pub fn parse_clock_time(field: &str, value: &str) -> EngineResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| EngineError::invalid(field, "invalid time format, use HH:MM:SS or HH:MM"))
}

fn deserialize_clock_time<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_clock_time("time", &raw).map_err(serde::de::Error::custom)
}

fn validate_day_of_week(day_of_week: u8) -> EngineResult<()> {
    if day_of_week > 6 {
        return Err(EngineError::invalid(
            "day_of_week",
            "must be between 0 (Sunday) and 6 (Saturday)",
        ));
    }
    Ok(())
}

fn validate_clock_range(start: NaiveTime, end: NaiveTime) -> EngineResult<()> {
    if start == end {
        return Err(EngineError::invalid(
            "end_time",
            "start_time and end_time cannot be the same",
        ));
    }
    Ok(())
}

/// A standing rule: on this weekday, between these dates, the employee works
/// this clock-time window.
///
/// `end_time` earlier than `start_time` means the shift crosses midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    /// Unique identifier for the schedule row.
    pub id: Uuid,
    /// The employee this schedule belongs to.
    pub employee_id: Uuid,
    /// 0 (Sunday) through 6 (Saturday).
    pub day_of_week: u8,
    /// Clock time the shift starts.
    #[serde(deserialize_with = "deserialize_clock_time")]
    pub start_time: NaiveTime,
    /// Clock time the shift ends.
    #[serde(deserialize_with = "deserialize_clock_time")]
    pub end_time: NaiveTime,
    /// First date the rule applies (inclusive).
    pub valid_from: NaiveDate,
    /// Last date the rule applies (inclusive); unbounded when absent.
    #[serde(default)]
    pub valid_until: Option<NaiveDate>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
}

impl WeeklySchedule {
    /// True if the rule covers `date`: matching weekday and inside the validity window.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.day_of_week == weekday_number(date)
            && self.valid_from <= date
            && self.valid_until.is_none_or(|until| until >= date)
    }

    /// True if the working window ends on the following calendar day.
    pub fn crosses_midnight(&self) -> bool {
        self.end_time < self.start_time
    }

    /// Checks the record-level rules a stored schedule must satisfy.
    pub fn validate(&self) -> EngineResult<()> {
        validate_day_of_week(self.day_of_week)?;
        validate_clock_range(self.start_time, self.end_time)?;
        if self.valid_until.is_some_and(|until| until < self.valid_from) {
            return Err(EngineError::invalid(
                "valid_until",
                "must be after or equal to valid_from",
            ));
        }
        Ok(())
    }
}

/// A break repeating every week on a weekday, for the life of the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringBreak {
    /// Unique identifier for the break.
    pub id: Uuid,
    /// The employee this break belongs to.
    pub employee_id: Uuid,
    /// 0 (Sunday) through 6 (Saturday).
    pub day_of_week: u8,
    /// Clock time the break starts.
    #[serde(deserialize_with = "deserialize_clock_time")]
    pub start_time: NaiveTime,
    /// Clock time the break ends.
    #[serde(deserialize_with = "deserialize_clock_time")]
    pub end_time: NaiveTime,
    /// Why the employee is on break.
    pub reason: String,
}

impl RecurringBreak {
    /// Checks the record-level rules a stored break must satisfy.
    pub fn validate(&self) -> EngineResult<()> {
        validate_day_of_week(self.day_of_week)?;
        validate_clock_range(self.start_time, self.end_time)?;
        if self.reason.trim().is_empty() {
            return Err(EngineError::invalid("reason", "reason is required"));
        }
        Ok(())
    }
}
