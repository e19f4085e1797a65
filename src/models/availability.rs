//! Result records returned by the engine and their serialized forms.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::availability::{OperatingZone, subtract_all};

use super::TimeInterval;

/// An interval tagged with the reason the employee is unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasonedInterval {
    /// The unavailable period.
    #[serde(flatten)]
    pub interval: TimeInterval,
    /// Copied from the originating block or break.
    pub reason: String,
}

/// A one-time block clipped to the schedule window.
pub type AvailabilityBlock = ReasonedInterval;

/// A recurring break after conflict resolution against one-time blocks.
pub type AvailabilityBreak = ReasonedInterval;

/// The structured view of one employee's day.
///
/// Every interval in `onetime_blocks` and `breaks` lies inside `schedule`,
/// and no break overlaps a block. Empty lists serialize as `[]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    /// The requested date.
    pub date: NaiveDate,
    /// The employee.
    pub employee_id: Uuid,
    /// The active schedule anchored to `date`.
    pub schedule: TimeInterval,
    /// One-time blocks intersected with the schedule window.
    pub onetime_blocks: Vec<AvailabilityBlock>,
    /// Recurring breaks, trimmed around one-time blocks.
    pub breaks: Vec<AvailabilityBreak>,
}

impl DayAvailability {
    /// The schedule window minus every block and break.
    pub fn free_intervals(&self) -> Vec<TimeInterval> {
        let busy: Vec<TimeInterval> = self
            .onetime_blocks
            .iter()
            .chain(self.breaks.iter())
            .map(|r| r.interval)
            .collect();
        let mut free = subtract_all(&[self.schedule], &busy);
        free.sort();
        free
    }
}

/// How matched slots are rendered for callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotFormat {
    /// Legacy `"HH:MM-HH:MM"` strings in the operating zone.
    Clock,
    /// RFC 3339 `{start, end}` pairs carrying the operating zone's offset.
    #[default]
    Timestamp,
}

/// A single rendered slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormattedSlot {
    /// `"10:00-10:30"`.
    Clock(String),
    /// Full timestamps.
    Timestamp {
        /// Slot start, RFC 3339.
        start: String,
        /// Slot end, RFC 3339.
        end: String,
    },
}

impl FormattedSlot {
    /// Renders `interval` in the requested format.
    pub fn render(interval: &TimeInterval, zone: &OperatingZone, format: SlotFormat) -> Self {
        match format {
            SlotFormat::Clock => FormattedSlot::Clock(format!(
                "{}-{}",
                zone.format_clock(interval.start),
                zone.format_clock(interval.end)
            )),
            SlotFormat::Timestamp => FormattedSlot::Timestamp {
                start: zone.format_timestamp(interval.start),
                end: zone.format_timestamp(interval.end),
            },
        }
    }
}

/// An employee who can take at least part of a requested window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeMatch {
    /// The employee.
    pub employee_id: Uuid,
    /// The requested services this employee can perform, in request order.
    pub service_ids: Vec<Uuid>,
    /// Free intervals inside the requested window, ascending. Never empty.
    pub free_slots: Vec<TimeInterval>,
}

impl EmployeeMatch {
    /// Total free minutes across all slots.
    pub fn free_minutes(&self) -> i64 {
        self.free_slots.iter().map(TimeInterval::duration_minutes).sum()
    }

    /// Total free time in hours.
    pub fn free_hours(&self) -> Decimal {
        self.free_slots.iter().map(TimeInterval::hours).sum()
    }

    /// Renders the match for a caller that asked for `format`.
    pub fn formatted(&self, zone: &OperatingZone, format: SlotFormat) -> FormattedMatch {
        FormattedMatch {
            staff_id: self.employee_id.to_string(),
            service_ids: self.service_ids.iter().map(Uuid::to_string).collect(),
            availability: self
                .free_slots
                .iter()
                .map(|slot| FormattedSlot::render(slot, zone, format))
                .collect(),
        }
    }
}

/// The serialized form of an [`EmployeeMatch`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedMatch {
    /// Employee id.
    pub staff_id: String,
    /// Service ids, in request order.
    pub service_ids: Vec<String>,
    /// Rendered slots.
    pub availability: Vec<FormattedSlot>,
}

/// Who is serving, idle or out at an instant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    /// Employees with a booked slot in progress.
    pub serving: Vec<Uuid>,
    /// On duty with nothing booked.
    pub idle: Vec<Uuid>,
    /// Active employees not currently on duty.
    pub out: Vec<Uuid>,
}
