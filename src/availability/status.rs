//! Point-in-time employee status: serving, idle or out.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{BookedSlot, OnetimeBlock, StatusReport, TimeInterval};

/// Where an employee stands at an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DutyState {
    /// A booked slot is in progress.
    Serving,
    /// On duty with nothing booked.
    Idle,
    /// Not on duty.
    Out,
}

/// A schedule window together with the breaks anchored to the same date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shift {
    /// The working window.
    pub window: TimeInterval,
    /// Breaks for the window's weekday.
    pub breaks: Vec<TimeInterval>,
}

impl Shift {
    /// True when `at` is inside the window and outside every break.
    pub fn covers(&self, at: DateTime<Utc>) -> bool {
        self.window.contains_instant(at) && !self.breaks.iter().any(|b| b.contains_instant(at))
    }
}

/// Classifies one employee at `at`.
///
/// `shifts` are the candidate windows (today's and, for midnight-crossing
/// rules, yesterday's).
pub fn classify(
    at: DateTime<Utc>,
    shifts: &[Shift],
    blocks: &[OnetimeBlock],
    booked: &[BookedSlot],
) -> DutyState {
    let serving = booked
        .iter()
        .filter_map(BookedSlot::interval)
        .any(|slot| slot.contains_instant(at));
    if serving {
        return DutyState::Serving;
    }

    let blocked = blocks
        .iter()
        .filter_map(OnetimeBlock::interval)
        .any(|block| block.contains_instant(at));
    let on_duty = !blocked && shifts.iter().any(|shift| shift.covers(at));

    if on_duty {
        DutyState::Idle
    } else {
        DutyState::Out
    }
}

/// Sorts classified employees into a report, each list ascending by id.
pub fn tally(states: impl IntoIterator<Item = (Uuid, DutyState)>) -> StatusReport {
    let mut report = StatusReport::default();
    for (employee_id, state) in states {
        match state {
            DutyState::Serving => report.serving.push(employee_id),
            DutyState::Idle => report.idle.push(employee_id),
            DutyState::Out => report.out.push(employee_id),
        }
    }
    report.serving.sort();
    report.idle.sort();
    report.out.sort();
    report
}
