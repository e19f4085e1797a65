//! Multi-employee slot matching.
//!
//! Given a request window on one local date, finds the employees who can
//! perform at least one requested service and are free for some part of the
//! window. A one-time block anywhere in the window vetoes the employee
//! outright; breaks and booked slots are subtracted from the schedule.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{BookedSlot, EmployeeMatch, OnetimeBlock, RecurringBreak, TimeInterval};

use super::OperatingZone;
use super::subtraction::{clip_to, subtract_all};

/// Builds the employee to services map for a request.
///
/// `qualified` pairs each requested service with the employees able to
/// perform it, in request order. Each employee's services keep that order
/// and appear once.
pub fn group_capabilities(qualified: &[(Uuid, Vec<Uuid>)]) -> BTreeMap<Uuid, Vec<Uuid>> {
    let mut candidates: BTreeMap<Uuid, Vec<Uuid>> = BTreeMap::new();
    for (service_id, employees) in qualified {
        for employee_id in employees {
            let services = candidates.entry(*employee_id).or_default();
            if !services.contains(service_id) {
                services.push(*service_id);
            }
        }
    }
    candidates
}

/// Returns the first block that overlaps the window, if any.
pub fn vetoing_block<'a>(
    blocks: &'a [OnetimeBlock],
    window: &TimeInterval,
) -> Option<&'a OnetimeBlock> {
    blocks.iter().find(|block| {
        block
            .interval()
            .is_some_and(|interval| interval.overlaps(window))
    })
}

/// Free time inside `window` for one employee.
///
/// Breaks are anchored to `date` and subtracted from the schedule window,
/// then booked slots, then the remainder is clipped to the request window.
/// The result is sorted by start.
pub fn free_slots(
    schedule_window: TimeInterval,
    breaks: &[RecurringBreak],
    booked: &[BookedSlot],
    date: NaiveDate,
    window: &TimeInterval,
    zone: &OperatingZone,
) -> Vec<TimeInterval> {
    let removals: Vec<TimeInterval> = breaks
        .iter()
        .filter_map(|b| zone.anchor(date, b.start_time, b.end_time))
        .chain(booked.iter().filter_map(BookedSlot::interval))
        .collect();

    let remaining = subtract_all(&[schedule_window], &removals);
    let mut slots = clip_to(&remaining, window);
    slots.sort();
    slots
}

/// Wraps a candidate's free slots into a match, or `None` when they are empty.
pub fn into_match(
    employee_id: Uuid,
    service_ids: Vec<Uuid>,
    free_slots: Vec<TimeInterval>,
) -> Option<EmployeeMatch> {
    if free_slots.is_empty() {
        return None;
    }
    Some(EmployeeMatch {
        employee_id,
        service_ids,
        free_slots,
    })
}
