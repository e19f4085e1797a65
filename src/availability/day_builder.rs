//! Day availability assembly.
//!
//! Combines a resolved schedule window with the day's one-time blocks and
//! recurring breaks. Blocks always win: a break overlapping a block is
//! trimmed or split around it, or dropped when fully covered.

use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use crate::models::{
    AvailabilityBlock, AvailabilityBreak, DayAvailability, OnetimeBlock, RecurringBreak,
    ReasonedInterval, TimeInterval,
};

use super::OperatingZone;
use super::subtraction::subtract_all;

/// Intersects each block with the schedule window.
///
/// Blocks that miss the window, or whose endpoints are reversed, are dropped.
pub fn clip_blocks(blocks: &[OnetimeBlock], window: &TimeInterval) -> Vec<AvailabilityBlock> {
    blocks
        .iter()
        .filter_map(|block| {
            let clipped = block.interval()?.intersect(window)?;
            Some(ReasonedInterval {
                interval: clipped,
                reason: block.reason.clone(),
            })
        })
        .collect()
}

/// Anchors each recurring break to `date` and intersects it with the window.
pub fn materialize_breaks(
    breaks: &[RecurringBreak],
    date: NaiveDate,
    window: &TimeInterval,
    zone: &OperatingZone,
) -> Vec<AvailabilityBreak> {
    breaks
        .iter()
        .filter_map(|recurring| {
            let anchored = zone.anchor(date, recurring.start_time, recurring.end_time)?;
            let clipped = anchored.intersect(window);
            if clipped.is_none() {
                debug!(break_id = %recurring.id, "Break falls outside schedule window");
            }
            Some(ReasonedInterval {
                interval: clipped?,
                reason: recurring.reason.clone(),
            })
        })
        .collect()
}

/// Trims every break around the blocks that overlap it.
///
/// A break contributes zero, one or two pieces, each keeping the break's
/// reason. Breaks with no conflicting block pass through unchanged.
pub fn resolve_break_conflicts(
    breaks: &[AvailabilityBreak],
    blocks: &[AvailabilityBlock],
) -> Vec<AvailabilityBreak> {
    let mut resolved = Vec::with_capacity(breaks.len());

    for item in breaks {
        let conflicts: Vec<TimeInterval> = blocks
            .iter()
            .map(|block| block.interval)
            .filter(|block| block.overlaps(&item.interval))
            .collect();

        if conflicts.is_empty() {
            resolved.push(item.clone());
            continue;
        }

        resolved.extend(
            subtract_all(&[item.interval], &conflicts)
                .into_iter()
                .map(|interval| ReasonedInterval {
                    interval,
                    reason: item.reason.clone(),
                }),
        );
    }

    resolved
}

/// Builds the day view from already-fetched inputs.
///
/// Pure: the same inputs always produce the same output.
pub fn assemble_day_availability(
    employee_id: Uuid,
    date: NaiveDate,
    window: TimeInterval,
    blocks: &[OnetimeBlock],
    breaks: &[RecurringBreak],
    zone: &OperatingZone,
) -> DayAvailability {
    let onetime_blocks = clip_blocks(blocks, &window);
    let materialized = materialize_breaks(breaks, date, &window, zone);
    let breaks = resolve_break_conflicts(&materialized, &onetime_blocks);

    debug!(
        employee_id = %employee_id,
        %date,
        blocks = onetime_blocks.len(),
        breaks_before = materialized.len(),
        breaks_after = breaks.len(),
        "Resolved break conflicts"
    );

    DayAvailability {
        date,
        employee_id,
        schedule: window,
        onetime_blocks,
        breaks,
    }
}
