//! Interval subtraction.
//!
//! This is the one place the engine removes time from time. Breaks, blocks
//! and booked slots are all taken out of availability through these two
//! functions, with half-open semantics: an interval touching a removal at an
//! endpoint is kept whole.

use crate::models::TimeInterval;

/// Removes `remove` from every interval in `available`.
///
/// Each input interval yields zero, one or two output intervals:
///
/// - no overlap: kept unchanged
/// - covered entirely: dropped
/// - left edge covered: `[remove.end, s.end)` kept
/// - right edge covered: `[s.start, remove.start)` kept
/// - `remove` strictly inside: split in two
///
/// Zero-length pieces are never emitted.
///
/// # Example
///
/// ```
/// use salon_availability::availability::subtract;
/// use salon_availability::models::TimeInterval;
/// use chrono::{TimeZone, Utc};
///
/// let at = |h, m| Utc.with_ymd_and_hms(2024, 7, 1, h, m, 0).unwrap();
/// let shift = TimeInterval::try_new(at(9, 0), at(17, 0)).unwrap();
/// let lunch = TimeInterval::try_new(at(12, 0), at(13, 0)).unwrap();
///
/// let free = subtract(&[shift], &lunch);
/// assert_eq!(free, vec![
///     TimeInterval::try_new(at(9, 0), at(12, 0)).unwrap(),
///     TimeInterval::try_new(at(13, 0), at(17, 0)).unwrap(),
/// ]);
/// ```
pub fn subtract(available: &[TimeInterval], remove: &TimeInterval) -> Vec<TimeInterval> {
    let mut result = Vec::with_capacity(available.len() + 1);

    for s in available {
        if s.end <= remove.start || s.start >= remove.end {
            result.push(*s);
            continue;
        }

        if remove.start <= s.start {
            // Covers the left edge, possibly all of it.
            if remove.end < s.end {
                result.extend(TimeInterval::try_new(remove.end, s.end));
            }
        } else if remove.end >= s.end {
            result.extend(TimeInterval::try_new(s.start, remove.start));
        } else {
            result.extend(TimeInterval::try_new(s.start, remove.start));
            result.extend(TimeInterval::try_new(remove.end, s.end));
        }
    }

    result
}

/// Removes every interval in `removals` from `available`, one at a time.
///
/// The result does not depend on the order of `removals`.
pub fn subtract_all(available: &[TimeInterval], removals: &[TimeInterval]) -> Vec<TimeInterval> {
    removals
        .iter()
        .fold(available.to_vec(), |remaining, remove| {
            subtract(&remaining, remove)
        })
}

/// Intersects every interval with `window`, keeping non-empty results.
pub fn clip_to(intervals: &[TimeInterval], window: &TimeInterval) -> Vec<TimeInterval> {
    intervals
        .iter()
        .filter_map(|interval| interval.intersect(window))
        .collect()
}
