//! The half-open time interval every availability computation is built from.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A half-open range of instants, `[start, end)`.
///
/// Intervals are only meaningful when `start < end`. Engine outputs never
/// contain an invalid interval; [`TimeInterval::try_new`] is the usual way
/// to construct one from computed endpoints.
///
/// # Example
///
/// ```
/// use salon_availability::models::TimeInterval;
/// use chrono::{TimeZone, Utc};
///
/// let morning = TimeInterval::try_new(
///     Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap(),
/// ).unwrap();
/// let lunch = TimeInterval::try_new(
///     Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2024, 7, 1, 13, 0, 0).unwrap(),
/// ).unwrap();
///
/// // Touching endpoints do not overlap.
/// assert!(!morning.overlaps(&lunch));
/// assert!(morning.intersect(&lunch).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeInterval {
    /// Inclusive start.
    #[serde(rename = "start_time")]
    pub start: DateTime<Utc>,
    /// Exclusive end.
    #[serde(rename = "end_time")]
    pub end: DateTime<Utc>,
}

impl TimeInterval {
    /// Builds an interval, returning `None` unless `start < end`.
    pub fn try_new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        let interval = TimeInterval { start, end };
        interval.is_valid().then_some(interval)
    }

    /// True iff `start < end`.
    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    /// True iff the two intervals share at least one instant.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// The common part of two intervals, if it is non-empty.
    pub fn intersect(&self, other: &TimeInterval) -> Option<TimeInterval> {
        if !self.overlaps(other) {
            return None;
        }
        TimeInterval::try_new(self.start.max(other.start), self.end.min(other.end))
    }

    /// True if `other` lies entirely within `self`.
    pub fn contains(&self, other: &TimeInterval) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// True if the instant falls in `[start, end)`.
    pub fn contains_instant(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Length in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Length in hours as a Decimal.
    ///
    /// ```
    /// use salon_availability::models::TimeInterval;
    /// use chrono::{TimeZone, Utc};
    /// use rust_decimal::Decimal;
    ///
    /// let slot = TimeInterval::try_new(
    ///     Utc.with_ymd_and_hms(2024, 7, 1, 10, 0, 0).unwrap(),
    ///     Utc.with_ymd_and_hms(2024, 7, 1, 11, 30, 0).unwrap(),
    /// ).unwrap();
    /// assert_eq!(slot.hours(), Decimal::new(15, 1));
    /// ```
    pub fn hours(&self) -> Decimal {
        Decimal::new(self.duration_minutes(), 0) / Decimal::new(60, 0)
    }
}
