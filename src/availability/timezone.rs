//! The operating timezone and every date-to-instant conversion the engine makes.
//!
//! A single policy applies everywhere: prefer a named zone from the tz
//! database, fall back to a fixed UTC offset only when the name is unknown.

use chrono::{
    DateTime, Duration, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    TimeZone, Utc,
};
use chrono_tz::Tz;
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::TimeInterval;

/// The timezone that defines "a day" for schedules, breaks and windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatingZone {
    /// A zone from the tz database.
    Named(Tz),
    /// A fixed offset, used only when the named zone is unavailable.
    Fixed(FixedOffset),
}

impl OperatingZone {
    /// UTC, mostly useful in tests.
    pub fn utc() -> Self {
        OperatingZone::Named(Tz::UTC)
    }

    /// Resolves a zone name, falling back to `fallback_offset_minutes` east of UTC.
    ///
    /// ```
    /// use salon_availability::availability::OperatingZone;
    ///
    /// let zone = OperatingZone::resolve("Asia/Colombo", 330).unwrap();
    /// assert_eq!(zone.name(), "Asia/Colombo");
    ///
    /// let fallback = OperatingZone::resolve("Mars/Olympus", 330).unwrap();
    /// assert_eq!(fallback.name(), "+05:30");
    /// ```
    pub fn resolve(name: &str, fallback_offset_minutes: i32) -> EngineResult<Self> {
        if let Ok(tz) = name.parse::<Tz>() {
            return Ok(OperatingZone::Named(tz));
        }

        let offset = fallback_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| EngineError::InvalidTimezone {
                name: name.to_string(),
                message: format!(
                    "unknown zone and fallback offset of {fallback_offset_minutes} minutes is out of range"
                ),
            })?;

        warn!(
            timezone = %name,
            offset = %offset,
            "Timezone not found in database, using fixed offset"
        );
        Ok(OperatingZone::Fixed(offset))
    }

    /// The zone name, or the offset for fixed zones.
    pub fn name(&self) -> String {
        match self {
            OperatingZone::Named(tz) => tz.name().to_string(),
            OperatingZone::Fixed(offset) => offset.to_string(),
        }
    }

    /// Converts a local wall-clock time on `date` to an instant.
    ///
    /// Ambiguous times take the earlier instant. Times skipped by a
    /// spring-forward transition are read with the pre-transition offset,
    /// which moves them forward by the size of the gap.
    pub fn at(&self, date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
        let naive = date.and_time(time);
        match self {
            OperatingZone::Named(tz) => localize(tz, naive),
            OperatingZone::Fixed(offset) => localize(offset, naive),
        }
    }

    /// Anchors a clock range to `date`.
    ///
    /// An `end` earlier than `start` lands on the following day. Equal
    /// clock times produce no interval.
    pub fn anchor(&self, date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Option<TimeInterval> {
        let end_date = if end < start { date.succ_opt()? } else { date };
        TimeInterval::try_new(self.at(date, start), self.at(end_date, end))
    }

    /// `[00:00 on date, 00:00 on the next date)` as instants.
    pub fn day_bounds(&self, date: NaiveDate) -> TimeInterval {
        let start = self.at(date, NaiveTime::MIN);
        let end = date
            .succ_opt()
            .map(|next| self.at(next, NaiveTime::MIN))
            .unwrap_or(start);
        TimeInterval { start, end }
    }

    /// The local calendar date an instant falls on.
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        match self {
            OperatingZone::Named(tz) => instant.with_timezone(tz).date_naive(),
            OperatingZone::Fixed(offset) => instant.with_timezone(offset).date_naive(),
        }
    }

    /// Local `HH:MM`.
    pub fn format_clock(&self, instant: DateTime<Utc>) -> String {
        match self {
            OperatingZone::Named(tz) => instant.with_timezone(tz).format("%H:%M").to_string(),
            OperatingZone::Fixed(offset) => {
                instant.with_timezone(offset).format("%H:%M").to_string()
            }
        }
    }

    /// RFC 3339 with the local offset.
    pub fn format_timestamp(&self, instant: DateTime<Utc>) -> String {
        match self {
            OperatingZone::Named(tz) => instant.with_timezone(tz).to_rfc3339(),
            OperatingZone::Fixed(offset) => instant.with_timezone(offset).to_rfc3339(),
        }
    }
}

fn localize<Z: TimeZone>(zone: &Z, naive: NaiveDateTime) -> DateTime<Utc> {
    match zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            // Gaps are at most a few hours wide.
            let before = naive - Duration::hours(3);
            let offset_seconds = zone
                .offset_from_local_datetime(&before)
                .earliest()
                .map(|offset| offset.fix().local_minus_utc())
                .unwrap_or_else(|| zone.offset_from_utc_datetime(&naive).fix().local_minus_utc());
            Utc.from_utc_datetime(&(naive - Duration::seconds(i64::from(offset_seconds))))
        }
    }
}
