//! Boundary request types.
//!
//! Raw string inputs are validated here, before anything reaches the engine.
//! Each request type converts into typed, checked values or fails with
//! [`EngineError::InvalidInput`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::availability::OperatingZone;
use crate::error::{EngineError, EngineResult};

use super::TimeInterval;

fn required<'a>(field: &str, value: &'a str) -> EngineResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::invalid(field, format!("{field} is required")));
    }
    Ok(trimmed)
}

fn parse_uuid(field: &str, value: &str) -> EngineResult<Uuid> {
    Uuid::parse_str(required(field, value)?)
        .map_err(|_| EngineError::invalid(field, "invalid UUID format"))
}

fn parse_instant(field: &str, value: &str) -> EngineResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(required(field, value)?)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            EngineError::invalid(
                field,
                "invalid format, use RFC 3339 (e.g., 2024-07-01T10:00:00+05:30)",
            )
        })
}

/// Request for one employee's day view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayAvailabilityRequest {
    /// Employee UUID.
    pub employee_id: String,
    /// `YYYY-MM-DD`, or an RFC 3339 timestamp whose local date is used.
    pub date: String,
}

impl DayAvailabilityRequest {
    /// Validates the request into an employee id and a local date.
    ///
    /// ```
    /// use salon_availability::availability::OperatingZone;
    /// use salon_availability::models::DayAvailabilityRequest;
    /// use chrono::NaiveDate;
    ///
    /// let request = DayAvailabilityRequest {
    ///     employee_id: "00000000-0000-0000-0000-000000000001".to_string(),
    ///     date: "2024-07-01".to_string(),
    /// };
    /// let (_, date) = request.validate(&OperatingZone::utc()).unwrap();
    /// assert_eq!(date, NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
    /// ```
    pub fn validate(&self, zone: &OperatingZone) -> EngineResult<(Uuid, NaiveDate)> {
        let employee_id = parse_uuid("employee_id", &self.employee_id)?;
        let raw = required("date", &self.date)?;

        let date = if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            date
        } else if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
            zone.date_of(instant.with_timezone(&Utc))
        } else {
            return Err(EngineError::invalid(
                "date",
                "invalid date format, use YYYY-MM-DD or an RFC 3339 timestamp",
            ));
        };

        Ok((employee_id, date))
    }
}

/// Request to find employees free inside a window for some services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotMatchRequest {
    /// Service UUIDs; at least one.
    pub service_ids: Vec<String>,
    /// Window start, RFC 3339.
    pub start_time: String,
    /// Window end, RFC 3339.
    pub end_time: String,
}

/// A validated [`SlotMatchRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotQuery {
    /// Distinct service ids in request order.
    pub service_ids: Vec<Uuid>,
    /// The requested window.
    pub window: TimeInterval,
    /// The local date the window falls on.
    pub date: NaiveDate,
}

impl SlotMatchRequest {
    /// Validates ids and the window.
    ///
    /// The window must be non-empty and start and end on the same local date;
    /// a window ending exactly at the next midnight counts as crossing it.
    pub fn validate(&self, zone: &OperatingZone) -> EngineResult<SlotQuery> {
        let mut service_ids = Vec::with_capacity(self.service_ids.len());
        for raw in &self.service_ids {
            let id = parse_uuid("service_ids", raw)?;
            if !service_ids.contains(&id) {
                service_ids.push(id);
            }
        }

        let start = parse_instant("start_time", &self.start_time)?;
        let end = parse_instant("end_time", &self.end_time)?;
        let window = TimeInterval::try_new(start, end)
            .ok_or_else(|| EngineError::invalid("end_time", "end_time must be after start_time"))?;

        SlotQuery::new(service_ids, window, zone)
    }
}

impl SlotQuery {
    /// Builds a query for `window`, deriving its local date.
    ///
    /// Fails when no service is given or the window does not start and end
    /// on the same local date.
    pub fn new(service_ids: Vec<Uuid>, window: TimeInterval, zone: &OperatingZone) -> EngineResult<Self> {
        if service_ids.is_empty() {
            return Err(EngineError::invalid(
                "service_ids",
                "service_ids cannot be empty",
            ));
        }
        let query = SlotQuery {
            service_ids,
            window,
            date: zone.date_of(window.start),
        };
        query.check(zone)?;
        Ok(query)
    }

    /// Re-checks a query that may have been assembled by hand.
    ///
    /// The window must be non-empty, sit on one local date, and that date
    /// must be `date`.
    pub fn check(&self, zone: &OperatingZone) -> EngineResult<()> {
        if !self.window.is_valid() {
            return Err(EngineError::invalid("end_time", "end_time must be after start_time"));
        }
        let start_date = zone.date_of(self.window.start);
        if zone.date_of(self.window.end) != start_date {
            return Err(EngineError::invalid(
                "end_time",
                "window must start and end on the same date",
            ));
        }
        if self.date != start_date {
            return Err(EngineError::invalid(
                "date",
                format!("window falls on {start_date}, not {}", self.date),
            ));
        }
        Ok(())
    }
}
