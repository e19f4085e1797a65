//! Absolute-dated unavailability: one-time blocks and already-booked slots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

use super::TimeInterval;

fn validate_range(start: DateTime<Utc>, end: DateTime<Utc>) -> EngineResult<()> {
    if end <= start {
        return Err(EngineError::invalid(
            "end_date_time",
            "end_date_time must be after start_date_time",
        ));
    }
    Ok(())
}

/// A specific, non-recurring period when an employee is unavailable.
///
/// Blocks may span several days (leave, training) and always take
/// priority over recurring breaks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnetimeBlock {
    /// Unique identifier for the block.
    pub id: Uuid,
    /// The employee this block belongs to.
    pub employee_id: Uuid,
    /// When the block starts.
    pub start_date_time: DateTime<Utc>,
    /// When the block ends.
    pub end_date_time: DateTime<Utc>,
    /// Why the employee is unavailable.
    pub reason: String,
}

impl OnetimeBlock {
    /// The block as an interval, or `None` if its endpoints are reversed.
    pub fn interval(&self) -> Option<TimeInterval> {
        TimeInterval::try_new(self.start_date_time, self.end_date_time)
    }

    /// Checks the record-level rules a stored block must satisfy.
    pub fn validate(&self) -> EngineResult<()> {
        validate_range(self.start_date_time, self.end_date_time)?;
        if self.reason.trim().is_empty() {
            return Err(EngineError::invalid("reason", "reason is required"));
        }
        Ok(())
    }
}

/// Work already committed to a customer, owned by the booking side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedSlot {
    /// Unique identifier for the slot.
    pub id: Uuid,
    /// The employee assigned to the slot.
    pub employee_id: Uuid,
    /// When the service starts.
    pub start_date_time: DateTime<Utc>,
    /// When the service ends.
    pub end_date_time: DateTime<Utc>,
    /// The service being performed.
    pub service_id: Uuid,
}

impl BookedSlot {
    /// The slot as an interval, or `None` if its endpoints are reversed.
    pub fn interval(&self) -> Option<TimeInterval> {
        TimeInterval::try_new(self.start_date_time, self.end_date_time)
    }

    /// Checks the record-level rules a stored slot must satisfy.
    pub fn validate(&self) -> EngineResult<()> {
        validate_range(self.start_date_time, self.end_date_time)
    }
}
