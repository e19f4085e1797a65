//! Core data models for the availability engine.
//!
//! Input records (schedules, breaks, blocks, booked slots) are read-only
//! snapshots supplied by the store. Result records are built fresh for
//! every computation.

mod availability;
mod block;
mod employee;
mod interval;
mod request;
mod schedule;

pub use availability::{
    AvailabilityBlock, AvailabilityBreak, DayAvailability, EmployeeMatch, FormattedMatch,
    FormattedSlot, ReasonedInterval, SlotFormat, StatusReport,
};
pub use block::{BookedSlot, OnetimeBlock};
pub use employee::{Employee, ServiceCapability};
pub use interval::TimeInterval;
pub use request::{DayAvailabilityRequest, SlotMatchRequest, SlotQuery};
pub use schedule::{RecurringBreak, WeeklySchedule, parse_clock_time, weekday_number};
