//! Availability computation.
//!
//! The pure building blocks (interval subtraction, schedule resolution, day
//! assembly, slot matching, status classification) sit in their own
//! modules; [`AvailabilityEngine`] wires them to an
//! [`AvailabilityStore`](crate::store::AvailabilityStore).
//!
//! # Example
//!
//! ```
//! use salon_availability::availability::{OperatingZone, subtract_all};
//! use salon_availability::models::TimeInterval;
//! use chrono::NaiveTime;
//!
//! let zone = OperatingZone::resolve("Asia/Colombo", 330).unwrap();
//! let date = chrono::NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
//! let hm = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
//!
//! let shift = zone.anchor(date, hm(9, 0), hm(17, 0)).unwrap();
//! let lunch = zone.anchor(date, hm(12, 0), hm(13, 0)).unwrap();
//! let free: Vec<TimeInterval> = subtract_all(&[shift], &[lunch]);
//! assert_eq!(free.len(), 2);
//! assert_eq!(zone.format_clock(free[0].end), "12:00");
//! ```

mod day_builder;
mod engine;
mod schedule_resolver;
mod slot_matcher;
mod status;
mod subtraction;
mod timezone;

pub use day_builder::{
    assemble_day_availability, clip_blocks, materialize_breaks, resolve_break_conflicts,
};
pub use engine::AvailabilityEngine;
pub use schedule_resolver::{schedule_window, select_active_schedule};
pub use slot_matcher::{free_slots, group_capabilities, into_match, vetoing_block};
pub use status::{DutyState, Shift, classify, tally};
pub use subtraction::{clip_to, subtract, subtract_all};
pub use timezone::OperatingZone;
