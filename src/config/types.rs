//! Configuration types for the availability engine.
//!
//! This module contains the strongly-typed structures that are
//! deserialized from the YAML files in a configuration directory.

use serde::Deserialize;

use crate::models::{
    BookedSlot, Employee, OnetimeBlock, RecurringBreak, ServiceCapability, SlotFormat,
    WeeklySchedule,
};

fn default_timezone() -> String {
    "Asia/Colombo".to_string()
}

fn default_fallback_offset() -> i32 {
    330
}

/// Engine settings from `engine.yaml`.
///
/// Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// IANA name of the operating timezone.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Offset east of UTC, in minutes, used when `timezone` is unknown.
    #[serde(default = "default_fallback_offset")]
    pub fallback_utc_offset_minutes: i32,
    /// How callers receive matched slots.
    #[serde(default)]
    pub slot_format: SlotFormat,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            fallback_utc_offset_minutes: default_fallback_offset(),
            slot_format: SlotFormat::default(),
        }
    }
}

/// A full data snapshot from `roster.yaml`.
///
/// Omitted sections are empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RosterSnapshot {
    /// Staff members.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Which employee performs which service.
    #[serde(default)]
    pub capabilities: Vec<ServiceCapability>,
    /// Weekly schedule rows.
    #[serde(default)]
    pub schedules: Vec<WeeklySchedule>,
    /// Recurring weekly breaks.
    #[serde(default)]
    pub recurring_breaks: Vec<RecurringBreak>,
    /// One-time blocks.
    #[serde(default)]
    pub onetime_blocks: Vec<OnetimeBlock>,
    /// Already-booked slots.
    #[serde(default)]
    pub booked_slots: Vec<BookedSlot>,
}
