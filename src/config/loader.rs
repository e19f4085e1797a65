//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! settings and roster snapshots from YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use uuid::Uuid;

use crate::availability::{AvailabilityEngine, OperatingZone};
use crate::error::{EngineError, EngineResult};
use crate::models::SlotFormat;
use crate::store::MemoryStore;

use super::types::{EngineConfig, RosterSnapshot};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/salon/
/// ├── engine.yaml   # Timezone and output settings
/// └── roster.yaml   # Employees, schedules, breaks, blocks and bookings
/// ```
///
/// # Example
///
/// ```no_run
/// use salon_availability::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/salon")?;
/// println!("Operating zone: {}", loader.zone().name());
/// let engine = loader.engine()?;
/// # Ok::<(), salon_availability::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    dir: PathBuf,
    config: EngineConfig,
    zone: OperatingZone,
}

impl ConfigLoader {
    /// Loads `engine.yaml` from the specified directory and resolves its zone.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `engine.yaml` is missing
    /// - It contains invalid YAML
    /// - Neither the zone nor its fallback offset can be used
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let dir = path.as_ref().to_path_buf();
        let config = Self::load_yaml::<EngineConfig>(&dir.join("engine.yaml"))?;
        let zone = OperatingZone::resolve(&config.timezone, config.fallback_utc_offset_minutes)?;

        info!(
            path = %dir.display(),
            timezone = %zone.name(),
            slot_format = ?config.slot_format,
            "Loaded engine configuration"
        );

        Ok(Self { dir, config, zone })
    }

    /// Reads a roster file, validates every record and builds a store from it.
    ///
    /// Record errors report their location, e.g. `schedules[2].valid_until`.
    /// Every record must reference an employee listed in the roster.
    pub fn load_roster<P: AsRef<Path>>(path: P) -> EngineResult<MemoryStore> {
        let path = path.as_ref();
        let roster = Self::load_yaml::<RosterSnapshot>(path)?;
        Self::validate_roster(&roster)?;

        debug!(
            path = %path.display(),
            employees = roster.employees.len(),
            schedules = roster.schedules.len(),
            recurring_breaks = roster.recurring_breaks.len(),
            onetime_blocks = roster.onetime_blocks.len(),
            booked_slots = roster.booked_slots.len(),
            "Loaded roster"
        );

        Ok(Self::into_store(roster))
    }

    /// Builds an engine over `roster.yaml` in the configuration directory.
    pub fn engine(&self) -> EngineResult<AvailabilityEngine<MemoryStore>> {
        let store = Self::load_roster(self.dir.join("roster.yaml"))?;
        Ok(AvailabilityEngine::new(store, self.zone))
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The resolved operating zone.
    pub fn zone(&self) -> OperatingZone {
        self.zone
    }

    /// The configured output format for matched slots.
    pub fn slot_format(&self) -> SlotFormat {
        self.config.slot_format
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_roster(roster: &RosterSnapshot) -> EngineResult<()> {
        let known: HashSet<Uuid> = roster.employees.iter().map(|e| e.id).collect();
        let owner = |employee_id: Uuid| {
            if known.contains(&employee_id) {
                Ok(())
            } else {
                Err(EngineError::invalid(
                    "employee_id",
                    format!("unknown employee {employee_id}"),
                ))
            }
        };

        check_section("capabilities", &roster.capabilities, |c| owner(c.employee_id))?;
        check_section("schedules", &roster.schedules, |s| {
            owner(s.employee_id)?;
            s.validate()
        })?;
        check_section("recurring_breaks", &roster.recurring_breaks, |b| {
            owner(b.employee_id)?;
            b.validate()
        })?;
        check_section("onetime_blocks", &roster.onetime_blocks, |b| {
            owner(b.employee_id)?;
            b.validate()
        })?;
        check_section("booked_slots", &roster.booked_slots, |s| {
            owner(s.employee_id)?;
            s.validate()
        })
    }

    fn into_store(roster: RosterSnapshot) -> MemoryStore {
        let mut store = MemoryStore::new();
        for employee in roster.employees {
            store = store.with_employee(employee);
        }
        for capability in roster.capabilities {
            store = store.with_capability(capability.employee_id, capability.service_id);
        }
        for schedule in roster.schedules {
            store = store.with_schedule(schedule);
        }
        for recurring in roster.recurring_breaks {
            store = store.with_break(recurring);
        }
        for block in roster.onetime_blocks {
            store = store.with_block(block);
        }
        for slot in roster.booked_slots {
            store = store.with_booking(slot);
        }
        store
    }
}

/// Runs `validate` on every record, prefixing failing fields with their position.
fn check_section<T>(
    section: &str,
    records: &[T],
    validate: impl Fn(&T) -> EngineResult<()>,
) -> EngineResult<()> {
    for (index, record) in records.iter().enumerate() {
        validate(record).map_err(|err| match err {
            EngineError::InvalidInput { field, message } => EngineError::InvalidInput {
                field: format!("{section}[{index}].{field}"),
                message,
            },
            other => other,
        })?;
    }
    Ok(())
}
