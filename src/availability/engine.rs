//! The async orchestrator behind every availability query.
//!
//! [`AvailabilityEngine`] fetches from an [`AvailabilityStore`], then hands
//! the snapshots to the pure builders in this module's siblings. It holds no
//! mutable state; concurrent calls are independent.

use std::future::Future;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    DayAvailability, DayAvailabilityRequest, EmployeeMatch, SlotMatchRequest, SlotQuery,
    StatusReport, TimeInterval, WeeklySchedule, weekday_number,
};
use crate::store::{AvailabilityStore, StoreResult};

use super::OperatingZone;
use super::day_builder::assemble_day_availability;
use super::schedule_resolver::{schedule_window, select_active_schedule};
use super::slot_matcher::{free_slots, group_capabilities, into_match, vetoing_block};
use super::status::{Shift, classify, tally};

/// Awaits a store query, turning its failure into a collaborator error.
async fn fetch<T>(
    operation: &'static str,
    query: impl Future<Output = StoreResult<T>>,
) -> EngineResult<T> {
    query
        .await
        .map_err(|err| EngineError::CollaboratorFailure {
            operation,
            message: err.to_string(),
        })
}

/// Computes availability for employees of one salon.
///
/// # Example
///
/// ```
/// use salon_availability::availability::{AvailabilityEngine, OperatingZone};
/// use salon_availability::error::EngineError;
/// use salon_availability::store::MemoryStore;
/// use chrono::NaiveDate;
/// use uuid::Uuid;
///
/// let runtime = tokio::runtime::Runtime::new().unwrap();
/// let engine = AvailabilityEngine::new(MemoryStore::new(), OperatingZone::utc());
/// let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
///
/// let result = runtime.block_on(engine.build_day_availability(Uuid::nil(), date));
/// assert!(matches!(result, Err(EngineError::EmployeeNotFound { .. })));
/// ```
#[derive(Debug, Clone)]
pub struct AvailabilityEngine<S> {
    store: S,
    zone: OperatingZone,
}

impl<S: AvailabilityStore> AvailabilityEngine<S> {
    /// Creates an engine reading from `store` and working in `zone`.
    pub fn new(store: S, zone: OperatingZone) -> Self {
        Self { store, zone }
    }

    /// The operating zone.
    pub fn zone(&self) -> &OperatingZone {
        &self.zone
    }

    /// The schedule row governing `date`, if any.
    pub async fn resolve_schedule(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> EngineResult<Option<WeeklySchedule>> {
        let rows = fetch(
            "schedules_for_date",
            self.store
                .schedules_for_date(employee_id, weekday_number(date), date),
        )
        .await?;

        if rows.len() > 1 {
            debug!(
                employee_id = %employee_id,
                %date,
                candidates = rows.len(),
                "Multiple schedules cover date, picking latest valid_from"
            );
        }

        Ok(select_active_schedule(&rows, date).cloned())
    }

    /// Builds one employee's day: schedule window, clipped blocks and
    /// conflict-resolved breaks.
    ///
    /// Blocks are fetched over the calendar day, widened to the end of the
    /// shift when it runs past midnight.
    ///
    /// Fails with `EmployeeNotFound` for an unknown id and
    /// `NoScheduleForDate` when no schedule applies.
    pub async fn build_day_availability(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> EngineResult<DayAvailability> {
        let correlation_id = Uuid::new_v4();
        info!(
            correlation_id = %correlation_id,
            employee_id = %employee_id,
            %date,
            "Building day availability"
        );

        let result = self.compute_day(employee_id, date).await;
        match &result {
            Ok(day) => info!(
                correlation_id = %correlation_id,
                blocks = day.onetime_blocks.len(),
                breaks = day.breaks.len(),
                "Day availability built"
            ),
            Err(err) => warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Day availability failed"
            ),
        }
        result
    }

    /// Validates a raw request and builds the day it names.
    pub async fn day_availability_for(
        &self,
        request: &DayAvailabilityRequest,
    ) -> EngineResult<DayAvailability> {
        let (employee_id, date) = request.validate(&self.zone)?;
        self.build_day_availability(employee_id, date).await
    }

    async fn compute_day(&self, employee_id: Uuid, date: NaiveDate) -> EngineResult<DayAvailability> {
        if !fetch("employee_exists", self.store.employee_exists(employee_id)).await? {
            return Err(EngineError::EmployeeNotFound { employee_id });
        }

        let no_schedule = EngineError::NoScheduleForDate { employee_id, date };
        let Some(schedule) = self.resolve_schedule(employee_id, date).await? else {
            return Err(no_schedule);
        };
        let window = schedule_window(&schedule, date, &self.zone).ok_or(no_schedule)?;

        let day = self.zone.day_bounds(date);
        let range = if schedule.crosses_midnight() {
            TimeInterval {
                start: day.start.min(window.start),
                end: day.end.max(window.end),
            }
        } else {
            day
        };

        let (blocks, breaks) = tokio::try_join!(
            fetch(
                "onetime_blocks_overlapping",
                self.store.onetime_blocks_overlapping(employee_id, range),
            ),
            fetch(
                "recurring_breaks_for_day",
                self.store
                    .recurring_breaks_for_day(employee_id, weekday_number(date)),
            ),
        )?;

        Ok(assemble_day_availability(
            employee_id,
            date,
            window,
            &blocks,
            &breaks,
            &self.zone,
        ))
    }

    /// Finds employees able to take part of the query window.
    ///
    /// Employees without a schedule, vetoed by a block, or left with no free
    /// time are omitted. Results are ordered by employee id.
    ///
    /// Fails with `InvalidInput` unless the window lies on `query.date` in
    /// the operating zone.
    pub async fn match_employees(&self, query: &SlotQuery) -> EngineResult<Vec<EmployeeMatch>> {
        let correlation_id = Uuid::new_v4();
        info!(
            correlation_id = %correlation_id,
            services = query.service_ids.len(),
            window_start = %query.window.start,
            window_end = %query.window.end,
            "Matching employees to slot"
        );

        let result = self.compute_matches(query, correlation_id).await;
        match &result {
            Ok(matches) => info!(
                correlation_id = %correlation_id,
                matches = matches.len(),
                "Slot matching complete"
            ),
            Err(err) => warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Slot matching failed"
            ),
        }
        result
    }

    /// Validates a raw request and matches employees to it.
    pub async fn match_request(&self, request: &SlotMatchRequest) -> EngineResult<Vec<EmployeeMatch>> {
        let query = request.validate(&self.zone)?;
        self.match_employees(&query).await
    }

    async fn compute_matches(
        &self,
        query: &SlotQuery,
        correlation_id: Uuid,
    ) -> EngineResult<Vec<EmployeeMatch>> {
        query.check(&self.zone)?;

        let mut qualified = Vec::with_capacity(query.service_ids.len());
        for service_id in &query.service_ids {
            let employees = fetch(
                "employees_for_service",
                self.store.employees_for_service(*service_id),
            )
            .await?;
            qualified.push((*service_id, employees));
        }

        let candidates = group_capabilities(&qualified);
        debug!(
            correlation_id = %correlation_id,
            candidates = candidates.len(),
            "Resolved qualified employees"
        );

        let mut matches = Vec::new();
        for (employee_id, service_ids) in candidates {
            if let Some(found) = self
                .match_candidate(employee_id, service_ids, query, correlation_id)
                .await?
            {
                matches.push(found);
            }
        }
        Ok(matches)
    }

    async fn match_candidate(
        &self,
        employee_id: Uuid,
        service_ids: Vec<Uuid>,
        query: &SlotQuery,
        correlation_id: Uuid,
    ) -> EngineResult<Option<EmployeeMatch>> {
        let blocks = fetch(
            "onetime_blocks_overlapping",
            self.store
                .onetime_blocks_overlapping(employee_id, query.window),
        )
        .await?;
        if let Some(block) = vetoing_block(&blocks, &query.window) {
            debug!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                block_id = %block.id,
                "Employee vetoed by one-time block"
            );
            return Ok(None);
        }

        let Some(window) = self
            .resolve_schedule(employee_id, query.date)
            .await?
            .and_then(|schedule| schedule_window(&schedule, query.date, &self.zone))
        else {
            debug!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                "No schedule for date, skipping"
            );
            return Ok(None);
        };

        let (breaks, booked) = tokio::try_join!(
            fetch(
                "recurring_breaks_for_day",
                self.store
                    .recurring_breaks_for_day(employee_id, weekday_number(query.date)),
            ),
            fetch(
                "booked_slots_on_date",
                self.store
                    .booked_slots_on_date(employee_id, self.zone.day_bounds(query.date)),
            ),
        )?;

        let slots = free_slots(
            window,
            &breaks,
            &booked,
            query.date,
            &query.window,
            &self.zone,
        );
        Ok(into_match(employee_id, service_ids, slots))
    }

    /// The services an existing employee can perform.
    pub async fn employee_services(&self, employee_id: Uuid) -> EngineResult<Vec<Uuid>> {
        if !fetch("employee_exists", self.store.employee_exists(employee_id)).await? {
            return Err(EngineError::EmployeeNotFound { employee_id });
        }
        fetch(
            "services_for_employee",
            self.store.services_for_employee(employee_id),
        )
        .await
    }

    /// Sorts every active employee into serving, idle or out at `at`.
    pub async fn employee_status(&self, at: DateTime<Utc>) -> EngineResult<StatusReport> {
        let correlation_id = Uuid::new_v4();
        info!(correlation_id = %correlation_id, at = %at, "Computing employee status");

        let employees = fetch("employees", self.store.employees()).await?;
        let today = self.zone.date_of(at);
        let day = self.zone.day_bounds(today);
        let mut dates = vec![today];
        dates.extend(today.pred_opt());

        let mut states = Vec::with_capacity(employees.len());
        for employee in employees.iter().filter(|e| e.is_active) {
            let mut shifts = Vec::new();
            for date in &dates {
                shifts.extend(self.shift_covering(employee.id, *date, at).await?);
            }

            let (blocks, booked) = tokio::try_join!(
                fetch(
                    "onetime_blocks_overlapping",
                    self.store.onetime_blocks_overlapping(employee.id, day),
                ),
                fetch(
                    "booked_slots_on_date",
                    self.store.booked_slots_on_date(employee.id, day),
                ),
            )?;

            states.push((employee.id, classify(at, &shifts, &blocks, &booked)));
        }

        let report = tally(states);
        info!(
            correlation_id = %correlation_id,
            serving = report.serving.len(),
            idle = report.idle.len(),
            out = report.out.len(),
            "Employee status computed"
        );
        Ok(report)
    }

    /// The shift anchored to `date` if its window contains `at`.
    async fn shift_covering(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
        at: DateTime<Utc>,
    ) -> EngineResult<Option<Shift>> {
        let Some(window) = self
            .resolve_schedule(employee_id, date)
            .await?
            .and_then(|schedule| schedule_window(&schedule, date, &self.zone))
        else {
            return Ok(None);
        };
        if !window.contains_instant(at) {
            return Ok(None);
        }

        let breaks: Vec<TimeInterval> = fetch(
            "recurring_breaks_for_day",
            self.store
                .recurring_breaks_for_day(employee_id, weekday_number(date)),
        )
        .await?
        .iter()
        .filter_map(|b| self.zone.anchor(date, b.start_time, b.end_time))
        .collect();

        Ok(Some(Shift { window, breaks }))
    }
}
