//! The persistence seam the engine reads from.
//!
//! The engine owns no data. Every schedule, break, block, booking and
//! capability comes through [`AvailabilityStore`], which a host implements
//! over its own database. [`MemoryStore`] is an in-memory implementation
//! for tests, benchmarks and embedding callers.

mod memory;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    BookedSlot, Employee, OnetimeBlock, RecurringBreak, TimeInterval, WeeklySchedule,
};

pub use memory::MemoryStore;

/// Failure reported by a store implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The backing storage could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The query ran but failed.
    #[error("query failed: {0}")]
    Query(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Read-only queries the engine needs from the data layer.
///
/// Implementations must not retry on the engine's behalf; a failed query is
/// reported as-is and the engine aborts the computation.
#[async_trait]
pub trait AvailabilityStore: Send + Sync {
    /// Whether an employee with this id exists.
    async fn employee_exists(&self, employee_id: Uuid) -> StoreResult<bool>;

    /// Every employee known to the store.
    async fn employees(&self) -> StoreResult<Vec<Employee>>;

    /// Schedule rows for the weekday that are valid on `date`.
    async fn schedules_for_date(
        &self,
        employee_id: Uuid,
        day_of_week: u8,
        date: NaiveDate,
    ) -> StoreResult<Vec<WeeklySchedule>>;

    /// One-time blocks overlapping `range`.
    async fn onetime_blocks_overlapping(
        &self,
        employee_id: Uuid,
        range: TimeInterval,
    ) -> StoreResult<Vec<OnetimeBlock>>;

    /// Recurring breaks on the weekday.
    async fn recurring_breaks_for_day(
        &self,
        employee_id: Uuid,
        day_of_week: u8,
    ) -> StoreResult<Vec<RecurringBreak>>;

    /// Booked slots overlapping the local day `day`.
    async fn booked_slots_on_date(
        &self,
        employee_id: Uuid,
        day: TimeInterval,
    ) -> StoreResult<Vec<BookedSlot>>;

    /// Employees able to perform the service.
    async fn employees_for_service(&self, service_id: Uuid) -> StoreResult<Vec<Uuid>>;

    /// Services the employee can perform.
    async fn services_for_employee(&self, employee_id: Uuid) -> StoreResult<Vec<Uuid>>;
}
