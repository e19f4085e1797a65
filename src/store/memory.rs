//! In-memory [`AvailabilityStore`] over owned record lists.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::models::{
    BookedSlot, Employee, OnetimeBlock, RecurringBreak, ServiceCapability, TimeInterval,
    WeeklySchedule,
};

use super::{AvailabilityStore, StoreResult};

/// A snapshot of salon data held in memory.
///
/// Built with the `with_*` methods or loaded from a roster file through
/// [`ConfigLoader::load_roster`](crate::config::ConfigLoader::load_roster).
/// Queries never fail.
///
/// # Example
///
/// ```
/// use salon_availability::models::Employee;
/// use salon_availability::store::MemoryStore;
/// use uuid::Uuid;
///
/// let store = MemoryStore::new().with_employee(Employee {
///     id: Uuid::nil(),
///     first_name: "Nadia".to_string(),
///     last_name: "Perera".to_string(),
///     role: String::new(),
///     is_active: true,
/// });
/// assert_eq!(store.employee_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    employees: Vec<Employee>,
    capabilities: Vec<ServiceCapability>,
    schedules: Vec<WeeklySchedule>,
    recurring_breaks: Vec<RecurringBreak>,
    onetime_blocks: Vec<OnetimeBlock>,
    booked_slots: Vec<BookedSlot>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an employee.
    pub fn with_employee(mut self, employee: Employee) -> Self {
        self.employees.push(employee);
        self
    }

    /// Records that `employee_id` can perform `service_id`.
    pub fn with_capability(mut self, employee_id: Uuid, service_id: Uuid) -> Self {
        let capability = ServiceCapability {
            employee_id,
            service_id,
        };
        if !self.capabilities.contains(&capability) {
            self.capabilities.push(capability);
        }
        self
    }

    /// Adds a weekly schedule row.
    pub fn with_schedule(mut self, schedule: WeeklySchedule) -> Self {
        self.schedules.push(schedule);
        self
    }

    /// Adds a recurring break.
    pub fn with_break(mut self, recurring: RecurringBreak) -> Self {
        self.recurring_breaks.push(recurring);
        self
    }

    /// Adds a one-time block.
    pub fn with_block(mut self, block: OnetimeBlock) -> Self {
        self.onetime_blocks.push(block);
        self
    }

    /// Adds a booked slot.
    pub fn with_booking(mut self, slot: BookedSlot) -> Self {
        self.booked_slots.push(slot);
        self
    }

    /// Number of employees held.
    pub fn employee_count(&self) -> usize {
        self.employees.len()
    }
}

fn overlaps(start: DateTime<Utc>, end: DateTime<Utc>, range: &TimeInterval) -> bool {
    start < range.end && end > range.start
}

#[async_trait]
impl AvailabilityStore for MemoryStore {
    async fn employee_exists(&self, employee_id: Uuid) -> StoreResult<bool> {
        Ok(self.employees.iter().any(|e| e.id == employee_id))
    }

    async fn employees(&self) -> StoreResult<Vec<Employee>> {
        Ok(self.employees.clone())
    }

    async fn schedules_for_date(
        &self,
        employee_id: Uuid,
        day_of_week: u8,
        date: NaiveDate,
    ) -> StoreResult<Vec<WeeklySchedule>> {
        Ok(self
            .schedules
            .iter()
            .filter(|s| s.employee_id == employee_id && s.day_of_week == day_of_week)
            .filter(|s| s.valid_from <= date && s.valid_until.is_none_or(|until| until >= date))
            .cloned()
            .collect())
    }

    async fn onetime_blocks_overlapping(
        &self,
        employee_id: Uuid,
        range: TimeInterval,
    ) -> StoreResult<Vec<OnetimeBlock>> {
        Ok(self
            .onetime_blocks
            .iter()
            .filter(|b| b.employee_id == employee_id)
            .filter(|b| overlaps(b.start_date_time, b.end_date_time, &range))
            .cloned()
            .collect())
    }

    async fn recurring_breaks_for_day(
        &self,
        employee_id: Uuid,
        day_of_week: u8,
    ) -> StoreResult<Vec<RecurringBreak>> {
        Ok(self
            .recurring_breaks
            .iter()
            .filter(|b| b.employee_id == employee_id && b.day_of_week == day_of_week)
            .cloned()
            .collect())
    }

    async fn booked_slots_on_date(
        &self,
        employee_id: Uuid,
        day: TimeInterval,
    ) -> StoreResult<Vec<BookedSlot>> {
        Ok(self
            .booked_slots
            .iter()
            .filter(|s| s.employee_id == employee_id)
            .filter(|s| overlaps(s.start_date_time, s.end_date_time, &day))
            .cloned()
            .collect())
    }

    async fn employees_for_service(&self, service_id: Uuid) -> StoreResult<Vec<Uuid>> {
        Ok(self
            .capabilities
            .iter()
            .filter(|c| c.service_id == service_id)
            .map(|c| c.employee_id)
            .collect())
    }

    async fn services_for_employee(&self, employee_id: Uuid) -> StoreResult<Vec<Uuid>> {
        Ok(self
            .capabilities
            .iter()
            .filter(|c| c.employee_id == employee_id)
            .map(|c| c.service_id)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, TimeZone};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, day, hour, 0, 0).unwrap()
    }

    fn range(start: DateTime<Utc>, end: DateTime<Utc>) -> TimeInterval {
        TimeInterval::try_new(start, end).unwrap()
    }

    fn employee(id: u128) -> Employee {
        Employee {
            id: Uuid::from_u128(id),
            first_name: "Test".to_string(),
            last_name: format!("Employee{id}"),
            role: String::new(),
            is_active: true,
        }
    }

    fn schedule(valid_from: &str, valid_until: Option<&str>) -> WeeklySchedule {
        WeeklySchedule {
            id: Uuid::new_v4(),
            employee_id: Uuid::from_u128(1),
            day_of_week: 1,
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            valid_from: valid_from.parse().unwrap(),
            valid_until: valid_until.map(|d| d.parse().unwrap()),
            notes: String::new(),
        }
    }

    fn block(start: DateTime<Utc>, end: DateTime<Utc>) -> OnetimeBlock {
        OnetimeBlock {
            id: Uuid::new_v4(),
            employee_id: Uuid::from_u128(1),
            start_date_time: start,
            end_date_time: end,
            reason: "Leave".to_string(),
        }
    }

    #[tokio::test]
    async fn test_employee_exists() {
        let store = MemoryStore::new().with_employee(employee(1));
        assert!(store.employee_exists(Uuid::from_u128(1)).await.unwrap());
        assert!(!store.employee_exists(Uuid::from_u128(2)).await.unwrap());
    }

    #[tokio::test]
    async fn test_schedules_filtered_by_validity() {
        let store = MemoryStore::new()
            .with_schedule(schedule("2024-01-01", None))
            .with_schedule(schedule("2024-01-01", Some("2024-06-30")))
            .with_schedule(schedule("2024-08-01", None));
        let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let rows = store
            .schedules_for_date(Uuid::from_u128(1), 1, date)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].valid_until.is_none());
    }

    #[tokio::test]
    async fn test_block_overlap_is_half_open() {
        let store = MemoryStore::new()
            .with_block(block(at(1, 8), at(1, 9)))
            .with_block(block(at(1, 10), at(1, 11)))
            .with_block(block(at(1, 17), at(1, 18)));
        let found = store
            .onetime_blocks_overlapping(Uuid::from_u128(1), range(at(1, 9), at(1, 17)))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].start_date_time, at(1, 10));
    }

    #[tokio::test]
    async fn test_booked_slots_on_day() {
        let slot = |start, end| BookedSlot {
            id: Uuid::new_v4(),
            employee_id: Uuid::from_u128(1),
            start_date_time: start,
            end_date_time: end,
            service_id: Uuid::nil(),
        };
        let store = MemoryStore::new()
            .with_booking(slot(at(1, 10), at(1, 11)))
            .with_booking(slot(at(2, 10), at(2, 11)));
        let found = store
            .booked_slots_on_date(Uuid::from_u128(1), range(at(1, 0), at(2, 0)))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_capabilities_both_directions() {
        let (alice, bob) = (Uuid::from_u128(1), Uuid::from_u128(2));
        let (cut, colour) = (Uuid::from_u128(10), Uuid::from_u128(20));
        let store = MemoryStore::new()
            .with_capability(alice, cut)
            .with_capability(alice, colour)
            .with_capability(bob, cut)
            .with_capability(bob, cut);
        assert_eq!(store.employees_for_service(cut).await.unwrap(), vec![alice, bob]);
        assert_eq!(store.services_for_employee(alice).await.unwrap(), vec![cut, colour]);
        assert_eq!(store.services_for_employee(bob).await.unwrap(), vec![cut]);
    }
}
