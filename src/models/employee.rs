//! Employee records and service capabilities.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A member of staff who can be scheduled and booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Job role (e.g., "Stylist").
    #[serde(default)]
    pub role: String,
    /// Inactive employees are never reported as in the salon.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Employee {
    /// Returns "First Last".
    ///
    /// ```
    /// use salon_availability::models::Employee;
    /// use uuid::Uuid;
    ///
    /// let employee = Employee {
    ///     id: Uuid::nil(),
    ///     first_name: "Nadia".to_string(),
    ///     last_name: "Perera".to_string(),
    ///     role: "Stylist".to_string(),
    ///     is_active: true,
    /// };
    /// assert_eq!(employee.full_name(), "Nadia Perera");
    /// ```
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Records that an employee can perform a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceCapability {
    /// The qualified employee.
    pub employee_id: Uuid,
    /// The service they can perform.
    pub service_id: Uuid,
}
