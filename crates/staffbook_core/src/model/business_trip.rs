//! Business trip entity.

use super::EntityId;
use chrono::NaiveDate;

/// Business trip with its participating employees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessTrip {
    pub id: EntityId,
    pub name: String,
    pub code: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub destination: Option<String>,
    pub purpose: Option<String>,
    /// Participants. Stored in the `business_trip_employees` link table.
    pub employee_ids: Vec<EntityId>,
}
