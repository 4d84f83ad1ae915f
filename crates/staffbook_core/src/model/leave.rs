//! Leave schedule and annual leave entities.

use super::EntityId;
use chrono::NaiveDate;

/// Yearly leave plan document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveSchedule {
    pub id: EntityId,
    /// Document number as printed on the schedule.
    pub number: String,
    pub year: i32,
    pub preparation_date: Option<NaiveDate>,
    pub approval_date: Option<NaiveDate>,
}

/// One planned (and eventually taken) annual leave of an employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnualLeave {
    pub id: EntityId,
    pub scheduled_days: i32,
    pub actual_days: Option<i32>,
    pub scheduled_date: Option<NaiveDate>,
    pub actual_date: Option<NaiveDate>,
    pub employee_id: Option<EntityId>,
    pub leave_schedule_id: Option<EntityId>,
}
