//! Post (staff position) entity.

use super::EntityId;
use rust_decimal::Decimal;

/// Staff position within a department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: EntityId,
    pub title: String,
    /// Number of staff units budgeted for this post.
    pub unit_count: i32,
    pub salary: Decimal,
    pub premium: Decimal,
    /// Annual leave entitlement in calendar days.
    pub leave_days: i32,
    pub department_id: Option<EntityId>,
}
