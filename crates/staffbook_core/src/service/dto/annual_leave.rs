//! Annual leave transport model.

use crate::model::leave::AnnualLeave;
use crate::model::EntityId;
use crate::repo::criteria::Criteria;
use crate::repo::repository::SqliteRepository;
use crate::service::binding::{require_reference, EntityBinding};
use crate::service::error::ServiceResult;
use crate::service::validation::{check_opt_range, check_range, ValidationError};
use crate::unit_of_work::UnitOfWork;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const MAX_LEAVE_DAYS: i32 = 366;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualLeaveDto {
    pub id: Option<EntityId>,
    pub scheduled_days: i32,
    pub actual_days: Option<i32>,
    pub scheduled_date: Option<NaiveDate>,
    pub actual_date: Option<NaiveDate>,
    pub employee_id: Option<EntityId>,
    pub leave_schedule_id: Option<EntityId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualLeaveFilter {
    /// Inclusive lower bound on `scheduled_days`.
    pub scheduled_days_min: Option<i32>,
    /// Inclusive upper bound on `scheduled_days`.
    pub scheduled_days_max: Option<i32>,
    pub employee_id: Option<EntityId>,
    pub leave_schedule_id: Option<EntityId>,
}

impl EntityBinding for AnnualLeaveDto {
    type Entity = AnnualLeave;
    type Filter = AnnualLeaveFilter;

    const COLLECTION: &'static str = "AnnualLeaves";

    fn repository(uow: &UnitOfWork) -> &SqliteRepository<AnnualLeave> {
        uow.annual_leaves()
    }

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn from_entity(entity: AnnualLeave) -> Self {
        Self {
            id: Some(entity.id),
            scheduled_days: entity.scheduled_days,
            actual_days: entity.actual_days,
            scheduled_date: entity.scheduled_date,
            actual_date: entity.actual_date,
            employee_id: entity.employee_id,
            leave_schedule_id: entity.leave_schedule_id,
        }
    }

    fn to_entity(&self, id: EntityId) -> Result<AnnualLeave, ValidationError> {
        check_range("scheduled_days", self.scheduled_days, 1, MAX_LEAVE_DAYS)?;
        check_opt_range("actual_days", self.actual_days, 0, MAX_LEAVE_DAYS)?;

        Ok(AnnualLeave {
            id,
            scheduled_days: self.scheduled_days,
            actual_days: self.actual_days,
            scheduled_date: self.scheduled_date,
            actual_date: self.actual_date,
            employee_id: self.employee_id,
            leave_schedule_id: self.leave_schedule_id,
        })
    }

    fn criteria(filter: &AnnualLeaveFilter) -> Criteria<AnnualLeave> {
        Criteria::all()
            .and_some(filter.scheduled_days_min, |item: &AnnualLeave, min| {
                item.scheduled_days >= *min
            })
            .and_some(filter.scheduled_days_max, |item: &AnnualLeave, max| {
                item.scheduled_days <= *max
            })
            .and_some(filter.employee_id, |item: &AnnualLeave, id| {
                item.employee_id == Some(*id)
            })
            .and_some(filter.leave_schedule_id, |item: &AnnualLeave, id| {
                item.leave_schedule_id == Some(*id)
            })
    }

    fn check_references(entity: &AnnualLeave, uow: &UnitOfWork) -> ServiceResult<()> {
        require_reference(uow.employees(), "employee_id", entity.employee_id)?;
        require_reference(
            uow.leave_schedules(),
            "leave_schedule_id",
            entity.leave_schedule_id,
        )
    }
}
