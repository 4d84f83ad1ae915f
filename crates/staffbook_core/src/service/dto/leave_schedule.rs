//! Leave schedule transport model.

use crate::model::leave::LeaveSchedule;
use crate::model::EntityId;
use crate::repo::criteria::Criteria;
use crate::repo::repository::SqliteRepository;
use crate::service::binding::EntityBinding;
use crate::service::validation::{check_date_order, check_range, require_text, ValidationError};
use crate::unit_of_work::UnitOfWork;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 2100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveScheduleDto {
    pub id: Option<EntityId>,
    pub number: String,
    pub year: i32,
    pub preparation_date: Option<NaiveDate>,
    pub approval_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveScheduleFilter {
    pub year: Option<i32>,
    pub number: Option<String>,
}

impl EntityBinding for LeaveScheduleDto {
    type Entity = LeaveSchedule;
    type Filter = LeaveScheduleFilter;

    const COLLECTION: &'static str = "LeaveSchedules";

    fn repository(uow: &UnitOfWork) -> &SqliteRepository<LeaveSchedule> {
        uow.leave_schedules()
    }

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn from_entity(entity: LeaveSchedule) -> Self {
        Self {
            id: Some(entity.id),
            number: entity.number,
            year: entity.year,
            preparation_date: entity.preparation_date,
            approval_date: entity.approval_date,
        }
    }

    fn to_entity(&self, id: EntityId) -> Result<LeaveSchedule, ValidationError> {
        require_text("number", &self.number)?;
        check_range("year", self.year, MIN_YEAR, MAX_YEAR)?;
        check_date_order(
            "preparation_date",
            self.preparation_date,
            "approval_date",
            self.approval_date,
        )?;

        Ok(LeaveSchedule {
            id,
            number: self.number.clone(),
            year: self.year,
            preparation_date: self.preparation_date,
            approval_date: self.approval_date,
        })
    }

    fn criteria(filter: &LeaveScheduleFilter) -> Criteria<LeaveSchedule> {
        Criteria::all()
            .and_some(filter.year, |item: &LeaveSchedule, year| item.year == *year)
            .and_some(filter.number.clone(), |item: &LeaveSchedule, number| {
                &item.number == number
            })
    }
}
