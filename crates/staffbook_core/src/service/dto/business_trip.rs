//! Business trip transport model.

use crate::model::business_trip::BusinessTrip;
use crate::model::EntityId;
use crate::repo::criteria::{contains_ignore_case, Criteria};
use crate::repo::repository::SqliteRepository;
use crate::service::binding::{require_reference, EntityBinding};
use crate::service::error::ServiceResult;
use crate::service::validation::{check_date_order, check_unique_ids, require_text, ValidationError};
use crate::unit_of_work::UnitOfWork;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessTripDto {
    pub id: Option<EntityId>,
    pub name: String,
    pub code: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub destination: Option<String>,
    pub purpose: Option<String>,
    /// Participating employees, in the order given at creation.
    pub employee_ids: Vec<EntityId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessTripFilter {
    /// Exact trip code.
    pub code: Option<String>,
    pub destination: Option<String>,
    /// Trips this employee participates in.
    pub employee_id: Option<EntityId>,
}

impl EntityBinding for BusinessTripDto {
    type Entity = BusinessTrip;
    type Filter = BusinessTripFilter;

    const COLLECTION: &'static str = "BusinessTrips";

    fn repository(uow: &UnitOfWork) -> &SqliteRepository<BusinessTrip> {
        uow.business_trips()
    }

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn from_entity(entity: BusinessTrip) -> Self {
        Self {
            id: Some(entity.id),
            name: entity.name,
            code: entity.code,
            start_date: entity.start_date,
            end_date: entity.end_date,
            destination: entity.destination,
            purpose: entity.purpose,
            employee_ids: entity.employee_ids,
        }
    }

    fn to_entity(&self, id: EntityId) -> Result<BusinessTrip, ValidationError> {
        require_text("name", &self.name)?;
        check_date_order(
            "start_date",
            Some(self.start_date),
            "end_date",
            Some(self.end_date),
        )?;
        check_unique_ids("employee_ids", &self.employee_ids)?;

        Ok(BusinessTrip {
            id,
            name: self.name.clone(),
            code: self.code.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            destination: self.destination.clone(),
            purpose: self.purpose.clone(),
            employee_ids: self.employee_ids.clone(),
        })
    }

    fn criteria(filter: &BusinessTripFilter) -> Criteria<BusinessTrip> {
        Criteria::all()
            .and_some(filter.code.clone(), |item: &BusinessTrip, code| {
                item.code.as_deref() == Some(code.as_str())
            })
            .and_some(filter.destination.clone(), |item: &BusinessTrip, destination| {
                item.destination
                    .as_deref()
                    .is_some_and(|value| contains_ignore_case(value, destination))
            })
            .and_some(filter.employee_id, |item: &BusinessTrip, id| {
                item.employee_ids.contains(id)
            })
    }

    fn check_references(entity: &BusinessTrip, uow: &UnitOfWork) -> ServiceResult<()> {
        for employee_id in &entity.employee_ids {
            require_reference(uow.employees(), "employee_ids", Some(*employee_id))?;
        }
        Ok(())
    }
}
