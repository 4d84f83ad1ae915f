//! Employee transport model.

use crate::model::employee::{Employee, Gender};
use crate::model::values::{Birth, Contacts, Education, Passport};
use crate::model::EntityId;
use crate::repo::criteria::{contains_ignore_case, Criteria};
use crate::repo::repository::SqliteRepository;
use crate::service::binding::{require_reference, EntityBinding};
use crate::service::error::ServiceResult;
use crate::service::validation::{
    check_date_order, check_email, check_opt_range, check_phone, require_text, ValidationError,
};
use crate::unit_of_work::UnitOfWork;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const MIN_AGE: i32 = 14;
const MAX_AGE: i32 = 120;
const MIN_GRADUATION_YEAR: i32 = 1900;
const MAX_GRADUATION_YEAR: i32 = 2100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDto {
    pub id: Option<EntityId>,
    pub personnel_number: String,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub gender: Option<Gender>,
    pub age: Option<i32>,
    pub hire_date: Option<NaiveDate>,
    pub birth: Birth,
    pub passport: Passport,
    pub contacts: Contacts,
    pub education: Education,
    pub post_id: Option<EntityId>,
}

impl EmployeeDto {
    /// `Last First Middle`, skipping the middle name when absent.
    pub fn full_name(&self) -> String {
        let mut parts = vec![self.last_name.as_str(), self.first_name.as_str()];
        if let Some(middle) = self.middle_name.as_deref() {
            parts.push(middle);
        }
        parts
            .into_iter()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeFilter {
    /// Case-insensitive substring of the last name.
    pub last_name: Option<String>,
    pub personnel_number: Option<String>,
    pub post_id: Option<EntityId>,
    pub gender: Option<Gender>,
    pub age_min: Option<i32>,
    pub age_max: Option<i32>,
}

impl EntityBinding for EmployeeDto {
    type Entity = Employee;
    type Filter = EmployeeFilter;

    const COLLECTION: &'static str = "Employees";

    fn repository(uow: &UnitOfWork) -> &SqliteRepository<Employee> {
        uow.employees()
    }

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn from_entity(entity: Employee) -> Self {
        Self {
            id: Some(entity.id),
            personnel_number: entity.personnel_number,
            last_name: entity.last_name,
            first_name: entity.first_name,
            middle_name: entity.middle_name,
            gender: entity.gender,
            age: entity.age,
            hire_date: entity.hire_date,
            birth: entity.birth,
            passport: entity.passport,
            contacts: entity.contacts,
            education: entity.education,
            post_id: entity.post_id,
        }
    }

    fn to_entity(&self, id: EntityId) -> Result<Employee, ValidationError> {
        require_text("personnel_number", &self.personnel_number)?;
        require_text("last_name", &self.last_name)?;
        require_text("first_name", &self.first_name)?;
        check_opt_range("age", self.age, MIN_AGE, MAX_AGE)?;
        check_date_order("birth.date", self.birth.date, "hire_date", self.hire_date)?;
        check_opt_range(
            "education.graduation_year",
            self.education.graduation_year,
            MIN_GRADUATION_YEAR,
            MAX_GRADUATION_YEAR,
        )?;
        check_phone("contacts.phone", self.contacts.phone.as_deref())?;
        check_email("contacts.email", self.contacts.email.as_deref())?;

        Ok(Employee {
            id,
            personnel_number: self.personnel_number.clone(),
            last_name: self.last_name.clone(),
            first_name: self.first_name.clone(),
            middle_name: self.middle_name.clone(),
            gender: self.gender,
            age: self.age,
            hire_date: self.hire_date,
            birth: self.birth.clone(),
            passport: self.passport.clone(),
            contacts: self.contacts.clone(),
            education: self.education.clone(),
            post_id: self.post_id,
        })
    }

    fn criteria(filter: &EmployeeFilter) -> Criteria<Employee> {
        Criteria::all()
            .and_some(filter.last_name.clone(), |item: &Employee, last_name| {
                contains_ignore_case(&item.last_name, last_name)
            })
            .and_some(
                filter.personnel_number.clone(),
                |item: &Employee, number| &item.personnel_number == number,
            )
            .and_some(filter.post_id, |item: &Employee, id| {
                item.post_id == Some(*id)
            })
            .and_some(filter.gender, |item: &Employee, gender| {
                item.gender == Some(*gender)
            })
            .and_some(filter.age_min, |item: &Employee, min| {
                item.age.is_some_and(|age| age >= *min)
            })
            .and_some(filter.age_max, |item: &Employee, max| {
                item.age.is_some_and(|age| age <= *max)
            })
    }

    fn check_references(entity: &Employee, uow: &UnitOfWork) -> ServiceResult<()> {
        require_reference(uow.posts(), "post_id", entity.post_id)
    }
}
