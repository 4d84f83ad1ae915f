//! Organization transport model.

use crate::model::organization::Organization;
use crate::model::values::{BankDetails, Requisites};
use crate::model::EntityId;
use crate::repo::criteria::{contains_ignore_case, Criteria};
use crate::repo::repository::SqliteRepository;
use crate::service::binding::EntityBinding;
use crate::service::validation::{check_email, check_phone, require_text, ValidationError};
use crate::unit_of_work::UnitOfWork;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationDto {
    pub id: Option<EntityId>,
    pub name: String,
    pub short_name: Option<String>,
    pub legal_address: Option<String>,
    pub actual_address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub requisites: Requisites,
    pub bank: BankDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationFilter {
    /// Case-insensitive substring of the full name.
    pub name: Option<String>,
}

impl EntityBinding for OrganizationDto {
    type Entity = Organization;
    type Filter = OrganizationFilter;

    const COLLECTION: &'static str = "Organizations";

    fn repository(uow: &UnitOfWork) -> &SqliteRepository<Organization> {
        uow.organizations()
    }

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn from_entity(entity: Organization) -> Self {
        Self {
            id: Some(entity.id),
            name: entity.name,
            short_name: entity.short_name,
            legal_address: entity.legal_address,
            actual_address: entity.actual_address,
            phone: entity.phone,
            email: entity.email,
            requisites: entity.requisites,
            bank: entity.bank,
        }
    }

    fn to_entity(&self, id: EntityId) -> Result<Organization, ValidationError> {
        require_text("name", &self.name)?;
        check_phone("phone", self.phone.as_deref())?;
        check_email("email", self.email.as_deref())?;

        Ok(Organization {
            id,
            name: self.name.clone(),
            short_name: self.short_name.clone(),
            legal_address: self.legal_address.clone(),
            actual_address: self.actual_address.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            requisites: self.requisites.clone(),
            bank: self.bank.clone(),
        })
    }

    fn criteria(filter: &OrganizationFilter) -> Criteria<Organization> {
        Criteria::all().and_some(filter.name.clone(), |item: &Organization, name| {
            contains_ignore_case(&item.name, name)
        })
    }
}
