//! Department transport model.

use crate::model::department::Department;
use crate::model::EntityId;
use crate::repo::criteria::{contains_ignore_case, Criteria};
use crate::repo::repository::SqliteRepository;
use crate::service::binding::{reject_dependents, require_reference, EntityBinding};
use crate::service::error::ServiceResult;
use crate::service::validation::{require_text, ValidationError};
use crate::unit_of_work::UnitOfWork;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentDto {
    pub id: Option<EntityId>,
    pub name: String,
    pub manager: Option<String>,
    pub code: Option<String>,
    pub organization_id: Option<EntityId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentFilter {
    pub name: Option<String>,
    /// Exact department code.
    pub code: Option<String>,
    pub organization_id: Option<EntityId>,
}

impl EntityBinding for DepartmentDto {
    type Entity = Department;
    type Filter = DepartmentFilter;

    const COLLECTION: &'static str = "Departments";

    fn repository(uow: &UnitOfWork) -> &SqliteRepository<Department> {
        uow.departments()
    }

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn from_entity(entity: Department) -> Self {
        Self {
            id: Some(entity.id),
            name: entity.name,
            manager: entity.manager,
            code: entity.code,
            organization_id: entity.organization_id,
        }
    }

    fn to_entity(&self, id: EntityId) -> Result<Department, ValidationError> {
        require_text("name", &self.name)?;

        Ok(Department {
            id,
            name: self.name.clone(),
            manager: self.manager.clone(),
            code: self.code.clone(),
            organization_id: self.organization_id,
        })
    }

    fn criteria(filter: &DepartmentFilter) -> Criteria<Department> {
        Criteria::all()
            .and_some(filter.name.clone(), |item: &Department, name| {
                contains_ignore_case(&item.name, name)
            })
            .and_some(filter.code.clone(), |item: &Department, code| {
                item.code.as_deref() == Some(code.as_str())
            })
            .and_some(filter.organization_id, |item: &Department, id| {
                item.organization_id == Some(*id)
            })
    }

    fn check_references(entity: &Department, uow: &UnitOfWork) -> ServiceResult<()> {
        require_reference(uow.organizations(), "organization_id", entity.organization_id)
    }

    fn check_dependents(entity: &Department, uow: &UnitOfWork) -> ServiceResult<()> {
        let id = entity.id;
        reject_dependents(entity, uow.posts(), move |post| {
            post.department_id == Some(id)
        })
    }
}
