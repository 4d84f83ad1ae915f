//! Post transport model.

use crate::model::post::Post;
use crate::model::EntityId;
use crate::repo::criteria::{contains_ignore_case, Criteria};
use crate::repo::repository::SqliteRepository;
use crate::service::binding::{reject_dependents, require_reference, EntityBinding};
use crate::service::error::ServiceResult;
use crate::service::validation::{check_amount, check_range, require_text, ValidationError};
use crate::unit_of_work::UnitOfWork;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const MAX_LEAVE_DAYS: i32 = 366;
const MAX_UNIT_COUNT: i32 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDto {
    pub id: Option<EntityId>,
    pub title: String,
    pub unit_count: i32,
    pub salary: Decimal,
    pub premium: Decimal,
    pub leave_days: i32,
    pub department_id: Option<EntityId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostFilter {
    pub title: Option<String>,
    /// Inclusive lower salary bound.
    pub salary_min: Option<Decimal>,
    /// Inclusive upper salary bound.
    pub salary_max: Option<Decimal>,
    pub department_id: Option<EntityId>,
}

impl EntityBinding for PostDto {
    type Entity = Post;
    type Filter = PostFilter;

    const COLLECTION: &'static str = "Posts";

    fn repository(uow: &UnitOfWork) -> &SqliteRepository<Post> {
        uow.posts()
    }

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn from_entity(entity: Post) -> Self {
        Self {
            id: Some(entity.id),
            title: entity.title,
            unit_count: entity.unit_count,
            salary: entity.salary,
            premium: entity.premium,
            leave_days: entity.leave_days,
            department_id: entity.department_id,
        }
    }

    fn to_entity(&self, id: EntityId) -> Result<Post, ValidationError> {
        require_text("title", &self.title)?;
        check_range("unit_count", self.unit_count, 0, MAX_UNIT_COUNT)?;
        check_amount("salary", self.salary)?;
        check_amount("premium", self.premium)?;
        check_range("leave_days", self.leave_days, 0, MAX_LEAVE_DAYS)?;

        Ok(Post {
            id,
            title: self.title.clone(),
            unit_count: self.unit_count,
            salary: self.salary,
            premium: self.premium,
            leave_days: self.leave_days,
            department_id: self.department_id,
        })
    }

    fn criteria(filter: &PostFilter) -> Criteria<Post> {
        Criteria::all()
            .and_some(filter.title.clone(), |item: &Post, title| {
                contains_ignore_case(&item.title, title)
            })
            .and_some(filter.salary_min, |item: &Post, min| item.salary >= *min)
            .and_some(filter.salary_max, |item: &Post, max| item.salary <= *max)
            .and_some(filter.department_id, |item: &Post, id| {
                item.department_id == Some(*id)
            })
    }

    fn check_references(entity: &Post, uow: &UnitOfWork) -> ServiceResult<()> {
        require_reference(uow.departments(), "department_id", entity.department_id)
    }

    fn check_dependents(entity: &Post, uow: &UnitOfWork) -> ServiceResult<()> {
        let id = entity.id;
        reject_dependents(entity, uow.employees(), move |employee| {
            employee.post_id == Some(id)
        })
    }
}
