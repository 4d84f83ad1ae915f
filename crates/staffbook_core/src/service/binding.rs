//! Per-entity binding between a DTO and its persistence entity.
//!
//! # Responsibility
//! - Tell the generic service which repository, mapping, filter and
//!   integrity rules belong to one DTO type.
//! - Provide shared helpers for reference and dependent checks.
//!
//! # Invariants
//! - `to_entity` validates before building; it never touches storage.
//! - Reference and dependent checks only read; they never stage changes.

use crate::model::EntityId;
use crate::repo::criteria::Criteria;
use crate::repo::entity::Entity;
use crate::repo::repository::{RepoError, Repository, SqliteRepository};
use crate::service::error::{ServiceError, ServiceResult};
use crate::service::validation::ValidationError;
use crate::unit_of_work::UnitOfWork;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Binds one transport model (DTO) to its entity type.
pub trait EntityBinding: Clone + Serialize + DeserializeOwned {
    type Entity: Entity;
    /// Filter model whose present fields combine with AND.
    type Filter;

    /// Plural type name, also the export file stem (`Employees`).
    const COLLECTION: &'static str;

    fn repository(uow: &UnitOfWork) -> &SqliteRepository<Self::Entity>;

    fn id(&self) -> Option<EntityId>;

    fn from_entity(entity: Self::Entity) -> Self;

    /// Validates fields and builds the entity stored under `id`.
    fn to_entity(&self, id: EntityId) -> Result<Self::Entity, ValidationError>;

    fn criteria(filter: &Self::Filter) -> Criteria<Self::Entity>;

    /// Verifies every referenced id resolves to a stored record.
    fn check_references(_entity: &Self::Entity, _uow: &UnitOfWork) -> ServiceResult<()> {
        Ok(())
    }

    /// Rejects deletion while other records still reference `entity`.
    fn check_dependents(_entity: &Self::Entity, _uow: &UnitOfWork) -> ServiceResult<()> {
        Ok(())
    }
}

/// Fails with `UnknownReference` when `id` is set but not stored in `repo`.
pub(crate) fn require_reference<T: Entity>(
    repo: &SqliteRepository<T>,
    field: &'static str,
    id: Option<EntityId>,
) -> ServiceResult<()> {
    let Some(id) = id else {
        return Ok(());
    };
    match repo.find_by_id(id) {
        Ok(_) => Ok(()),
        Err(RepoError::NotFound { .. }) => {
            Err(ValidationError::UnknownReference { field, id }.into())
        }
        Err(err) => Err(err.into()),
    }
}

/// Fails with `DependencyConflict` when any record in `dependents` matches.
pub(crate) fn reject_dependents<P: Entity, D: Entity>(
    parent: &P,
    dependents: &SqliteRepository<D>,
    references_parent: impl Fn(&D) -> bool,
) -> ServiceResult<()> {
    let count = dependents.get(&references_parent)?.len();
    if count > 0 {
        return Err(ServiceError::DependencyConflict {
            entity: P::NAME,
            id: parent.id(),
            dependent: D::NAME,
            count,
        });
    }
    Ok(())
}
