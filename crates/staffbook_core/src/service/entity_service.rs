//! Generic entity service.
//!
//! # Responsibility
//! - Offer DTO-level CRUD, filtering, paging and export for one entity type.
//! - Enforce reference and dependent rules before staging changes.
//! - Commit every mutation through the owned unit of work.
//!
//! # Invariants
//! - Rule violations fail before anything is staged or committed.
//! - Each mutating call issues exactly one `UnitOfWork::save`.
//! - `PageInfo` is the only state carried between calls.

use crate::config::{CoreConfig, StorageTarget, DEFAULT_PAGE_SIZE};
use crate::export::export_binding;
use crate::model::EntityId;
use crate::paging::{paginate, PageInfo};
use crate::repo::entity::Entity;
use crate::repo::repository::{RepoError, Repository};
use crate::service::binding::EntityBinding;
use crate::service::error::{ServiceError, ServiceResult};
use crate::service::validation::ValidationError;
use crate::unit_of_work::UnitOfWork;
use log::{info, warn};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Service over one DTO type `M`, bound to its own unit of work.
pub struct EntityService<M: EntityBinding> {
    uow: UnitOfWork,
    page_info: PageInfo,
    _model: PhantomData<fn() -> M>,
}

impl<M: EntityBinding> EntityService<M> {
    /// Creates a service over an existing unit of work.
    pub fn new(uow: UnitOfWork) -> Self {
        Self {
            uow,
            page_info: PageInfo::new(DEFAULT_PAGE_SIZE),
            _model: PhantomData,
        }
    }

    /// Opens a fresh unit of work on `target`.
    pub fn connect(target: &StorageTarget) -> ServiceResult<Self> {
        Ok(Self::new(UnitOfWork::open(target)?))
    }

    /// Opens a fresh unit of work using the configured target and page size.
    pub fn from_config(config: &CoreConfig) -> ServiceResult<Self> {
        Ok(Self::connect(&config.storage)?.with_page_size(config.page_size))
    }

    /// Overrides the page size used by `get_page`.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_info = PageInfo::new(page_size);
        self
    }

    pub fn page_info(&self) -> &PageInfo {
        &self.page_info
    }

    pub fn unit_of_work(&self) -> &UnitOfWork {
        &self.uow
    }

    pub fn count(&self) -> ServiceResult<usize> {
        Ok(M::repository(&self.uow).get_all()?.len())
    }

    pub fn count_filtered(&self, filter: &M::Filter) -> ServiceResult<usize> {
        let criteria = M::criteria(filter);
        Ok(M::repository(&self.uow)
            .get(&|item| criteria.matches(item))?
            .len())
    }

    /// Validates, stores and returns the new record.
    ///
    /// A missing id is generated; a caller-supplied id is kept.
    pub fn create(&self, dto: &M) -> ServiceResult<M> {
        let id = match dto.id() {
            Some(id) if id.is_nil() => return Err(ValidationError::NilId.into()),
            Some(id) => id,
            None => Uuid::new_v4(),
        };
        let entity = dto.to_entity(id)?;
        M::check_references(&entity, &self.uow)?;

        let repo = M::repository(&self.uow);
        repo.create(&entity);
        self.uow.save()?;
        info!(
            "event=entity_create module=service status=ok entity={} id={}",
            entity_name::<M>(),
            id
        );

        self.read_back(id, "created record not found in read-back")
    }

    /// Replaces the stored record with the same id.
    pub fn edit(&self, dto: &M) -> ServiceResult<M> {
        let id = dto.id().ok_or(ValidationError::MissingId)?;
        let repo = M::repository(&self.uow);
        repo.find_by_id(id)?;

        let entity = dto.to_entity(id)?;
        M::check_references(&entity, &self.uow)?;

        repo.update(&entity);
        self.uow.save()?;
        info!(
            "event=entity_edit module=service status=ok entity={} id={}",
            entity_name::<M>(),
            id
        );

        self.read_back(id, "edited record not found in read-back")
    }

    /// Loads one record. `None` is reported as `NotFound`.
    pub fn find_by_id(&self, id: Option<EntityId>) -> ServiceResult<M> {
        let Some(id) = id else {
            return Err(ServiceError::NotFound {
                entity: entity_name::<M>(),
                id: None,
            });
        };
        let entity = M::repository(&self.uow).find_by_id(id)?;
        Ok(M::from_entity(entity))
    }

    pub fn get_all(&self) -> ServiceResult<Vec<M>> {
        let items = M::repository(&self.uow).get_all()?;
        Ok(items.into_iter().map(M::from_entity).collect())
    }

    /// Returns every record matching all present filter fields.
    pub fn filter(&self, filter: &M::Filter) -> ServiceResult<Vec<M>> {
        let criteria = M::criteria(filter);
        let items = M::repository(&self.uow).get(&|item| criteria.matches(item))?;
        Ok(items.into_iter().map(M::from_entity).collect())
    }

    /// Deletes one record after its dependent checks pass.
    pub fn delete(&self, id: EntityId) -> ServiceResult<()> {
        let repo = M::repository(&self.uow);
        let entity = repo.find_by_id(id)?;

        if let Err(err) = M::check_dependents(&entity, &self.uow) {
            if let ServiceError::DependencyConflict { count, .. } = &err {
                warn!(
                    "event=entity_delete module=service status=rejected entity={} id={} error_code=dependency_conflict dependents={}",
                    entity_name::<M>(),
                    id,
                    count
                );
            }
            return Err(err);
        }

        repo.remove(&entity);
        self.uow.save()?;
        info!(
            "event=entity_delete module=service status=ok entity={} id={}",
            entity_name::<M>(),
            id
        );
        Ok(())
    }

    /// Removes every record of this type without dependent checks.
    ///
    /// Returns the number of records that existed before removal. Storage
    /// still refuses the commit when other tables reference these rows.
    pub fn delete_all(&self) -> ServiceResult<usize> {
        let repo = M::repository(&self.uow);
        let existing = repo.get_all()?.len();
        repo.remove_all();
        self.uow.save()?;
        info!(
            "event=entity_delete_all module=service status=ok entity={} removed={}",
            entity_name::<M>(),
            existing
        );
        Ok(existing)
    }

    /// Slices one 1-based page out of an already filtered collection.
    ///
    /// Out-of-range page numbers are clamped; `page_info()` reflects the page
    /// actually returned.
    pub fn get_page<T>(&mut self, collection: Vec<T>, page_number: usize) -> Vec<T> {
        paginate(collection, page_number, &mut self.page_info)
    }

    /// Writes all records to `<dir>/<Collection>.json`.
    pub fn export_json(&self, dir: impl AsRef<Path>) -> ServiceResult<PathBuf> {
        export_binding::<M>(&self.uow, dir.as_ref())
    }

    /// Releases the unit of work and its connection.
    pub fn dispose(self) {
        self.uow.dispose();
    }

    fn read_back(&self, id: EntityId, details: &'static str) -> ServiceResult<M> {
        match M::repository(&self.uow).find_by_id(id) {
            Ok(entity) => Ok(M::from_entity(entity)),
            Err(RepoError::NotFound { .. }) => {
                Err(ServiceError::InconsistentState(details))
            }
            Err(err) => Err(err.into()),
        }
    }
}

fn entity_name<M: EntityBinding>() -> &'static str {
    <M::Entity as Entity>::NAME
}
