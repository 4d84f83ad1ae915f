//! Service-level error taxonomy.

use crate::export::ExportError;
use crate::model::EntityId;
use crate::repo::repository::RepoError;
use crate::service::validation::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Coarse category callers use to pick a presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    ValidationFailed,
    DependencyConflict,
    StorageFailure,
}

/// Error returned by entity service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// No record with the requested id. `id` is `None` when none was given.
    NotFound {
        entity: &'static str,
        id: Option<EntityId>,
    },
    /// Input failed field-level or reference checks.
    Validation(ValidationError),
    /// Delete rejected because live records still reference the target.
    DependencyConflict {
        entity: &'static str,
        id: EntityId,
        dependent: &'static str,
        count: usize,
    },
    /// Storage or commit failure, surfaced as reported by the unit of work.
    Storage(RepoError),
    /// Writing an export file failed.
    Export(ExportError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Validation(_) => ErrorKind::ValidationFailed,
            Self::DependencyConflict { .. } => ErrorKind::DependencyConflict,
            Self::Storage(_) | Self::Export(_) | Self::InconsistentState(_) => {
                ErrorKind::StorageFailure
            }
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound {
                entity,
                id: Some(id),
            } => write!(f, "{entity} not found: {id}"),
            Self::NotFound { entity, id: None } => write!(f, "{entity} id is required"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::DependencyConflict {
                entity,
                id,
                dependent,
                count,
            } => write!(
                f,
                "{entity} {id} cannot be deleted: {count} {dependent} record(s) still reference it"
            ),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Export(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent state: {details}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::Export(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity, id } => Self::NotFound {
                entity,
                id: Some(id),
            },
            other => Self::Storage(other),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<ExportError> for ServiceError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}
