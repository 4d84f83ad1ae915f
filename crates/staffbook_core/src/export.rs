//! JSON export of entity collections.
//!
//! # Responsibility
//! - Serialize one DTO collection as a flat JSON array.
//! - Name files `<Collection>.json` (`Employees.json`, `LeaveSchedules.json`).
//!
//! # Invariants
//! - JSON field names are exactly the DTO field names.
//! - A file is written completely or the call fails; partial output is not
//!   reported as success.

use crate::repo::repository::Repository;
use crate::service::binding::EntityBinding;
use crate::service::dto::annual_leave::AnnualLeaveDto;
use crate::service::dto::business_trip::BusinessTripDto;
use crate::service::dto::department::DepartmentDto;
use crate::service::dto::employee::EmployeeDto;
use crate::service::dto::leave_schedule::LeaveScheduleDto;
use crate::service::dto::organization::OrganizationDto;
use crate::service::dto::post::PostDto;
use crate::service::error::ServiceResult;
use crate::unit_of_work::UnitOfWork;
use log::{error, info};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Export file write failure.
#[derive(Debug)]
pub enum ExportError {
    Io { path: PathBuf, source: io::Error },
    Json { path: PathBuf, source: serde_json::Error },
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to write `{}`: {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "failed to serialize `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

/// File name used for one collection.
pub fn export_file_name(collection: &str) -> String {
    format!("{collection}.json")
}

/// Writes `items` as a pretty-printed JSON array to `<dir>/<collection>.json`.
///
/// Creates `dir` when missing and overwrites an existing file.
pub fn write_collection<T: Serialize>(
    dir: &Path,
    collection: &str,
    items: &[T],
) -> Result<PathBuf, ExportError> {
    let path = dir.join(export_file_name(collection));
    let io_error = |source| ExportError::Io {
        path: path.clone(),
        source,
    };

    fs::create_dir_all(dir).map_err(io_error)?;
    let file = File::create(&path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, items).map_err(|source| ExportError::Json {
        path: path.clone(),
        source,
    })?;
    writer.flush().map_err(io_error)?;

    Ok(path)
}

/// Exports every record of binding `M` from `uow`.
pub fn export_binding<M: EntityBinding>(uow: &UnitOfWork, dir: &Path) -> ServiceResult<PathBuf> {
    let items: Vec<M> = M::repository(uow)
        .get_all()?
        .into_iter()
        .map(M::from_entity)
        .collect();

    match write_collection(dir, M::COLLECTION, &items) {
        Ok(path) => {
            info!(
                "event=export module=export status=ok collection={} items={}",
                M::COLLECTION,
                items.len()
            );
            Ok(path)
        }
        Err(err) => {
            error!(
                "event=export module=export status=error collection={} error={}",
                M::COLLECTION,
                err
            );
            Err(err.into())
        }
    }
}

/// Exports all seven collections, returning the written paths in a fixed
/// order (organizations first, business trips last).
pub fn export_all(uow: &UnitOfWork, dir: &Path) -> ServiceResult<Vec<PathBuf>> {
    Ok(vec![
        export_binding::<OrganizationDto>(uow, dir)?,
        export_binding::<DepartmentDto>(uow, dir)?,
        export_binding::<PostDto>(uow, dir)?,
        export_binding::<EmployeeDto>(uow, dir)?,
        export_binding::<LeaveScheduleDto>(uow, dir)?,
        export_binding::<AnnualLeaveDto>(uow, dir)?,
        export_binding::<BusinessTripDto>(uow, dir)?,
    ])
}
