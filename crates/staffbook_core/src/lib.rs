//! Core persistence and orchestration layer for HR records.
//!
//! Callers talk to per-entity services; services work through a unit of work
//! that owns one SQLite connection and commits staged repository changes
//! atomically.

pub mod config;
pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod paging;
pub mod repo;
pub mod service;
pub mod unit_of_work;

pub use config::{ConfigError, CoreConfig, StorageTarget};
pub use export::{export_all, ExportError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::business_trip::BusinessTrip;
pub use model::department::Department;
pub use model::employee::{Employee, Gender};
pub use model::leave::{AnnualLeave, LeaveSchedule};
pub use model::organization::Organization;
pub use model::post::Post;
pub use model::values::{BankDetails, Birth, Contacts, Education, Passport, Requisites};
pub use model::EntityId;
pub use paging::PageInfo;
pub use repo::criteria::Criteria;
pub use repo::repository::{RepoError, RepoResult, Repository, SqliteRepository};
pub use service::binding::EntityBinding;
pub use service::dto::annual_leave::{AnnualLeaveDto, AnnualLeaveFilter};
pub use service::dto::business_trip::{BusinessTripDto, BusinessTripFilter};
pub use service::dto::department::{DepartmentDto, DepartmentFilter};
pub use service::dto::employee::{EmployeeDto, EmployeeFilter};
pub use service::dto::leave_schedule::{LeaveScheduleDto, LeaveScheduleFilter};
pub use service::dto::organization::{OrganizationDto, OrganizationFilter};
pub use service::dto::post::{PostDto, PostFilter};
pub use service::entity_service::EntityService;
pub use service::error::{ErrorKind, ServiceError, ServiceResult};
pub use service::validation::ValidationError;
pub use service::{
    AnnualLeaveService, BusinessTripService, DepartmentService, EmployeeService,
    LeaveScheduleService, OrganizationService, PostService,
};
pub use unit_of_work::UnitOfWork;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
