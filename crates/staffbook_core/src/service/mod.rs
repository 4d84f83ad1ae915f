//! Entity services: the only layer exposed to callers.
//!
//! # Responsibility
//! - Translate between transport models (DTOs) and persistence entities.
//! - Apply filtering, paging and cross-entity integrity rules.
//! - Keep callers decoupled from the unit of work and storage details.

pub mod binding;
pub mod dto;
pub mod entity_service;
pub mod error;
pub mod validation;

use dto::annual_leave::AnnualLeaveDto;
use dto::business_trip::BusinessTripDto;
use dto::department::DepartmentDto;
use dto::employee::EmployeeDto;
use dto::leave_schedule::LeaveScheduleDto;
use dto::organization::OrganizationDto;
use dto::post::PostDto;
use entity_service::EntityService;

pub type OrganizationService = EntityService<OrganizationDto>;
pub type DepartmentService = EntityService<DepartmentDto>;
pub type PostService = EntityService<PostDto>;
pub type EmployeeService = EntityService<EmployeeDto>;
pub type LeaveScheduleService = EntityService<LeaveScheduleDto>;
pub type AnnualLeaveService = EntityService<AnnualLeaveDto>;
pub type BusinessTripService = EntityService<BusinessTripDto>;
