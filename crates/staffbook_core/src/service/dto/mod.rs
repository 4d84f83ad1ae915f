//! Transport models (DTOs), their filter models and entity bindings.

pub mod annual_leave;
pub mod business_trip;
pub mod department;
pub mod employee;
pub mod leave_schedule;
pub mod organization;
pub mod post;
