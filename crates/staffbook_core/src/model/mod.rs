//! Persistence entities for the HR record store.
//!
//! # Responsibility
//! - Define the stored shape of every HR record type.
//! - Keep embedded value groups as plain nested values with no identity.
//!
//! # Invariants
//! - Every entity is identified by a stable `EntityId`.
//! - Foreign keys are optional back-pointers; the parent side owns the
//!   relationship for delete purposes.
//! - Entities carry no behavior beyond small derived helpers.

use uuid::Uuid;

pub mod business_trip;
pub mod department;
pub mod employee;
pub mod leave;
pub mod organization;
pub mod post;
pub mod values;

/// Stable primary key shared by every entity table.
pub type EntityId = Uuid;
