//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the generic per-entity data access contract.
//! - Isolate SQLite table mapping from service orchestration.
//!
//! # Invariants
//! - Repository writes are staged on the owning unit of work, never applied
//!   directly.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod criteria;
pub mod entity;
mod mapping;
pub mod repository;
