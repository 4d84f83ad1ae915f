//! Employee entity.

use super::values::{Birth, Contacts, Education, Passport};
use super::EntityId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

/// Person employed on a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: EntityId,
    /// Organization-wide unique personnel number.
    pub personnel_number: String,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub gender: Option<Gender>,
    pub age: Option<i32>,
    pub hire_date: Option<NaiveDate>,
    pub birth: Birth,
    pub passport: Passport,
    pub contacts: Contacts,
    pub education: Education,
    pub post_id: Option<EntityId>,
}
