//! Embedded value groups.
//!
//! Value groups are copied along with their owning entity and are stored as
//! prefixed columns of the owner's table. They have no lifecycle of their own.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Birth details of an employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Birth {
    pub date: Option<NaiveDate>,
    pub place: Option<String>,
}

/// Identity document of an employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passport {
    pub series: Option<String>,
    pub number: Option<String>,
    pub issued_by: Option<String>,
    pub issue_date: Option<NaiveDate>,
}

/// Contact channels of an employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contacts {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Highest completed education of an employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub level: Option<String>,
    pub institution: Option<String>,
    pub specialty: Option<String>,
    pub graduation_year: Option<i32>,
}

/// Legal registration codes of an organization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requisites {
    pub tax_number: Option<String>,
    pub registration_number: Option<String>,
    pub classifier_code: Option<String>,
}

/// Settlement bank details of an organization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankDetails {
    pub bank_name: Option<String>,
    pub bank_code: Option<String>,
    pub account_number: Option<String>,
    pub correspondent_account: Option<String>,
}
