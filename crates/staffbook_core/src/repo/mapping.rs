//! Table mappings for every entity type.
//!
//! Embedded value groups are flattened into prefixed columns
//! (`birth_date`, `passport_series`, `bank_code`, ...).

use super::entity::{
    date_value, decimal_value, int_value, opt_date_value, opt_id_value, opt_int_value,
    opt_text_value, read_decimal, read_id, read_opt_id, text_value, Entity, LinkTable,
};
use super::repository::{RepoError, RepoResult};
use crate::model::business_trip::BusinessTrip;
use crate::model::department::Department;
use crate::model::employee::{Employee, Gender};
use crate::model::leave::{AnnualLeave, LeaveSchedule};
use crate::model::organization::Organization;
use crate::model::post::Post;
use crate::model::values::{BankDetails, Birth, Contacts, Education, Passport, Requisites};
use crate::model::EntityId;
use rusqlite::types::Value;
use rusqlite::Row;

impl Entity for Organization {
    const NAME: &'static str = "organization";
    const TABLE: &'static str = "organizations";
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "short_name",
        "legal_address",
        "actual_address",
        "phone",
        "email",
        "requisites_tax_number",
        "requisites_registration_number",
        "requisites_classifier_code",
        "bank_name",
        "bank_code",
        "bank_account_number",
        "bank_correspondent_account",
    ];

    fn id(&self) -> EntityId {
        self.id
    }

    fn column_values(&self) -> Vec<Value> {
        vec![
            text_value(&self.name),
            opt_text_value(self.short_name.as_deref()),
            opt_text_value(self.legal_address.as_deref()),
            opt_text_value(self.actual_address.as_deref()),
            opt_text_value(self.phone.as_deref()),
            opt_text_value(self.email.as_deref()),
            opt_text_value(self.requisites.tax_number.as_deref()),
            opt_text_value(self.requisites.registration_number.as_deref()),
            opt_text_value(self.requisites.classifier_code.as_deref()),
            opt_text_value(self.bank.bank_name.as_deref()),
            opt_text_value(self.bank.bank_code.as_deref()),
            opt_text_value(self.bank.account_number.as_deref()),
            opt_text_value(self.bank.correspondent_account.as_deref()),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: read_id(row, Self::TABLE, "id")?,
            name: row.get("name")?,
            short_name: row.get("short_name")?,
            legal_address: row.get("legal_address")?,
            actual_address: row.get("actual_address")?,
            phone: row.get("phone")?,
            email: row.get("email")?,
            requisites: Requisites {
                tax_number: row.get("requisites_tax_number")?,
                registration_number: row.get("requisites_registration_number")?,
                classifier_code: row.get("requisites_classifier_code")?,
            },
            bank: BankDetails {
                bank_name: row.get("bank_name")?,
                bank_code: row.get("bank_code")?,
                account_number: row.get("bank_account_number")?,
                correspondent_account: row.get("bank_correspondent_account")?,
            },
        })
    }
}

impl Entity for Department {
    const NAME: &'static str = "department";
    const TABLE: &'static str = "departments";
    const COLUMNS: &'static [&'static str] = &["name", "manager", "code", "organization_id"];

    fn id(&self) -> EntityId {
        self.id
    }

    fn column_values(&self) -> Vec<Value> {
        vec![
            text_value(&self.name),
            opt_text_value(self.manager.as_deref()),
            opt_text_value(self.code.as_deref()),
            opt_id_value(self.organization_id),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: read_id(row, Self::TABLE, "id")?,
            name: row.get("name")?,
            manager: row.get("manager")?,
            code: row.get("code")?,
            organization_id: read_opt_id(row, Self::TABLE, "organization_id")?,
        })
    }
}

impl Entity for Post {
    const NAME: &'static str = "post";
    const TABLE: &'static str = "posts";
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "unit_count",
        "salary",
        "premium",
        "leave_days",
        "department_id",
    ];

    fn id(&self) -> EntityId {
        self.id
    }

    fn column_values(&self) -> Vec<Value> {
        vec![
            text_value(&self.title),
            int_value(self.unit_count),
            decimal_value(self.salary),
            decimal_value(self.premium),
            int_value(self.leave_days),
            opt_id_value(self.department_id),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: read_id(row, Self::TABLE, "id")?,
            title: row.get("title")?,
            unit_count: row.get("unit_count")?,
            salary: read_decimal(row, Self::TABLE, "salary")?,
            premium: read_decimal(row, Self::TABLE, "premium")?,
            leave_days: row.get("leave_days")?,
            department_id: read_opt_id(row, Self::TABLE, "department_id")?,
        })
    }
}

impl Entity for Employee {
    const NAME: &'static str = "employee";
    const TABLE: &'static str = "employees";
    const COLUMNS: &'static [&'static str] = &[
        "personnel_number",
        "last_name",
        "first_name",
        "middle_name",
        "gender",
        "age",
        "hire_date",
        "birth_date",
        "birth_place",
        "passport_series",
        "passport_number",
        "passport_issued_by",
        "passport_issue_date",
        "contacts_phone",
        "contacts_email",
        "contacts_address",
        "education_level",
        "education_institution",
        "education_specialty",
        "education_graduation_year",
        "post_id",
    ];

    fn id(&self) -> EntityId {
        self.id
    }

    fn column_values(&self) -> Vec<Value> {
        vec![
            text_value(&self.personnel_number),
            text_value(&self.last_name),
            text_value(&self.first_name),
            opt_text_value(self.middle_name.as_deref()),
            opt_text_value(self.gender.map(gender_to_db)),
            opt_int_value(self.age),
            opt_date_value(self.hire_date),
            opt_date_value(self.birth.date),
            opt_text_value(self.birth.place.as_deref()),
            opt_text_value(self.passport.series.as_deref()),
            opt_text_value(self.passport.number.as_deref()),
            opt_text_value(self.passport.issued_by.as_deref()),
            opt_date_value(self.passport.issue_date),
            opt_text_value(self.contacts.phone.as_deref()),
            opt_text_value(self.contacts.email.as_deref()),
            opt_text_value(self.contacts.address.as_deref()),
            opt_text_value(self.education.level.as_deref()),
            opt_text_value(self.education.institution.as_deref()),
            opt_text_value(self.education.specialty.as_deref()),
            opt_int_value(self.education.graduation_year),
            opt_id_value(self.post_id),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        let gender = match row.get::<_, Option<String>>("gender")? {
            Some(value) => Some(parse_gender(&value).ok_or_else(|| {
                RepoError::InvalidData(format!("invalid gender `{value}` in employees.gender"))
            })?),
            None => None,
        };

        Ok(Self {
            id: read_id(row, Self::TABLE, "id")?,
            personnel_number: row.get("personnel_number")?,
            last_name: row.get("last_name")?,
            first_name: row.get("first_name")?,
            middle_name: row.get("middle_name")?,
            gender,
            age: row.get("age")?,
            hire_date: row.get("hire_date")?,
            birth: Birth {
                date: row.get("birth_date")?,
                place: row.get("birth_place")?,
            },
            passport: Passport {
                series: row.get("passport_series")?,
                number: row.get("passport_number")?,
                issued_by: row.get("passport_issued_by")?,
                issue_date: row.get("passport_issue_date")?,
            },
            contacts: Contacts {
                phone: row.get("contacts_phone")?,
                email: row.get("contacts_email")?,
                address: row.get("contacts_address")?,
            },
            education: Education {
                level: row.get("education_level")?,
                institution: row.get("education_institution")?,
                specialty: row.get("education_specialty")?,
                graduation_year: row.get("education_graduation_year")?,
            },
            post_id: read_opt_id(row, Self::TABLE, "post_id")?,
        })
    }
}

impl Entity for LeaveSchedule {
    const NAME: &'static str = "leave schedule";
    const TABLE: &'static str = "leave_schedules";
    const COLUMNS: &'static [&'static str] =
        &["number", "year", "preparation_date", "approval_date"];

    fn id(&self) -> EntityId {
        self.id
    }

    fn column_values(&self) -> Vec<Value> {
        vec![
            text_value(&self.number),
            int_value(self.year),
            opt_date_value(self.preparation_date),
            opt_date_value(self.approval_date),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: read_id(row, Self::TABLE, "id")?,
            number: row.get("number")?,
            year: row.get("year")?,
            preparation_date: row.get("preparation_date")?,
            approval_date: row.get("approval_date")?,
        })
    }
}

impl Entity for AnnualLeave {
    const NAME: &'static str = "annual leave";
    const TABLE: &'static str = "annual_leaves";
    const COLUMNS: &'static [&'static str] = &[
        "scheduled_days",
        "actual_days",
        "scheduled_date",
        "actual_date",
        "employee_id",
        "leave_schedule_id",
    ];

    fn id(&self) -> EntityId {
        self.id
    }

    fn column_values(&self) -> Vec<Value> {
        vec![
            int_value(self.scheduled_days),
            opt_int_value(self.actual_days),
            opt_date_value(self.scheduled_date),
            opt_date_value(self.actual_date),
            opt_id_value(self.employee_id),
            opt_id_value(self.leave_schedule_id),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: read_id(row, Self::TABLE, "id")?,
            scheduled_days: row.get("scheduled_days")?,
            actual_days: row.get("actual_days")?,
            scheduled_date: row.get("scheduled_date")?,
            actual_date: row.get("actual_date")?,
            employee_id: read_opt_id(row, Self::TABLE, "employee_id")?,
            leave_schedule_id: read_opt_id(row, Self::TABLE, "leave_schedule_id")?,
        })
    }
}

impl Entity for BusinessTrip {
    const NAME: &'static str = "business trip";
    const TABLE: &'static str = "business_trips";
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "code",
        "start_date",
        "end_date",
        "destination",
        "purpose",
    ];
    const LINK: Option<LinkTable> = Some(LinkTable {
        table: "business_trip_employees",
        owner_column: "business_trip_id",
        member_column: "employee_id",
    });

    fn id(&self) -> EntityId {
        self.id
    }

    fn column_values(&self) -> Vec<Value> {
        vec![
            text_value(&self.name),
            opt_text_value(self.code.as_deref()),
            date_value(self.start_date),
            date_value(self.end_date),
            opt_text_value(self.destination.as_deref()),
            opt_text_value(self.purpose.as_deref()),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: read_id(row, Self::TABLE, "id")?,
            name: row.get("name")?,
            code: row.get("code")?,
            start_date: row.get("start_date")?,
            end_date: row.get("end_date")?,
            destination: row.get("destination")?,
            purpose: row.get("purpose")?,
            employee_ids: Vec::new(),
        })
    }

    fn linked_ids(&self) -> &[EntityId] {
        &self.employee_ids
    }

    fn set_linked_ids(&mut self, ids: Vec<EntityId>) {
        self.employee_ids = ids;
    }
}

fn gender_to_db(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "male",
        Gender::Female => "female",
    }
}

fn parse_gender(value: &str) -> Option<Gender> {
    match value {
        "male" => Some(Gender::Male),
        "female" => Some(Gender::Female),
        _ => None,
    }
}
