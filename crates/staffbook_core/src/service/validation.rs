//! Field-level checks applied while mapping DTOs to entities.
//!
//! # Invariants
//! - Checks never modify values; a DTO that passes is stored as given.
//! - Error messages name fields, never echo personal data.

use crate::model::EntityId;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9()\-\s]{5,20}$").expect("valid phone regex"));

/// DTO validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Edit requires an id.
    MissingId,
    /// The nil UUID is never a valid record id.
    NilId,
    EmptyField(&'static str),
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    NegativeAmount(&'static str),
    InvalidFormat(&'static str),
    /// `end` is earlier than `start`.
    DateOrder {
        start: &'static str,
        end: &'static str,
    },
    /// A referenced record does not exist.
    UnknownReference {
        field: &'static str,
        id: EntityId,
    },
    DuplicateReference {
        field: &'static str,
        id: EntityId,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingId => f.write_str("id is required"),
            Self::NilId => f.write_str("id must not be the nil uuid"),
            Self::EmptyField(field) => write!(f, "`{field}` must not be empty"),
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "`{field}` must be within {min}..={max}, got {value}"),
            Self::NegativeAmount(field) => write!(f, "`{field}` must not be negative"),
            Self::InvalidFormat(field) => write!(f, "`{field}` has an invalid format"),
            Self::DateOrder { start, end } => {
                write!(f, "`{end}` must not be earlier than `{start}`")
            }
            Self::UnknownReference { field, id } => {
                write!(f, "`{field}` references a missing record: {id}")
            }
            Self::DuplicateReference { field, id } => {
                write!(f, "`{field}` lists the same record twice: {id}")
            }
        }
    }
}

impl Error for ValidationError {}

pub type ValidationResult = Result<(), ValidationError>;

pub fn require_text(field: &'static str, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}

pub fn check_range(field: &'static str, value: i32, min: i32, max: i32) -> ValidationResult {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            value: i64::from(value),
            min: i64::from(min),
            max: i64::from(max),
        });
    }
    Ok(())
}

pub fn check_opt_range(
    field: &'static str,
    value: Option<i32>,
    min: i32,
    max: i32,
) -> ValidationResult {
    match value {
        Some(value) => check_range(field, value, min, max),
        None => Ok(()),
    }
}

pub fn check_amount(field: &'static str, value: Decimal) -> ValidationResult {
    if value < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount(field));
    }
    Ok(())
}

pub fn check_email(field: &'static str, value: Option<&str>) -> ValidationResult {
    match value {
        Some(value) if !EMAIL_RE.is_match(value) => Err(ValidationError::InvalidFormat(field)),
        _ => Ok(()),
    }
}

pub fn check_phone(field: &'static str, value: Option<&str>) -> ValidationResult {
    match value {
        Some(value) if !PHONE_RE.is_match(value) => Err(ValidationError::InvalidFormat(field)),
        _ => Ok(()),
    }
}

pub fn check_date_order(
    start_field: &'static str,
    start: Option<NaiveDate>,
    end_field: &'static str,
    end: Option<NaiveDate>,
) -> ValidationResult {
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            return Err(ValidationError::DateOrder {
                start: start_field,
                end: end_field,
            });
        }
    }
    Ok(())
}

pub fn check_unique_ids(field: &'static str, ids: &[EntityId]) -> ValidationResult {
    let mut seen = HashSet::with_capacity(ids.len());
    for id in ids {
        if !seen.insert(*id) {
            return Err(ValidationError::DuplicateReference { field, id: *id });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        check_amount, check_date_order, check_email, check_phone, check_range, check_unique_ids,
        require_text, ValidationError,
    };
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    #[test]
    fn require_text_rejects_blank_values() {
        assert_eq!(
            require_text("name", "  \t"),
            Err(ValidationError::EmptyField("name"))
        );
        assert!(require_text("name", "IT").is_ok());
    }

    #[test]
    fn range_bounds_are_inclusive() {
        assert!(check_range("age", 14, 14, 120).is_ok());
        assert!(check_range("age", 120, 14, 120).is_ok());
        let err = check_range("age", 121, 14, 120).unwrap_err();
        assert!(err.to_string().contains("14..=120"));
    }

    #[test]
    fn amounts_accept_zero_and_reject_negative() {
        assert!(check_amount("salary", Decimal::ZERO).is_ok());
        assert_eq!(
            check_amount("salary", Decimal::new(-1, 2)),
            Err(ValidationError::NegativeAmount("salary"))
        );
    }

    #[test]
    fn contact_formats_are_checked_when_present() {
        assert!(check_email("email", None).is_ok());
        assert!(check_email("email", Some("hr@example.com")).is_ok());
        assert!(check_email("email", Some("not-an-email")).is_err());
        assert!(check_phone("phone", Some("+7 (495) 123-45-67")).is_ok());
        assert!(check_phone("phone", Some("call me")).is_err());
    }

    #[test]
    fn date_order_requires_end_after_start() {
        let start = NaiveDate::from_ymd_opt(2024, 5, 10);
        let end = NaiveDate::from_ymd_opt(2024, 5, 1);
        assert_eq!(
            check_date_order("start_date", start, "end_date", end),
            Err(ValidationError::DateOrder {
                start: "start_date",
                end: "end_date",
            })
        );
        assert!(check_date_order("start_date", start, "end_date", None).is_ok());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let id = Uuid::new_v4();
        assert!(check_unique_ids("employee_ids", &[id, Uuid::new_v4()]).is_ok());
        assert_eq!(
            check_unique_ids("employee_ids", &[id, id]),
            Err(ValidationError::DuplicateReference {
                field: "employee_ids",
                id,
            })
        );
    }
}
