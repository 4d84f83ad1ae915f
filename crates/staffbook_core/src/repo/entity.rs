//! Table metadata contract shared by every persisted entity.
//!
//! # Responsibility
//! - Describe how one entity type maps to one SQLite table.
//! - Provide column conversion helpers used by the mapping impls.
//!
//! # Invariants
//! - `column_values()` yields exactly one value per entry of `COLUMNS`, in
//!   the same order. The `id` column is implicit and never listed.
//! - Table and column names are compile-time constants, so building SQL from
//!   them with `format!` never interpolates caller data.

use super::repository::{RepoError, RepoResult};
use crate::model::EntityId;
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::Row;
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

/// Many-to-many link table owned by one side of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkTable {
    pub table: &'static str,
    /// Column pointing at the owning entity.
    pub owner_column: &'static str,
    /// Column pointing at the linked member entity.
    pub member_column: &'static str,
}

/// Persisted entity stored in one table keyed by `id`.
pub trait Entity: Clone {
    /// Singular lowercase name used in logs and errors.
    const NAME: &'static str;
    const TABLE: &'static str;
    /// Non-key columns, in `column_values()` order.
    const COLUMNS: &'static [&'static str];
    /// Link table maintained together with this entity, if any.
    const LINK: Option<LinkTable> = None;

    fn id(&self) -> EntityId;

    fn column_values(&self) -> Vec<Value>;

    fn from_row(row: &Row<'_>) -> RepoResult<Self>;

    /// Member ids written to `LINK` on insert/update.
    fn linked_ids(&self) -> &[EntityId] {
        &[]
    }

    /// Receives member ids loaded from `LINK` after `from_row`.
    fn set_linked_ids(&mut self, _ids: Vec<EntityId>) {}
}

/// `SELECT id, <columns> FROM <table>` for entity `T`.
pub(crate) fn select_sql<T: Entity>() -> String {
    format!("SELECT id, {} FROM {}", T::COLUMNS.join(", "), T::TABLE)
}

pub(crate) fn id_value(id: EntityId) -> Value {
    Value::Text(id.to_string())
}

pub(crate) fn opt_id_value(id: Option<EntityId>) -> Value {
    id.map_or(Value::Null, id_value)
}

pub(crate) fn text_value(value: &str) -> Value {
    Value::Text(value.to_string())
}

pub(crate) fn opt_text_value(value: Option<&str>) -> Value {
    value.map_or(Value::Null, text_value)
}

pub(crate) fn int_value(value: i32) -> Value {
    Value::Integer(i64::from(value))
}

pub(crate) fn opt_int_value(value: Option<i32>) -> Value {
    value.map_or(Value::Null, int_value)
}

pub(crate) fn date_value(value: NaiveDate) -> Value {
    Value::Text(value.format("%Y-%m-%d").to_string())
}

pub(crate) fn opt_date_value(value: Option<NaiveDate>) -> Value {
    value.map_or(Value::Null, date_value)
}

/// Decimals are stored as canonical text to keep money values exact.
pub(crate) fn decimal_value(value: Decimal) -> Value {
    Value::Text(value.to_string())
}

pub(crate) fn read_id(row: &Row<'_>, table: &str, column: &str) -> RepoResult<EntityId> {
    let text: String = row.get(column)?;
    parse_id(&text, table, column)
}

pub(crate) fn read_opt_id(
    row: &Row<'_>,
    table: &str,
    column: &str,
) -> RepoResult<Option<EntityId>> {
    match row.get::<_, Option<String>>(column)? {
        Some(text) => Ok(Some(parse_id(&text, table, column)?)),
        None => Ok(None),
    }
}

pub(crate) fn read_decimal(row: &Row<'_>, table: &str, column: &str) -> RepoResult<Decimal> {
    let text: String = row.get(column)?;
    Decimal::from_str(&text).map_err(|_| {
        RepoError::InvalidData(format!("invalid decimal `{text}` in {table}.{column}"))
    })
}

pub(crate) fn parse_id(text: &str, table: &str, column: &str) -> RepoResult<EntityId> {
    Uuid::parse_str(text)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid `{text}` in {table}.{column}")))
}
