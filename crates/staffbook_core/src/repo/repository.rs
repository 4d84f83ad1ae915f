//! Generic repository contract and its SQLite implementation.
//!
//! # Responsibility
//! - Provide uniform CRUD and predicate queries for every entity type.
//! - Stage mutations on the owning unit of work instead of writing.
//!
//! # Invariants
//! - No method here performs a durable write. Mutations become visible only
//!   after `UnitOfWork::save` succeeds.
//! - Reads observe the committed state of the storage context.
//! - Rows are returned in storage insertion order (`rowid`).

use super::entity::{parse_id, select_sql, Entity};
use crate::db::DbError;
use crate::model::EntityId;
use crate::unit_of_work::{StagedChange, StorageContext};
use rusqlite::Connection;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;
use std::rc::Rc;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository and unit-of-work error.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound {
        entity: &'static str,
        id: EntityId,
    },
    /// Connection schema is not at the version this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Persisted data cannot be converted to a valid entity.
    InvalidData(String),
}

impl RepoError {
    /// True when storage refused a commit over a schema constraint.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::Db(err) if err.is_constraint_violation())
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "unit of work requires schema version {expected_version}, got {actual_version}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::UninitializedConnection { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface shared by all entity types.
pub trait Repository<T: Entity> {
    /// Stages a new record.
    fn create(&self, item: &T);
    /// Stages many new records, keeping their order.
    fn create_series(&self, items: &[T]);
    /// Loads one record or fails with `RepoError::NotFound`.
    fn find_by_id(&self, id: EntityId) -> RepoResult<T>;
    fn get_all(&self) -> RepoResult<Vec<T>>;
    /// Returns every record the predicate accepts.
    fn get(&self, predicate: &dyn Fn(&T) -> bool) -> RepoResult<Vec<T>>;
    /// Returns any one record, `None` when the table is empty.
    fn get_first(&self) -> RepoResult<Option<T>>;
    fn remove(&self, item: &T);
    fn remove_series(&self, items: &[T]);
    fn remove_all(&self);
    /// Stages a full replace of the record with the same id.
    fn update(&self, item: &T);
}

/// SQLite-backed repository bound to one unit of work.
pub struct SqliteRepository<T: Entity> {
    context: Rc<StorageContext>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> SqliteRepository<T> {
    pub(crate) fn new(context: Rc<StorageContext>) -> Self {
        Self {
            context,
            _entity: PhantomData,
        }
    }

    fn conn(&self) -> &Connection {
        self.context.connection()
    }

    fn query(&self, sql: &str, params: impl rusqlite::Params) -> RepoResult<Vec<T>> {
        let mut stmt = self.conn().prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(T::from_row(row)?);
        }
        self.attach_links(&mut items)?;
        Ok(items)
    }

    fn attach_links(&self, items: &mut [T]) -> RepoResult<()> {
        let Some(link) = T::LINK else {
            return Ok(());
        };
        if items.is_empty() {
            return Ok(());
        }

        let mut stmt = self.conn().prepare(&format!(
            "SELECT {owner}, {member} FROM {table} ORDER BY rowid",
            owner = link.owner_column,
            member = link.member_column,
            table = link.table,
        ))?;
        let mut rows = stmt.query([])?;
        let mut members: HashMap<EntityId, Vec<EntityId>> = HashMap::new();
        while let Some(row) = rows.next()? {
            let owner: String = row.get(0)?;
            let member: String = row.get(1)?;
            members
                .entry(parse_id(&owner, link.table, link.owner_column)?)
                .or_default()
                .push(parse_id(&member, link.table, link.member_column)?);
        }

        for item in items.iter_mut() {
            item.set_linked_ids(members.remove(&item.id()).unwrap_or_default());
        }
        Ok(())
    }
}

impl<T: Entity> Repository<T> for SqliteRepository<T> {
    fn create(&self, item: &T) {
        self.context.stage(StagedChange::insert(item));
    }

    fn create_series(&self, items: &[T]) {
        for item in items {
            self.create(item);
        }
    }

    fn find_by_id(&self, id: EntityId) -> RepoResult<T> {
        let sql = format!("{} WHERE id = ?1", select_sql::<T>());
        self.query(&sql, [id.to_string()])?
            .into_iter()
            .next()
            .ok_or(RepoError::NotFound {
                entity: T::NAME,
                id,
            })
    }

    fn get_all(&self) -> RepoResult<Vec<T>> {
        let sql = format!("{} ORDER BY rowid", select_sql::<T>());
        self.query(&sql, [])
    }

    fn get(&self, predicate: &dyn Fn(&T) -> bool) -> RepoResult<Vec<T>> {
        let mut items = self.get_all()?;
        items.retain(|item| predicate(item));
        Ok(items)
    }

    fn get_first(&self) -> RepoResult<Option<T>> {
        let sql = format!("{} ORDER BY rowid LIMIT 1", select_sql::<T>());
        Ok(self.query(&sql, [])?.into_iter().next())
    }

    fn remove(&self, item: &T) {
        self.context.stage(StagedChange::delete::<T>(item.id()));
    }

    fn remove_series(&self, items: &[T]) {
        for item in items {
            self.remove(item);
        }
    }

    fn remove_all(&self) {
        self.context.stage(StagedChange::delete_all::<T>());
    }

    fn update(&self, item: &T) {
        self.context.stage(StagedChange::update(item));
    }
}
