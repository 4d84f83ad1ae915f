//! Unit of work over one SQLite storage context.
//!
//! # Responsibility
//! - Own the storage context for one logical operation.
//! - Hand out exactly one repository per entity type, created on first use.
//! - Apply every staged change in a single transaction on `save`.
//!
//! # Invariants
//! - `save` is all-or-nothing: on any failure the transaction rolls back and
//!   the staged set is discarded.
//! - Repositories are memoized and never rebuilt for the same unit.
//! - The storage context is not shared with any other unit of work.

use crate::config::StorageTarget;
use crate::db::migrations::latest_version;
use crate::db::{open_db_in_memory, open_target};
use crate::model::business_trip::BusinessTrip;
use crate::model::department::Department;
use crate::model::employee::Employee;
use crate::model::leave::{AnnualLeave, LeaveSchedule};
use crate::model::organization::Organization;
use crate::model::post::Post;
use crate::model::EntityId;
use crate::repo::entity::{id_value, Entity, LinkTable};
use crate::repo::repository::{RepoError, RepoResult, SqliteRepository};
use log::{debug, error, info, warn};
use once_cell::unsync::OnceCell;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Transaction};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

/// One pending mutation recorded by a repository.
#[derive(Debug, Clone)]
pub(crate) enum StagedChange {
    Insert {
        table: &'static str,
        columns: &'static [&'static str],
        id: EntityId,
        values: Vec<Value>,
        links: Option<StagedLinks>,
    },
    Update {
        entity: &'static str,
        table: &'static str,
        columns: &'static [&'static str],
        id: EntityId,
        values: Vec<Value>,
        links: Option<StagedLinks>,
    },
    Delete {
        entity: &'static str,
        table: &'static str,
        id: EntityId,
    },
    DeleteAll {
        table: &'static str,
    },
}

/// Full replacement set for one owner's link rows.
#[derive(Debug, Clone)]
pub(crate) struct StagedLinks {
    link: LinkTable,
    member_ids: Vec<EntityId>,
}

impl StagedChange {
    pub(crate) fn insert<T: Entity>(item: &T) -> Self {
        Self::Insert {
            table: T::TABLE,
            columns: T::COLUMNS,
            id: item.id(),
            values: item.column_values(),
            links: staged_links(item),
        }
    }

    pub(crate) fn update<T: Entity>(item: &T) -> Self {
        Self::Update {
            entity: T::NAME,
            table: T::TABLE,
            columns: T::COLUMNS,
            id: item.id(),
            values: item.column_values(),
            links: staged_links(item),
        }
    }

    pub(crate) fn delete<T: Entity>(id: EntityId) -> Self {
        Self::Delete {
            entity: T::NAME,
            table: T::TABLE,
            id,
        }
    }

    pub(crate) fn delete_all<T: Entity>() -> Self {
        Self::DeleteAll { table: T::TABLE }
    }

    fn apply(&self, tx: &Transaction<'_>) -> RepoResult<()> {
        match self {
            Self::Insert {
                table,
                columns,
                id,
                values,
                links,
            } => {
                let placeholders = (1..=columns.len() + 1)
                    .map(|index| format!("?{index}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                let sql = format!(
                    "INSERT INTO {table} (id, {}) VALUES ({placeholders});",
                    columns.join(", ")
                );
                let bind = std::iter::once(id_value(*id)).chain(values.iter().cloned());
                tx.execute(&sql, params_from_iter(bind))?;
                if let Some(links) = links {
                    links.replace(tx, *id)?;
                }
            }
            Self::Update {
                entity,
                table,
                columns,
                id,
                values,
                links,
            } => {
                let assignments = columns
                    .iter()
                    .enumerate()
                    .map(|(index, column)| format!("{column} = ?{}", index + 1))
                    .collect::<Vec<_>>()
                    .join(", ");
                let sql = format!(
                    "UPDATE {table} SET {assignments} WHERE id = ?{};",
                    columns.len() + 1
                );
                let bind = values.iter().cloned().chain(std::iter::once(id_value(*id)));
                let changed = tx.execute(&sql, params_from_iter(bind))?;
                if changed == 0 {
                    return Err(RepoError::NotFound {
                        entity: *entity,
                        id: *id,
                    });
                }
                if let Some(links) = links {
                    links.replace(tx, *id)?;
                }
            }
            Self::Delete { entity, table, id } => {
                let changed =
                    tx.execute(&format!("DELETE FROM {table} WHERE id = ?1;"), [id.to_string()])?;
                if changed == 0 {
                    return Err(RepoError::NotFound {
                        entity: *entity,
                        id: *id,
                    });
                }
            }
            Self::DeleteAll { table } => {
                tx.execute(&format!("DELETE FROM {table};"), [])?;
            }
        }
        Ok(())
    }
}

impl StagedLinks {
    fn replace(&self, tx: &Transaction<'_>, owner: EntityId) -> RepoResult<()> {
        let owner = owner.to_string();
        tx.execute(
            &format!(
                "DELETE FROM {} WHERE {} = ?1;",
                self.link.table, self.link.owner_column
            ),
            [owner.as_str()],
        )?;
        let insert = format!(
            "INSERT INTO {} ({}, {}) VALUES (?1, ?2);",
            self.link.table, self.link.owner_column, self.link.member_column
        );
        for member in &self.member_ids {
            tx.execute(&insert, [owner.as_str(), member.to_string().as_str()])?;
        }
        Ok(())
    }
}

fn staged_links<T: Entity>(item: &T) -> Option<StagedLinks> {
    T::LINK.map(|link| StagedLinks {
        link,
        member_ids: item.linked_ids().to_vec(),
    })
}

/// Connection plus the changes staged against it.
pub(crate) struct StorageContext {
    conn: Connection,
    staged: RefCell<Vec<StagedChange>>,
}

impl StorageContext {
    fn new(conn: Connection) -> Self {
        Self {
            conn,
            staged: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }

    pub(crate) fn stage(&self, change: StagedChange) {
        self.staged.borrow_mut().push(change);
    }

    fn pending(&self) -> usize {
        self.staged.borrow().len()
    }

    fn discard(&self) -> usize {
        self.staged.take().len()
    }

    fn commit(&self) -> RepoResult<usize> {
        let staged = self.staged.take();
        if staged.is_empty() {
            return Ok(0);
        }

        let tx = self.conn.unchecked_transaction()?;
        for change in &staged {
            change.apply(&tx)?;
        }
        tx.commit()?;
        Ok(staged.len())
    }
}

/// Transactional scope binding the seven repositories to one connection.
///
/// Construct one per logical operation and drop (or `dispose`) it at the
/// end. It is not `Send`; keep it on the thread that opened it.
pub struct UnitOfWork {
    context: Rc<StorageContext>,
    organizations: OnceCell<SqliteRepository<Organization>>,
    departments: OnceCell<SqliteRepository<Department>>,
    posts: OnceCell<SqliteRepository<Post>>,
    employees: OnceCell<SqliteRepository<Employee>>,
    leave_schedules: OnceCell<SqliteRepository<LeaveSchedule>>,
    annual_leaves: OnceCell<SqliteRepository<AnnualLeave>>,
    business_trips: OnceCell<SqliteRepository<BusinessTrip>>,
}

impl UnitOfWork {
    /// Opens the storage target and returns a ready unit of work.
    pub fn open(target: &StorageTarget) -> RepoResult<Self> {
        let conn = open_target(target)?;
        Self::try_new(conn)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> RepoResult<Self> {
        let conn = open_db_in_memory()?;
        Self::try_new(conn)
    }

    /// Wraps an already opened connection.
    ///
    /// The connection must be fully migrated, as returned by `db::open_db`.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        debug!("event=uow_open module=uow status=ok");
        Ok(Self {
            context: Rc::new(StorageContext::new(conn)),
            organizations: OnceCell::new(),
            departments: OnceCell::new(),
            posts: OnceCell::new(),
            employees: OnceCell::new(),
            leave_schedules: OnceCell::new(),
            annual_leaves: OnceCell::new(),
            business_trips: OnceCell::new(),
        })
    }

    pub fn organizations(&self) -> &SqliteRepository<Organization> {
        self.organizations.get_or_init(|| self.repository())
    }

    pub fn departments(&self) -> &SqliteRepository<Department> {
        self.departments.get_or_init(|| self.repository())
    }

    pub fn posts(&self) -> &SqliteRepository<Post> {
        self.posts.get_or_init(|| self.repository())
    }

    pub fn employees(&self) -> &SqliteRepository<Employee> {
        self.employees.get_or_init(|| self.repository())
    }

    pub fn leave_schedules(&self) -> &SqliteRepository<LeaveSchedule> {
        self.leave_schedules.get_or_init(|| self.repository())
    }

    pub fn annual_leaves(&self) -> &SqliteRepository<AnnualLeave> {
        self.annual_leaves.get_or_init(|| self.repository())
    }

    pub fn business_trips(&self) -> &SqliteRepository<BusinessTrip> {
        self.business_trips.get_or_init(|| self.repository())
    }

    /// Number of changes staged since the last save.
    pub fn pending_changes(&self) -> usize {
        self.context.pending()
    }

    /// Drops every staged change without touching storage.
    pub fn discard_changes(&self) -> usize {
        self.context.discard()
    }

    /// Commits all staged changes atomically.
    ///
    /// Returns the number of applied changes. On error nothing is durable and
    /// the staged set is gone.
    pub fn save(&self) -> RepoResult<usize> {
        let started_at = Instant::now();
        let pending = self.context.pending();
        match self.context.commit() {
            Ok(applied) => {
                info!(
                    "event=uow_save module=uow status=ok changes={} duration_ms={}",
                    applied,
                    started_at.elapsed().as_millis()
                );
                Ok(applied)
            }
            Err(err) => {
                let error_code = if err.is_constraint_violation() {
                    "constraint_violation"
                } else {
                    "commit_failed"
                };
                error!(
                    "event=uow_save module=uow status=error changes={} duration_ms={} error_code={} error={}",
                    pending,
                    started_at.elapsed().as_millis(),
                    error_code,
                    err
                );
                Err(err)
            }
        }
    }

    /// Releases the storage context.
    pub fn dispose(self) {}

    fn repository<T: Entity>(&self) -> SqliteRepository<T> {
        SqliteRepository::new(Rc::clone(&self.context))
    }
}

impl Drop for UnitOfWork {
    fn drop(&mut self) {
        let discarded = self.context.discard();
        if discarded > 0 {
            warn!("event=uow_dispose module=uow status=discarded changes={discarded}");
        } else {
            debug!("event=uow_dispose module=uow status=ok");
        }
    }
}
