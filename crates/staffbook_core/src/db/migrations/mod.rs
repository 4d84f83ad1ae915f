//! Schema migrations for the HR record store.
//!
//! # Responsibility
//! - Keep the ordered list of schema steps.
//! - Bring a connection up to the latest step inside one transaction.
//!
//! # Invariants
//! - Step versions start at 1 and increase by one.
//! - `PRAGMA user_version` always equals the last applied step.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::{Connection, Transaction};

struct Step {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const STEPS: &[Step] = &[
    Step {
        version: 1,
        name: "organizations_departments_posts_employees",
        sql: include_str!("0001_init.sql"),
    },
    Step {
        version: 2,
        name: "leaves_and_business_trips",
        sql: include_str!("0002_leaves_and_trips.sql"),
    },
];

/// Schema version this binary writes and expects.
pub fn latest_version() -> u32 {
    STEPS.last().map_or(0, |step| step.version)
}

/// Versions not yet applied to `conn`, in application order.
pub fn pending_versions(conn: &Connection) -> DbResult<Vec<u32>> {
    let current = user_version(conn)?;
    ensure_supported(current)?;
    Ok(STEPS
        .iter()
        .filter(|step| step.version > current)
        .map(|step| step.version)
        .collect())
}

/// Applies every pending step. A failed step rolls back all of them.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from_version = user_version(conn)?;
    ensure_supported(from_version)?;

    let pending: Vec<&Step> = STEPS
        .iter()
        .filter(|step| step.version > from_version)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in pending {
        apply_step(&tx, step)?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={} to_version={}",
        from_version,
        latest_version()
    );
    Ok(())
}

fn apply_step(tx: &Transaction<'_>, step: &Step) -> DbResult<()> {
    tx.execute_batch(step.sql)
        .and_then(|()| tx.pragma_update(None, "user_version", step.version))
        .map_err(|source| DbError::Migration {
            version: step.version,
            name: step.name,
            source,
        })?;
    debug!(
        "event=db_migrate_step module=db status=ok version={} name={}",
        step.version, step.name
    );
    Ok(())
}

fn ensure_supported(db_version: u32) -> DbResult<()> {
    let latest_supported = latest_version();
    if db_version > latest_supported {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        });
    }
    Ok(())
}

fn user_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))?)
}

#[cfg(test)]
mod tests {
    use super::{latest_version, STEPS};

    #[test]
    fn step_versions_are_contiguous_from_one() {
        for (index, step) in STEPS.iter().enumerate() {
            assert_eq!(step.version as usize, index + 1, "step {}", step.name);
        }
        assert_eq!(latest_version() as usize, STEPS.len());
    }
}
