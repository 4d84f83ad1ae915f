//! SQLite storage for the HR record store.
//!
//! # Responsibility
//! - Open file or in-memory databases and bring their schema up to date.
//! - Report which database or schema step failed.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - Records are never read or written before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory, open_target};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    /// The database at `target` could not be opened or configured.
    Open {
        target: String,
        source: rusqlite::Error,
    },
    /// Schema step `version` (`name`) failed; no step of the run was kept.
    Migration {
        version: u32,
        name: &'static str,
        source: rusqlite::Error,
    },
    /// The file was written by a newer build of the record store.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Statement failure while reading or committing records.
    Sqlite(rusqlite::Error),
}

impl DbError {
    /// True for UNIQUE, FOREIGN KEY, CHECK and NOT NULL violations.
    pub fn is_constraint_violation(&self) -> bool {
        let source = match self {
            Self::Open { source, .. } | Self::Migration { source, .. } | Self::Sqlite(source) => {
                source
            }
            Self::UnsupportedSchemaVersion { .. } => return false,
        };
        matches!(
            source.sqlite_error_code(),
            Some(rusqlite::ErrorCode::ConstraintViolation)
        )
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { target, source } => {
                write!(f, "cannot open HR database `{target}`: {source}")
            }
            Self::Migration {
                version,
                name,
                source,
            } => write!(f, "schema step {version} ({name}) failed: {source}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "HR database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } | Self::Migration { source, .. } | Self::Sqlite(source) => {
                Some(source)
            }
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
