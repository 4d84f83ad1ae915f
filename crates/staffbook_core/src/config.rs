//! Storage target descriptors and core runtime settings.
//!
//! # Responsibility
//! - Parse connection strings into a `StorageTarget`.
//! - Carry defaults shared by services and the CLI.
//!
//! # Invariants
//! - An empty connection string is rejected, never mapped to a default path.
//! - `page_size` is always at least 1.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Default number of items per page used by entity services.
pub const DEFAULT_PAGE_SIZE: usize = 10;

const MEMORY_MARKER: &str = ":memory:";
const SQLITE_SCHEME: &str = "sqlite://";
const DATA_SOURCE_KEYS: &[&str] = &["data source", "datasource", "filename"];

/// Where a unit of work should open its storage context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageTarget {
    /// SQLite database file, created on first open.
    File(PathBuf),
    /// Private in-memory database, discarded when the connection closes.
    InMemory,
}

impl StorageTarget {
    /// Parses a connection string.
    ///
    /// Accepted forms:
    /// - `:memory:`
    /// - `sqlite://<path>` or `sqlite://:memory:`
    /// - `Data Source=<path>;...` (keys are case-insensitive, other pairs ignored)
    /// - a plain file path
    pub fn parse(connection_string: &str) -> Result<Self, ConfigError> {
        let trimmed = connection_string.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyConnectionString);
        }

        if let Some(rest) = trimmed.strip_prefix(SQLITE_SCHEME) {
            return Self::from_source(rest);
        }

        if trimmed.contains('=') {
            for pair in trimmed.split(';') {
                let Some((key, value)) = pair.split_once('=') else {
                    continue;
                };
                let key = key.trim().to_ascii_lowercase();
                if DATA_SOURCE_KEYS.contains(&key.as_str()) {
                    return Self::from_source(value);
                }
            }
            return Err(ConfigError::MissingDataSource(trimmed.to_string()));
        }

        Self::from_source(trimmed)
    }

    fn from_source(source: &str) -> Result<Self, ConfigError> {
        let source = source.trim();
        if source.is_empty() {
            return Err(ConfigError::EmptyConnectionString);
        }
        if source.eq_ignore_ascii_case(MEMORY_MARKER) {
            return Ok(Self::InMemory);
        }
        Ok(Self::File(PathBuf::from(source)))
    }
}

impl Display for StorageTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::InMemory => f.write_str(MEMORY_MARKER),
        }
    }
}

/// Core settings resolved once at process start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub storage: StorageTarget,
    pub page_size: usize,
    pub log_level: &'static str,
}

impl CoreConfig {
    /// Builds a config for the given storage target with default settings.
    pub fn new(storage: StorageTarget) -> Self {
        Self {
            storage,
            page_size: DEFAULT_PAGE_SIZE,
            log_level: default_log_level(),
        }
    }

    /// Overrides the page size. Zero is rejected.
    pub fn with_page_size(mut self, page_size: usize) -> Result<Self, ConfigError> {
        if page_size == 0 {
            return Err(ConfigError::InvalidPageSize(page_size));
        }
        self.page_size = page_size;
        Ok(self)
    }
}

/// Configuration parsing errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyConnectionString,
    MissingDataSource(String),
    InvalidPageSize(usize),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyConnectionString => f.write_str("connection string cannot be empty"),
            Self::MissingDataSource(value) => {
                write!(f, "connection string `{value}` has no `Data Source` entry")
            }
            Self::InvalidPageSize(value) => write!(f, "page size must be positive, got {value}"),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig, StorageTarget, DEFAULT_PAGE_SIZE};
    use std::path::PathBuf;

    #[test]
    fn parse_accepts_memory_marker_in_every_form() {
        assert_eq!(StorageTarget::parse(":memory:"), Ok(StorageTarget::InMemory));
        assert_eq!(
            StorageTarget::parse("sqlite://:memory:"),
            Ok(StorageTarget::InMemory)
        );
        assert_eq!(
            StorageTarget::parse("Data Source=:memory:"),
            Ok(StorageTarget::InMemory)
        );
    }

    #[test]
    fn parse_reads_data_source_from_key_value_pairs() {
        let target =
            StorageTarget::parse("Mode=ReadWrite; data source = /var/hr/staff.db ;Cache=Shared")
                .expect("data source should parse");
        assert_eq!(target, StorageTarget::File(PathBuf::from("/var/hr/staff.db")));
    }

    #[test]
    fn parse_treats_plain_value_as_path() {
        assert_eq!(
            StorageTarget::parse("staff.db"),
            Ok(StorageTarget::File(PathBuf::from("staff.db")))
        );
        assert_eq!(
            StorageTarget::parse("sqlite://data/staff.db"),
            Ok(StorageTarget::File(PathBuf::from("data/staff.db")))
        );
    }

    #[test]
    fn parse_rejects_empty_and_sourceless_strings() {
        assert_eq!(
            StorageTarget::parse("   "),
            Err(ConfigError::EmptyConnectionString)
        );
        assert!(matches!(
            StorageTarget::parse("Mode=ReadOnly"),
            Err(ConfigError::MissingDataSource(_))
        ));
    }

    #[test]
    fn config_defaults_and_page_size_override() {
        let config = CoreConfig::new(StorageTarget::InMemory);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);

        let config = config.with_page_size(25).expect("positive size is valid");
        assert_eq!(config.page_size, 25);

        let err = CoreConfig::new(StorageTarget::InMemory)
            .with_page_size(0)
            .expect_err("zero page size must be rejected");
        assert_eq!(err, ConfigError::InvalidPageSize(0));
    }
}
