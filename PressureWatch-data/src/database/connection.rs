//! SQLite connection pooling for the health store
//!
//! A pool is built from a [`DatabaseConfig`], either file-backed or in-memory,
//! and migrated before it is handed out.

use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::OpenFlags;
use tracing::{info, warn};

use super::migrations::run_migrations;
use super::DatabaseError;

/// Connection pool used by the SQLite health store
pub type SqlitePool = r2d2::Pool<SqliteConnectionManager>;

/// Database configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Path to SQLite database file; `None` keeps everything in memory
    pub sqlite_path: Option<String>,
    /// Maximum number of pooled connections
    pub max_connections: u32,
    /// Connection timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            sqlite_path: Some("data/pressure_watch.db".to_string()),
            max_connections: 10,
            timeout_seconds: 30,
        }
    }
}

impl DatabaseConfig {
    /// Configuration for a private in-memory database.
    ///
    /// Every SQLite in-memory connection is its own database, so the pool is
    /// capped at a single connection.
    pub fn in_memory() -> Self {
        Self {
            sqlite_path: None,
            max_connections: 1,
            timeout_seconds: 30,
        }
    }

    /// Create a new database configuration from environment variables
    pub fn from_env() -> Result<Self, DatabaseError> {
        let defaults = Self::default();

        let sqlite_path = env::var("DB_SQLITE_PATH").ok().or(defaults.sqlite_path);
        let max_connections = parse_env("DB_MAX_CONNECTIONS", defaults.max_connections)?;
        let timeout_seconds = parse_env("DB_TIMEOUT_SECONDS", defaults.timeout_seconds)?;

        if max_connections == 0 {
            return Err(DatabaseError::Config("DB_MAX_CONNECTIONS must be at least 1".to_string()));
        }

        info!(
            "Database configuration: path={:?}, max_connections={}, timeout={}s",
            sqlite_path, max_connections, timeout_seconds
        );

        Ok(Self {
            sqlite_path,
            max_connections,
            timeout_seconds,
        })
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T, DatabaseError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| DatabaseError::Config(format!("{} is not a valid number: {}", key, raw))),
        Err(_) => Ok(default),
    }
}

/// Build and migrate a SQLite connection pool
pub fn create_sqlite_pool(config: &DatabaseConfig) -> Result<SqlitePool, DatabaseError> {
    let (manager, max_size) = match &config.sqlite_path {
        Some(path) => {
            info!("Initializing SQLite database at: {}", path);

            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    info!("Creating parent directory: {:?}", parent);
                    fs::create_dir_all(parent)?;
                }
            }

            let manager = SqliteConnectionManager::file(path)
                .with_flags(OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE);
            (manager, config.max_connections)
        }
        None => {
            info!("Initializing in-memory SQLite database");
            if config.max_connections > 1 {
                warn!("In-memory SQLite database is limited to one connection");
            }
            (SqliteConnectionManager::memory(), 1)
        }
    };

    let pool = r2d2::Pool::builder()
        .max_size(max_size)
        .connection_timeout(Duration::from_secs(config.timeout_seconds))
        .build(manager)?;

    let conn = pool.get()?;
    run_migrations(&conn)?;
    drop(conn);

    info!("SQLite connection pool created successfully");
    Ok(pool)
}
