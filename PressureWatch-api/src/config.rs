//! Application configuration loaded from the environment

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use pressure_watch_data::database::{DatabaseConfig, DatabaseError};
use pressure_watch_data::store::{HealthStore, InMemoryHealthStore, SqliteHealthStore, StoreError};

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable was set to something that cannot be parsed
    #[error("Invalid value for {key}: {value}")]
    InvalidValue {
        /// Variable name
        key: String,
        /// Raw value found
        value: String,
    },

    /// Database settings are invalid
    #[error("Database configuration error: {0}")]
    Database(#[from] DatabaseError),

    /// The configured store could not be opened
    #[error("Health store error: {0}")]
    Store(#[from] StoreError),
}

/// Which health store backs the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// SQLite database on disk
    Sqlite(DatabaseConfig),
    /// Process-local memory, lost on exit
    Memory,
    /// No health data on this device
    None,
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Port the HTTP server listens on
    pub port: u16,
    /// Health store backend
    pub store: StoreBackend,
}

impl AppConfig {
    /// Read configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env::var("PORT") {
            Ok(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                key: "PORT".to_string(),
                value: raw,
            })?,
            Err(_) => 3000,
        };

        let backend = env::var("HEALTH_STORE")
            .unwrap_or_else(|_| "sqlite".to_string())
            .to_lowercase();

        let store = match backend.as_str() {
            "sqlite" => {
                let mut database = DatabaseConfig::from_env()?;
                if env::var("DB_SQLITE_PATH").is_err() {
                    let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
                    let path = PathBuf::from(data_dir).join("pressure_watch.db");
                    database.sqlite_path = Some(path.to_string_lossy().to_string());
                }
                StoreBackend::Sqlite(database)
            }
            "memory" => StoreBackend::Memory,
            "none" => StoreBackend::None,
            _ => {
                return Err(ConfigError::InvalidValue {
                    key: "HEALTH_STORE".to_string(),
                    value: backend,
                })
            }
        };

        Ok(Self { port, store })
    }

    /// Open the configured health store. `None` means no health data.
    pub fn open_store(&self) -> Result<Option<Arc<dyn HealthStore>>, ConfigError> {
        let store: Option<Arc<dyn HealthStore>> = match &self.store {
            StoreBackend::Sqlite(database) => {
                info!("Using SQLite health store at {:?}", database.sqlite_path);
                Some(Arc::new(SqliteHealthStore::open(database)?))
            }
            StoreBackend::Memory => {
                info!("Using in-memory health store");
                Some(Arc::new(InMemoryHealthStore::new()))
            }
            StoreBackend::None => {
                info!("No health store configured");
                None
            }
        };
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_memory_store() {
        let config = AppConfig {
            port: 3000,
            store: StoreBackend::Memory,
        };
        assert!(config.open_store().unwrap().is_some());
    }

    #[test]
    fn test_open_in_memory_sqlite_store() {
        let config = AppConfig {
            port: 3000,
            store: StoreBackend::Sqlite(DatabaseConfig::in_memory()),
        };
        assert!(config.open_store().unwrap().is_some());
    }

    #[test]
    fn test_no_store() {
        let config = AppConfig {
            port: 3000,
            store: StoreBackend::None,
        };
        assert!(config.open_store().unwrap().is_none());
    }
}
