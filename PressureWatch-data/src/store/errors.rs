use std::sync::PoisonError;
use thiserror::Error;

#[cfg(feature = "sqlite")]
use crate::database::DatabaseError;

/// Error type for health store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Authorization request to the store was rejected
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// A sample query could not be executed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A write was rejected by the store
    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// Health data is not available on this device
    #[error("Health data is not available")]
    Unavailable,

    /// Stored row could not be mapped back to a sample
    #[error("Invalid stored sample: {0}")]
    InvalidSample(String),

    /// Database setup error
    #[cfg(feature = "sqlite")]
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// SQLite error
    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Lock error
    #[error("Lock error: {0}")]
    Lock(String),

    /// Blocking task did not complete
    #[error("Background task error: {0}")]
    TaskJoin(String),
}

impl<T> From<PoisonError<T>> for StoreError {
    fn from(error: PoisonError<T>) -> Self {
        StoreError::Lock(error.to_string())
    }
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(error: tokio::task::JoinError) -> Self {
        StoreError::TaskJoin(error.to_string())
    }
}
