// Health store contract and its implementations
pub mod errors;
mod in_memory;
#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(any(test, feature = "mock"))]
pub mod testing;

use async_trait::async_trait;

use crate::models::{CorrelatedSample, QuantityCategory, QuantitySample};

// Re-export commonly used types
pub use errors::StoreError;
pub use in_memory::InMemoryHealthStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteHealthStore;

/// Read/write access to timestamped quantity samples.
///
/// Queries are most-recent-first with a limit of one: an empty series yields
/// `Ok(None)`, which callers treat the same as a failed query.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait HealthStore: Send + Sync {
    /// Whether health data can be accessed at all on this device
    fn is_available(&self) -> bool {
        true
    }

    /// Ask for permission to write `share` and read `read`
    async fn request_authorization(
        &self,
        share: &[QuantityCategory],
        read: &[QuantityCategory],
    ) -> Result<(), StoreError>;

    /// Latest sample of a category, ordered by start time
    async fn query_most_recent(
        &self,
        category: QuantityCategory,
    ) -> Result<Option<QuantitySample>, StoreError>;

    /// Persist a correlated record as one atomic write
    async fn save_correlation(&self, correlation: CorrelatedSample) -> Result<(), StoreError>;
}
