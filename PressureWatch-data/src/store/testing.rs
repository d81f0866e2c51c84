// Scripted health store for tests.
// Only compiled for tests or when the "mock" feature is enabled.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::errors::StoreError;
use super::in_memory::InMemoryHealthStore;
use super::HealthStore;
use crate::models::{CorrelatedSample, QuantityCategory, QuantitySample};

/// Health store whose failures and latencies can be configured per call type.
///
/// Data lives in an [`InMemoryHealthStore`], so successful writes are visible
/// to later queries.
#[derive(Clone, Default)]
pub struct ScriptedHealthStore {
    inner: InMemoryHealthStore,
    unavailable: bool,
    deny_authorization: bool,
    fail_writes: bool,
    failing_queries: HashSet<QuantityCategory>,
    query_delays: HashMap<QuantityCategory, Duration>,
    calls: Arc<Mutex<CallLog>>,
}

/// Record of the calls made against a [`ScriptedHealthStore`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallLog {
    /// Categories queried, in call order
    pub queries: Vec<QuantityCategory>,
    /// Correlations submitted, including rejected ones
    pub writes: Vec<CorrelatedSample>,
    /// Number of authorization requests
    pub authorizations: usize,
}

impl ScriptedHealthStore {
    /// Create an empty store where every call succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload a standalone sample
    pub fn with_sample(self, sample: QuantitySample) -> Self {
        // The in-memory store only fails on a poisoned lock, which cannot happen here
        let _ = self.inner.insert_sample(sample);
        self
    }

    /// Report health data as unavailable on this device
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// Reject authorization requests
    pub fn with_authorization_denied(mut self) -> Self {
        self.deny_authorization = true;
        self
    }

    /// Reject every write
    pub fn with_write_failure(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Fail every query for `category`
    pub fn with_query_failure(mut self, category: QuantityCategory) -> Self {
        self.failing_queries.insert(category);
        self
    }

    /// Delay completion of queries for `category`
    pub fn with_query_delay(mut self, category: QuantityCategory, delay: Duration) -> Self {
        self.query_delays.insert(category, delay);
        self
    }

    /// Snapshot of the calls made so far
    pub fn calls(&self) -> CallLog {
        self.calls.lock().map(|log| log.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl HealthStore for ScriptedHealthStore {
    fn is_available(&self) -> bool {
        !self.unavailable
    }

    async fn request_authorization(
        &self,
        share: &[QuantityCategory],
        read: &[QuantityCategory],
    ) -> Result<(), StoreError> {
        self.calls.lock()?.authorizations += 1;

        if self.deny_authorization {
            return Err(StoreError::PermissionDenied(
                "authorization denied by scripted store".to_string(),
            ));
        }
        self.inner.request_authorization(share, read).await
    }

    async fn query_most_recent(
        &self,
        category: QuantityCategory,
    ) -> Result<Option<QuantitySample>, StoreError> {
        self.calls.lock()?.queries.push(category);

        if let Some(delay) = self.query_delays.get(&category) {
            tokio::time::sleep(*delay).await;
        }

        if self.failing_queries.contains(&category) {
            return Err(StoreError::QueryFailed(format!(
                "{} query failed by scripted store",
                category
            )));
        }
        self.inner.query_most_recent(category).await
    }

    async fn save_correlation(&self, correlation: CorrelatedSample) -> Result<(), StoreError> {
        self.calls.lock()?.writes.push(correlation.clone());

        if self.fail_writes {
            return Err(StoreError::WriteFailed("write rejected by scripted store".to_string()));
        }
        self.inner.save_correlation(correlation).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_scripted_failures_are_recorded() {
        let store = ScriptedHealthStore::new()
            .with_write_failure()
            .with_query_failure(QuantityCategory::Diastolic);

        let write = store
            .save_correlation(CorrelatedSample::blood_pressure(120.0, 80.0, Utc::now()))
            .await;
        assert!(matches!(write, Err(StoreError::WriteFailed(_))));

        let query = store.query_most_recent(QuantityCategory::Diastolic).await;
        assert!(matches!(query, Err(StoreError::QueryFailed(_))));

        let calls = store.calls();
        assert_eq!(calls.writes.len(), 1);
        assert_eq!(calls.queries, vec![QuantityCategory::Diastolic]);
    }

    #[tokio::test]
    async fn test_successful_write_is_visible() {
        let store = ScriptedHealthStore::new();
        store
            .save_correlation(CorrelatedSample::blood_pressure(140.0, 90.0, Utc::now()))
            .await
            .unwrap();

        let systolic = store.query_most_recent(QuantityCategory::Systolic).await.unwrap();
        assert_eq!(systolic.map(|s| s.value_mmhg), Some(140.0));
    }
}
