use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tracing::debug;

use super::errors::StoreError;
use super::HealthStore;
use crate::models::{CorrelatedSample, QuantityCategory, QuantitySample};

/// In-memory health store
#[derive(Debug, Clone, Default)]
pub struct InMemoryHealthStore {
    /// Every stored quantity sample, in insertion order
    samples: Arc<RwLock<Vec<QuantitySample>>>,

    /// Every stored correlation, in insertion order
    correlations: Arc<RwLock<Vec<CorrelatedSample>>>,
}

impl InMemoryHealthStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store preloaded with standalone samples
    pub fn with_samples(samples: Vec<QuantitySample>) -> Self {
        Self {
            samples: Arc::new(RwLock::new(samples)),
            correlations: Arc::default(),
        }
    }

    /// Add a standalone sample that is not part of any correlation
    pub fn insert_sample(&self, sample: QuantitySample) -> Result<(), StoreError> {
        self.samples.write()?.push(sample);
        Ok(())
    }

    /// All correlations written so far
    pub fn correlations(&self) -> Result<Vec<CorrelatedSample>, StoreError> {
        Ok(self.correlations.read()?.clone())
    }
}

#[async_trait]
impl HealthStore for InMemoryHealthStore {
    async fn request_authorization(
        &self,
        _share: &[QuantityCategory],
        _read: &[QuantityCategory],
    ) -> Result<(), StoreError> {
        Ok(())
    }

    async fn query_most_recent(
        &self,
        category: QuantityCategory,
    ) -> Result<Option<QuantitySample>, StoreError> {
        let samples = self.samples.read()?;

        // On equal start times the sample stored last wins
        let latest = samples
            .iter()
            .filter(|s| s.category == category)
            .max_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)))
            .cloned();

        debug!("In-memory most recent {} sample: {:?}", category, latest.as_ref().map(|s| s.id));
        Ok(latest)
    }

    async fn save_correlation(&self, correlation: CorrelatedSample) -> Result<(), StoreError> {
        // Take both locks before touching either so the write is all-or-nothing
        let mut samples = self.samples.write()?;
        let mut correlations = self.correlations.write()?;

        samples.extend(correlation.samples.iter().cloned());
        debug!("Stored correlation {} in memory", correlation.id);
        correlations.push(correlation);
        Ok(())
    }
}
