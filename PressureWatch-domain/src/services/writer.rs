use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use super::synchronizer::LatestReadingSynchronizer;
use pressure_watch_data::models::CorrelatedSample;
use pressure_watch_data::store::HealthStore;

/// Persists user-entered readings as a single blood pressure correlation
pub struct ReadingWriter {
    store: Arc<dyn HealthStore>,
    synchronizer: Arc<LatestReadingSynchronizer>,
}

impl ReadingWriter {
    /// Create a writer that refreshes through `synchronizer` after each save
    pub fn new(store: Arc<dyn HealthStore>, synchronizer: Arc<LatestReadingSynchronizer>) -> Self {
        Self { store, synchronizer }
    }

    /// Save a reading stamped with the current time, then pull it back from the store.
    ///
    /// Values are passed through unchanged. A rejected write is logged and
    /// leaves the reading state as it was.
    pub async fn save(&self, systolic: u16, diastolic: u16) {
        let correlation =
            CorrelatedSample::blood_pressure(f64::from(systolic), f64::from(diastolic), Utc::now());
        let id = correlation.id;

        match self.store.save_correlation(correlation).await {
            Ok(()) => {
                info!("Blood pressure saved: {}/{} mmHg (correlation {})", systolic, diastolic, id);
                self.synchronizer.refresh().await;
            }
            Err(e) => {
                error!("Error saving blood pressure: {}", e);
            }
        }
    }
}
