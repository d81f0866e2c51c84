use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::entities::SampleQueryResult;
use crate::state::ReadingState;
use pressure_watch_data::models::QuantityCategory;
use pressure_watch_data::store::HealthStore;

/// Keeps [`ReadingState`] in line with the newest systolic and diastolic samples
pub struct LatestReadingSynchronizer {
    store: Arc<dyn HealthStore>,
    state: Arc<ReadingState>,
    // Cancelled on drop; spawned refreshes stop applying results once it fires
    alive: CancellationToken,
}

impl LatestReadingSynchronizer {
    /// Create a synchronizer writing into `state`
    pub fn new(store: Arc<dyn HealthStore>, state: Arc<ReadingState>) -> Self {
        Self {
            store,
            state,
            alive: CancellationToken::new(),
        }
    }

    /// Store this synchronizer reads from
    pub fn store(&self) -> &Arc<dyn HealthStore> {
        &self.store
    }

    /// Query both series concurrently and merge each result as soon as it arrives.
    ///
    /// Failed or empty queries leave their field untouched.
    pub async fn refresh(&self) {
        futures::join!(
            sync_category(&*self.store, &self.state, &self.alive, QuantityCategory::Systolic),
            sync_category(&*self.store, &self.state, &self.alive, QuantityCategory::Diastolic),
        );
    }

    /// Run a refresh in the background.
    ///
    /// The task keeps its own handles to the store and state; if the
    /// synchronizer is dropped before a query completes, that result is discarded.
    pub fn spawn_refresh(&self) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        let state = Arc::clone(&self.state);
        let alive = self.alive.clone();

        tokio::spawn(async move {
            futures::join!(
                sync_category(&*store, &state, &alive, QuantityCategory::Systolic),
                sync_category(&*store, &state, &alive, QuantityCategory::Diastolic),
            );
        })
    }
}

impl Drop for LatestReadingSynchronizer {
    fn drop(&mut self) {
        self.alive.cancel();
    }
}

async fn sync_category(
    store: &dyn HealthStore,
    state: &ReadingState,
    alive: &CancellationToken,
    category: QuantityCategory,
) {
    let Some(result) = fetch_latest(store, category).await else {
        return;
    };

    if alive.is_cancelled() {
        debug!("Synchronizer gone, dropping {} result", category);
        return;
    }

    if state.apply(&result) {
        debug!("Applied latest {} value {}", category, result.value);
    }
}

/// Most recent sample of one category, or `None` when empty or failed
async fn fetch_latest(
    store: &dyn HealthStore,
    category: QuantityCategory,
) -> Option<SampleQueryResult> {
    match store.query_most_recent(category).await {
        Ok(Some(sample)) => Some(SampleQueryResult::from(&sample)),
        Ok(None) => {
            debug!("No {} samples in health store", category);
            None
        }
        Err(e) => {
            warn!("Failed to query most recent {} sample: {}", category, e);
            None
        }
    }
}
