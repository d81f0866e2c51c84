//! Startup wiring around a health store
//!
//! A session owns the reading state, the synchronizer and the writer. When the
//! device has no health data the session still serves the placeholder reading,
//! and `refresh`/`save` do nothing.

use std::sync::{Arc, RwLock};

use tracing::{info, warn};

use crate::entities::Reading;
use crate::services::{LatestReadingSynchronizer, ReadingWriter};
use crate::state::ReadingState;
use pressure_watch_data::models::QuantityCategory;
use pressure_watch_data::store::HealthStore;

/// Outcome of the startup authorization request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationStatus {
    /// No request has completed yet
    NotDetermined,
    /// The store accepted the request
    Granted,
    /// The store rejected the request; the message is diagnostic only
    Denied(String),
    /// There is no health store to ask
    Unavailable,
}

struct Services {
    synchronizer: Arc<LatestReadingSynchronizer>,
    writer: ReadingWriter,
}

/// Presentation-facing entry point: reading state plus `refresh` and `save`
pub struct HealthSession {
    state: Arc<ReadingState>,
    services: Option<Services>,
    authorization: RwLock<AuthorizationStatus>,
}

impl HealthSession {
    /// Wire a session without contacting the store.
    ///
    /// `None`, or a store reporting itself unavailable, yields a session whose
    /// operations are no-ops.
    pub fn new(store: Option<Arc<dyn HealthStore>>) -> Self {
        let state = Arc::new(ReadingState::new());

        let services = store.filter(|s| s.is_available()).map(|store| {
            let synchronizer = Arc::new(LatestReadingSynchronizer::new(
                Arc::clone(&store),
                Arc::clone(&state),
            ));
            let writer = ReadingWriter::new(store, Arc::clone(&synchronizer));
            Services { synchronizer, writer }
        });

        let authorization = if services.is_some() {
            AuthorizationStatus::NotDetermined
        } else {
            warn!("Health data is not available, serving placeholder reading");
            AuthorizationStatus::Unavailable
        };

        Self {
            state,
            services,
            authorization: RwLock::new(authorization),
        }
    }

    /// Wire a session, request authorization and load the latest reading.
    ///
    /// A denied authorization is logged and does not stop startup.
    pub async fn start(store: Option<Arc<dyn HealthStore>>) -> Self {
        let session = Self::new(store);
        session.authorize().await;
        session.refresh().await;
        session
    }

    /// Request read and write access to both blood pressure series
    pub async fn authorize(&self) {
        let Some(services) = &self.services else {
            return;
        };

        let categories = QuantityCategory::BLOOD_PRESSURE;
        let status = match services
            .synchronizer
            .store()
            .request_authorization(&categories, &categories)
            .await
        {
            Ok(()) => {
                info!("Health store authorization granted");
                AuthorizationStatus::Granted
            }
            Err(e) => {
                warn!("Error requesting health store authorization: {}", e);
                AuthorizationStatus::Denied(e.to_string())
            }
        };

        if let Ok(mut current) = self.authorization.write() {
            *current = status;
        }
    }

    /// Pull the latest samples into the reading state
    pub async fn refresh(&self) {
        if let Some(services) = &self.services {
            services.synchronizer.refresh().await;
        }
    }

    /// Save a new reading and refresh from the store
    pub async fn save(&self, systolic: u16, diastolic: u16) {
        if let Some(services) = &self.services {
            services.writer.save(systolic, diastolic).await;
        }
    }

    /// Shared reading state
    pub fn state(&self) -> &Arc<ReadingState> {
        &self.state
    }

    /// Copy of the current reading
    pub fn reading(&self) -> Reading {
        self.state.snapshot()
    }

    /// Whether a usable health store is attached
    pub fn has_store(&self) -> bool {
        self.services.is_some()
    }

    /// Last authorization outcome
    pub fn authorization(&self) -> AuthorizationStatus {
        self.authorization
            .read()
            .map(|status| status.clone())
            .unwrap_or(AuthorizationStatus::NotDetermined)
    }
}
