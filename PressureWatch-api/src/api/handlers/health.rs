use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{http::StatusCode, response::IntoResponse, Extension, Json};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use pressure_watch_domain::health::{ComponentStatus, HealthServiceTrait, SystemStatus};

/// Health service type injected into the router
pub type HealthService = Arc<dyn HealthServiceTrait>;

/// Health check response model
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Current service status ("ok" or "degraded")
    pub status: String,
    /// Current application version from Cargo manifest
    pub version: String,
    /// Timestamp of when the response was generated
    pub timestamp: u64,
    /// Uptime of the service in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime: Option<u64>,
    /// Status of each component by name
    pub components: BTreeMap<String, ComponentHealthStatus>,
}

/// Health status for an individual component
#[derive(Debug, Serialize, Deserialize)]
pub struct ComponentHealthStatus {
    /// Status of the component ("ok" or "degraded")
    pub status: String,
    /// Optional message with more details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// Track the time when the server started
static SERVER_START_TIME: OnceCell<u64> = OnceCell::new();

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Record the server start time once; later calls are ignored
pub fn initialize_server_start_time() {
    let _ = SERVER_START_TIME.set(unix_now());
}

fn map_component_status(status: &ComponentStatus) -> &'static str {
    match status {
        ComponentStatus::Healthy => "ok",
        ComponentStatus::Degraded => "degraded",
    }
}

/// Health check endpoint.
///
/// A degraded session still answers 200; it keeps serving the last known reading.
#[instrument(skip(health_service))]
pub async fn health_check(
    Extension(health_service): Extension<HealthService>,
) -> impl IntoResponse {
    info!("Health check requested");

    let now = unix_now();
    let uptime = SERVER_START_TIME.get().map(|&start| now.saturating_sub(start));
    let system_health = health_service.get_system_health().await;

    let (status_code, status) = match system_health.status {
        SystemStatus::Healthy => (StatusCode::OK, "ok"),
        SystemStatus::Degraded => (StatusCode::OK, "degraded"),
    };

    let components = system_health
        .components
        .iter()
        .map(|(name, component)| {
            (
                name.clone(),
                ComponentHealthStatus {
                    status: map_component_status(&component.status).to_string(),
                    message: component.details.clone(),
                },
            )
        })
        .collect();

    let response = HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: now,
        uptime,
        components,
    };

    (status_code, Json(response))
}
