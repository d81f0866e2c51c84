//! Domain layer health check functionality
//! This module reports whether the health store can be reached and queried

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::session::{AuthorizationStatus, HealthSession};

/// System health status
#[derive(Debug, Clone, PartialEq)]
pub enum SystemStatus {
    /// All components are healthy
    Healthy,
    /// Some components are degraded but the system is functional
    Degraded,
}

/// Component health status
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentStatus {
    /// Component is functioning normally
    Healthy,
    /// Component is functioning but with reduced capability
    Degraded,
}

/// Represents a health component with status and optional details
#[derive(Debug, Clone)]
pub struct HealthComponent {
    /// Status of the component
    pub status: ComponentStatus,
    /// Optional details about the component status
    pub details: Option<String>,
}

/// Represents the overall health of the system
#[derive(Debug, Clone)]
pub struct SystemHealth {
    /// Overall system status
    pub status: SystemStatus,
    /// Map of component names to their health status
    pub components: HashMap<String, HealthComponent>,
}

/// Trait for health services
#[async_trait]
pub trait HealthServiceTrait: Send + Sync {
    /// Get the overall system health
    async fn get_system_health(&self) -> SystemHealth;
}

/// Health service backed by a running session
pub struct SessionHealthService {
    session: Arc<HealthSession>,
}

impl SessionHealthService {
    /// Create a health service for `session`
    pub fn new(session: Arc<HealthSession>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl HealthServiceTrait for SessionHealthService {
    async fn get_system_health(&self) -> SystemHealth {
        system_health(&self.session)
    }
}

/// Summarise store availability and authorization.
///
/// A missing store or denied permission degrades the system but never makes it
/// unhealthy: the placeholder or last known reading is still served.
pub fn system_health(session: &HealthSession) -> SystemHealth {
    let store = if session.has_store() {
        HealthComponent {
            status: ComponentStatus::Healthy,
            details: None,
        }
    } else {
        HealthComponent {
            status: ComponentStatus::Degraded,
            details: Some("Health data is not available on this device".to_string()),
        }
    };

    let authorization = match session.authorization() {
        AuthorizationStatus::Granted => HealthComponent {
            status: ComponentStatus::Healthy,
            details: None,
        },
        AuthorizationStatus::NotDetermined => HealthComponent {
            status: ComponentStatus::Degraded,
            details: Some("Authorization has not been requested".to_string()),
        },
        AuthorizationStatus::Denied(reason) => HealthComponent {
            status: ComponentStatus::Degraded,
            details: Some(reason),
        },
        AuthorizationStatus::Unavailable => HealthComponent {
            status: ComponentStatus::Degraded,
            details: Some("No health store to authorize against".to_string()),
        },
    };

    let components: HashMap<String, HealthComponent> = vec![
        ("health_store".to_string(), store),
        ("authorization".to_string(), authorization),
    ]
    .into_iter()
    .collect();

    let status = if components.values().any(|c| c.status == ComponentStatus::Degraded) {
        SystemStatus::Degraded
    } else {
        SystemStatus::Healthy
    };

    SystemHealth { status, components }
}
