use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::debug;

use pressure_watch_domain::health::SessionHealthService;
use pressure_watch_domain::session::HealthSession;

use crate::api::handlers::{blood_pressure, health};

/// Create the application router
pub fn create_app(session: Arc<HealthSession>) -> Router {
    debug!("Creating application router");

    let health_service: health::HealthService =
        Arc::new(SessionHealthService::new(Arc::clone(&session)));

    // Blood pressure routes; specific paths before the collection route
    let api_routes = Router::new()
        .route("/blood-pressure/latest", get(blood_pressure::get_latest_reading))
        .route("/blood-pressure/refresh", post(blood_pressure::refresh_reading))
        .route(
            "/blood-pressure/form",
            get(blood_pressure::get_reading_form).put(blood_pressure::update_reading_form),
        )
        .route("/blood-pressure", post(blood_pressure::log_reading))
        .with_state(session);

    debug!("API routes configured");

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .layer(Extension(health_service));

    health::initialize_server_start_time();

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
