pub mod handlers;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use pressure_watch_domain::session::HealthSession;

/// Create the application router
pub fn create_application(session: Arc<HealthSession>) -> Router {
    routes::create_app(session)
}
