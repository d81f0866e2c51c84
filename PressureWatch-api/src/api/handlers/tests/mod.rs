mod blood_pressure_test;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use pressure_watch_data::store::HealthStore;
use pressure_watch_domain::session::HealthSession;
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use crate::api::create_application;

/// Start a session over `store` and build the router around it
pub(super) async fn test_app(
    store: Option<Arc<dyn HealthStore>>,
) -> (Router, Arc<HealthSession>) {
    let session = Arc::new(HealthSession::start(store).await);
    (create_application(Arc::clone(&session)), session)
}

/// Send one request and decode the JSON body
pub(super) async fn send<T: DeserializeOwned>(
    app: Router,
    request: Request<Body>,
) -> (StatusCode, T) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

pub(super) fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub(super) fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    json_request("POST", uri, body)
}

pub(super) fn put_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    json_request("PUT", uri, body)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
