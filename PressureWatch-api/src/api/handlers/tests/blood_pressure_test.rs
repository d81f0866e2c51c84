use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use pressure_watch_data::models::{QuantityCategory, QuantitySample};
use pressure_watch_data::store::testing::ScriptedHealthStore;
use serde_json::json;

use super::{get, post_json, put_json, send, test_app};
use crate::entities::blood_pressure::{LatestReadingResponse, ReadingFormResponse};
use crate::entities::common::PublicErrorResponse;

#[tokio::test]
async fn test_latest_reading_after_startup() {
    let at = Utc::now() - Duration::minutes(10);
    let store = ScriptedHealthStore::new()
        .with_sample(QuantitySample::at(QuantityCategory::Systolic, 135.0, at));
    let (app, _) = test_app(Some(Arc::new(store))).await;

    let (status, body): (_, LatestReadingResponse) =
        send(app, get("/api/v1/blood-pressure/latest")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!((body.systolic, body.diastolic), (135, 80));
    assert_eq!(body.timestamp, Some(at));
    assert_eq!(body.display, "135 / 80 mmHg");
}

#[tokio::test]
async fn test_log_reading_round_trips_through_store() {
    let store = ScriptedHealthStore::new();
    let (app, session) = test_app(Some(Arc::new(store.clone()))).await;

    let (status, body): (_, LatestReadingResponse) = send(
        app,
        post_json("/api/v1/blood-pressure", json!({ "systolic": 140, "diastolic": 90 })),
    )
    .await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!((body.systolic, body.diastolic), (140, 90));
    assert_eq!(body.timestamp, Some(store.calls().writes[0].end));
    assert_eq!(session.reading().systolic, 140);
}

#[tokio::test]
async fn test_log_reading_rejects_out_of_range_input() {
    let store = ScriptedHealthStore::new();
    let (app, _) = test_app(Some(Arc::new(store.clone()))).await;

    let (status, body): (_, PublicErrorResponse) = send(
        app,
        post_json("/api/v1/blood-pressure", json!({ "systolic": 300, "diastolic": 0 })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body.code.as_deref(), Some("validation_error"));
    assert_eq!(body.details.map(|d| d.len()), Some(2));
    assert!(store.calls().writes.is_empty());
}

#[tokio::test]
async fn test_failed_write_is_not_an_error_response() {
    let store = ScriptedHealthStore::new().with_write_failure();
    let (app, session) = test_app(Some(Arc::new(store))).await;
    let before = session.reading();

    let (status, body): (_, LatestReadingResponse) = send(
        app,
        post_json("/api/v1/blood-pressure", json!({ "systolic": 150, "diastolic": 95 })),
    )
    .await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body, LatestReadingResponse::from(before));
}

#[tokio::test]
async fn test_refresh_picks_up_new_samples() {
    let store = ScriptedHealthStore::new();
    let (app, _) = test_app(Some(Arc::new(store.clone()))).await;

    let at = Utc::now();
    let store = store.with_sample(QuantitySample::at(QuantityCategory::Diastolic, 84.0, at));

    let (status, body): (_, LatestReadingResponse) =
        send(app, post_json("/api/v1/blood-pressure/refresh", json!({}))).await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body.diastolic, 84);
    assert_eq!(store.calls().queries.len(), 4);
}

#[tokio::test]
async fn test_form_is_seeded_from_current_reading() {
    let (app, _) = test_app(None).await;

    let (status, body): (_, ReadingFormResponse) =
        send(app, get("/api/v1/blood-pressure/form")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!((body.systolic, body.diastolic), (120, 80));
    assert_eq!((body.range.min, body.range.max), (1, 250));
}

#[tokio::test]
async fn test_log_reading_rejects_values_outside_u16_as_json_error() {
    for payload in [
        json!({ "systolic": -1, "diastolic": 80 }),
        json!({ "systolic": 120, "diastolic": 70000 }),
        json!({ "systolic": "high" }),
    ] {
        let store = ScriptedHealthStore::new();
        let (app, _) = test_app(Some(Arc::new(store.clone()))).await;

        let (status, body): (_, PublicErrorResponse) =
            send(app, post_json("/api/v1/blood-pressure", payload)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.code.as_deref(), Some("invalid_body"));
        assert!(store.calls().writes.is_empty());
    }
}

#[tokio::test]
async fn test_form_selection_updates_published_reading() {
    let store = ScriptedHealthStore::new();
    let (app, session) = test_app(Some(Arc::new(store.clone()))).await;
    let mut rx = session.state().subscribe();

    let (status, body): (_, ReadingFormResponse) = send(
        app.clone(),
        put_json("/api/v1/blood-pressure/form", json!({ "systolic": 132 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!((body.systolic, body.diastolic), (132, 80));
    assert!(rx.has_changed().unwrap());

    let (_, latest): (_, LatestReadingResponse) =
        send(app, get("/api/v1/blood-pressure/latest")).await;
    assert_eq!(latest.display, "132 / 80 mmHg");
    assert!(store.calls().writes.is_empty());
}

#[tokio::test]
async fn test_form_selection_rejects_out_of_range_value() {
    let (app, session) = test_app(None).await;
    let before = session.reading();

    let (status, body): (_, PublicErrorResponse) = send(
        app,
        put_json("/api/v1/blood-pressure/form", json!({ "systolic": 120, "diastolic": 251 })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body.code.as_deref(), Some("validation_error"));
    assert_eq!(session.reading(), before);
}
