use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use pressure_watch_domain::session::HealthSession;

use crate::entities::blood_pressure::{
    LatestReadingResponse, LogReadingRequest, ReadingFormResponse, UpdateReadingFormRequest,
};
use crate::entities::common::PublicErrorResponse;

/// Session type shared by the handlers
pub type SessionState = Arc<HealthSession>;

/// Get the latest known blood pressure reading
#[instrument(skip(session))]
pub async fn get_latest_reading(State(session): State<SessionState>) -> impl IntoResponse {
    let reading = session.reading();
    info!("Serving latest reading {}", reading.display());

    (StatusCode::OK, Json(LatestReadingResponse::from(reading)))
}

/// Re-query the health store and return the merged reading.
///
/// Store failures are absorbed: the response carries whatever the state holds.
#[instrument(skip(session))]
pub async fn refresh_reading(State(session): State<SessionState>) -> impl IntoResponse {
    info!("Refreshing latest reading");
    session.refresh().await;

    (StatusCode::ACCEPTED, Json(LatestReadingResponse::from(session.reading())))
}

/// Log a new blood pressure reading.
///
/// Only the input range is checked here. A failed write is logged by the
/// writer and the previous reading is returned unchanged.
#[instrument(skip(session, payload))]
pub async fn log_reading(
    State(session): State<SessionState>,
    payload: Result<Json<LogReadingRequest>, JsonRejection>,
) -> Result<impl IntoResponse, PublicErrorResponse> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected reading body: {}", rejection.body_text());
        PublicErrorResponse::invalid_body(&rejection)
    })?;

    if let Err(errors) = request.validate() {
        warn!(
            "Rejected reading outside input range: {}/{}",
            request.systolic, request.diastolic
        );
        return Err(PublicErrorResponse::validation(&errors));
    }

    info!("Logging blood pressure reading {}/{}", request.systolic, request.diastolic);
    session.save(request.systolic, request.diastolic).await;

    Ok((StatusCode::ACCEPTED, Json(LatestReadingResponse::from(session.reading()))))
}

/// Values to pre-select when the logging form opens
#[instrument(skip(session))]
pub async fn get_reading_form(State(session): State<SessionState>) -> impl IntoResponse {
    (StatusCode::OK, Json(ReadingFormResponse::from(session.reading())))
}

/// Select new form values.
///
/// The selection is written straight into the shared reading, so observers of
/// the latest reading see it before anything is saved to the store.
#[instrument(skip(session, payload))]
pub async fn update_reading_form(
    State(session): State<SessionState>,
    payload: Result<Json<UpdateReadingFormRequest>, JsonRejection>,
) -> Result<impl IntoResponse, PublicErrorResponse> {
    let Json(request) =
        payload.map_err(|rejection| PublicErrorResponse::invalid_body(&rejection))?;

    if let Err(errors) = request.validate() {
        warn!("Rejected form selection outside input range");
        return Err(PublicErrorResponse::validation(&errors));
    }

    let state = session.state();
    if let Some(systolic) = request.systolic {
        state.set_systolic(systolic);
    }
    if let Some(diastolic) = request.diastolic {
        state.set_diastolic(diastolic);
    }
    debug!("Form selection now {}", session.reading().display());

    Ok((StatusCode::OK, Json(ReadingFormResponse::from(session.reading()))))
}
