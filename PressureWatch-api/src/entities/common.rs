use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

/// Standardized error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct PublicErrorResponse {
    /// Error message
    pub message: String,

    /// Optional error code for client-side handling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Optional details about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl PublicErrorResponse {
    /// Build a validation error listing every failing field
    pub fn validation(errors: &ValidationErrors) -> Self {
        let mut details: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |err| match &err.message {
                    Some(msg) => msg.to_string(),
                    None => format!("Invalid {}", field),
                })
            })
            .collect();
        details.sort();

        Self {
            message: "Invalid blood pressure reading".to_string(),
            code: Some("validation_error".to_string()),
            details: Some(details),
        }
    }

    /// Build an error for a body that is not valid JSON for the endpoint
    pub fn invalid_body(rejection: &JsonRejection) -> Self {
        Self {
            message: "Invalid request body".to_string(),
            code: Some("invalid_body".to_string()),
            details: Some(vec![rejection.body_text()]),
        }
    }
}

impl IntoResponse for PublicErrorResponse {
    fn into_response(self) -> Response {
        (StatusCode::UNPROCESSABLE_ENTITY, Json(self)).into_response()
    }
}
