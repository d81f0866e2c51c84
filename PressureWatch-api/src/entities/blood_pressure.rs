use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use pressure_watch_domain::entities::{Reading, INPUT_RANGE};

/// Public representation of the latest reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestReadingResponse {
    /// Systolic blood pressure in mmHg
    pub systolic: u16,

    /// Diastolic blood pressure in mmHg
    pub diastolic: u16,

    /// When the reading was measured, if known
    pub timestamp: Option<DateTime<Utc>>,

    /// Display text, e.g. "120 / 80 mmHg"
    pub display: String,

    /// Caption, e.g. "at 2024-04-12 08:30" or "No recent measurements"
    pub measured_at_text: String,
}

impl From<Reading> for LatestReadingResponse {
    fn from(reading: Reading) -> Self {
        Self {
            systolic: reading.systolic,
            diastolic: reading.diastolic,
            timestamp: reading.timestamp,
            display: reading.display(),
            measured_at_text: reading.measured_at_text(),
        }
    }
}

/// Request payload for logging a new reading.
/// Bounds match the picker range offered to the user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LogReadingRequest {
    /// Systolic blood pressure (the higher number)
    #[validate(range(min = 1, max = 250, message = "Systolic must be between 1 and 250"))]
    pub systolic: u16,

    /// Diastolic blood pressure (the lower number)
    #[validate(range(min = 1, max = 250, message = "Diastolic must be between 1 and 250"))]
    pub diastolic: u16,
}

/// Partial update of the values selected in the logging form.
/// Omitted fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateReadingFormRequest {
    /// Newly selected systolic value
    #[validate(range(min = 1, max = 250, message = "Systolic must be between 1 and 250"))]
    pub systolic: Option<u16>,

    /// Newly selected diastolic value
    #[validate(range(min = 1, max = 250, message = "Diastolic must be between 1 and 250"))]
    pub diastolic: Option<u16>,
}

/// Bounds of a reading input control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputRange {
    /// Smallest selectable value
    pub min: u16,
    /// Largest selectable value
    pub max: u16,
}

/// Values used to seed the logging form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingFormResponse {
    /// Pre-selected systolic value
    pub systolic: u16,

    /// Pre-selected diastolic value
    pub diastolic: u16,

    /// Selectable range for both values
    pub range: InputRange,
}

impl From<Reading> for ReadingFormResponse {
    fn from(reading: Reading) -> Self {
        Self {
            systolic: reading.systolic,
            diastolic: reading.diastolic,
            range: InputRange {
                min: *INPUT_RANGE.start(),
                max: *INPUT_RANGE.end(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_request_range() {
        let valid = LogReadingRequest {
            systolic: 250,
            diastolic: 1,
        };
        assert!(valid.validate().is_ok());

        let too_high = LogReadingRequest {
            systolic: 251,
            diastolic: 80,
        };
        assert!(too_high.validate().is_err());

        let zero = LogReadingRequest {
            systolic: 120,
            diastolic: 0,
        };
        let errors = zero.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("diastolic"));
    }

    #[test]
    fn test_form_update_range_skips_missing_fields() {
        let empty = UpdateReadingFormRequest::default();
        assert!(empty.validate().is_ok());

        let partial = UpdateReadingFormRequest {
            systolic: Some(251),
            diastolic: None,
        };
        let errors = partial.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("systolic"));
        assert!(!errors.field_errors().contains_key("diastolic"));
    }

    #[test]
    fn test_latest_response_without_timestamp() {
        let response = LatestReadingResponse::from(Reading {
            systolic: 120,
            diastolic: 80,
            timestamp: None,
        });
        assert_eq!(response.display, "120 / 80 mmHg");
        assert_eq!(response.measured_at_text, "No recent measurements");
    }
}
