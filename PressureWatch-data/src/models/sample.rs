use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Typed category of a quantity sample. All values are in millimeters of mercury.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QuantityCategory {
    /// Systolic blood pressure (the higher number)
    Systolic,

    /// Diastolic blood pressure (the lower number)
    Diastolic,
}

impl QuantityCategory {
    /// Both blood pressure categories, systolic first
    pub const BLOOD_PRESSURE: [QuantityCategory; 2] =
        [QuantityCategory::Systolic, QuantityCategory::Diastolic];

    /// Storage identifier for the category
    pub fn as_str(&self) -> &'static str {
        match self {
            QuantityCategory::Systolic => "systolic",
            QuantityCategory::Diastolic => "diastolic",
        }
    }
}

impl fmt::Display for QuantityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuantityCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "systolic" => Ok(QuantityCategory::Systolic),
            "diastolic" => Ok(QuantityCategory::Diastolic),
            other => Err(format!("unknown quantity category: {}", other)),
        }
    }
}

/// Kind of a correlated record
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationKind {
    /// Systolic and diastolic measured together
    BloodPressure,
}

impl CorrelationKind {
    /// Storage identifier for the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            CorrelationKind::BloodPressure => "blood_pressure",
        }
    }
}

/// A single timestamped quantity measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantitySample {
    /// Unique identifier for the sample
    pub id: Uuid,

    /// Which series the sample belongs to
    pub category: QuantityCategory,

    /// Measured value in mmHg
    pub value_mmhg: f64,

    /// When the measurement started
    pub start: DateTime<Utc>,

    /// When the measurement ended
    pub end: DateTime<Utc>,
}

impl QuantitySample {
    /// Create a point-in-time sample whose start and end are both `at`
    pub fn at(category: QuantityCategory, value_mmhg: f64, at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            category,
            value_mmhg,
            start: at,
            end: at,
        }
    }
}

/// Two or more quantity samples persisted as one record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelatedSample {
    /// Unique identifier for the correlation
    pub id: Uuid,

    /// What the correlation represents
    pub kind: CorrelationKind,

    /// Start of the correlated measurement
    pub start: DateTime<Utc>,

    /// End of the correlated measurement
    pub end: DateTime<Utc>,

    /// The grouped samples
    pub samples: Vec<QuantitySample>,
}

impl CorrelatedSample {
    /// Build a blood pressure correlation with both samples stamped at `at`
    pub fn blood_pressure(systolic: f64, diastolic: f64, at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: CorrelationKind::BloodPressure,
            start: at,
            end: at,
            samples: vec![
                QuantitySample::at(QuantityCategory::Systolic, systolic, at),
                QuantitySample::at(QuantityCategory::Diastolic, diastolic, at),
            ],
        }
    }

    /// Find the sample of a given category
    pub fn sample(&self, category: QuantityCategory) -> Option<&QuantitySample> {
        self.samples.iter().find(|s| s.category == category)
    }
}
