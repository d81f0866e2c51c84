use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pressure_watch_data::models::{QuantityCategory, QuantitySample};

/// Values offered by the reading input control, in mmHg
pub const INPUT_RANGE: RangeInclusive<u16> = 1..=250;

/// Systolic placeholder shown before any sample has been fetched
pub const DEFAULT_SYSTOLIC: u16 = 120;

/// Diastolic placeholder shown before any sample has been fetched
pub const DEFAULT_DIASTOLIC: u16 = 80;

/// The latest known blood pressure reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    /// Systolic blood pressure in mmHg
    pub systolic: u16,

    /// Diastolic blood pressure in mmHg
    pub diastolic: u16,

    /// When the displayed values were measured
    pub timestamp: Option<DateTime<Utc>>,
}

impl Default for Reading {
    /// Placeholder reading of 120/80 stamped with the current time
    fn default() -> Self {
        Self {
            systolic: DEFAULT_SYSTOLIC,
            diastolic: DEFAULT_DIASTOLIC,
            timestamp: Some(Utc::now()),
        }
    }
}

/// Outcome of one successful most-recent query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleQueryResult {
    /// Series the sample came from
    pub category: QuantityCategory,

    /// Raw value in mmHg
    pub value: f64,

    /// End time of the sample
    pub sample_time: DateTime<Utc>,
}

impl From<&QuantitySample> for SampleQueryResult {
    fn from(sample: &QuantitySample) -> Self {
        Self {
            category: sample.category,
            value: sample.value_mmhg,
            sample_time: sample.end,
        }
    }
}

/// Truncate a store value toward zero, saturating at the `u16` bounds
fn truncate_mmhg(value: f64) -> u16 {
    value as u16
}

impl Reading {
    /// Merge one query result into this reading and report whether anything changed.
    ///
    /// Only the field of the result's category is overwritten. A systolic result
    /// always replaces the timestamp; a diastolic result only fills it in when
    /// no timestamp has been recorded yet.
    pub fn merge(&mut self, result: &SampleQueryResult) -> bool {
        let before = *self;
        let value = truncate_mmhg(result.value);

        match result.category {
            QuantityCategory::Systolic => {
                self.systolic = value;
                self.timestamp = Some(result.sample_time);
            }
            QuantityCategory::Diastolic => {
                self.diastolic = value;
                self.timestamp = self.timestamp.or(Some(result.sample_time));
            }
        }

        *self != before
    }

    /// Display text such as `"120 / 80 mmHg"`
    pub fn display(&self) -> String {
        format!("{} / {} mmHg", self.systolic, self.diastolic)
    }

    /// Caption describing when the reading was measured
    pub fn measured_at_text(&self) -> String {
        match self.timestamp {
            Some(at) => format!("at {}", at.format("%Y-%m-%d %H:%M")),
            None => "No recent measurements".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn result(category: QuantityCategory, value: f64, at: DateTime<Utc>) -> SampleQueryResult {
        SampleQueryResult {
            category,
            value,
            sample_time: at,
        }
    }

    #[test]
    fn test_default_reading() {
        let reading = Reading::default();
        assert_eq!(reading.systolic, 120);
        assert_eq!(reading.diastolic, 80);
        assert!(reading.timestamp.is_some());
    }

    #[test]
    fn test_systolic_always_sets_timestamp() {
        let t0 = Utc::now();
        let t1 = t0 + Duration::minutes(5);
        let mut reading = Reading {
            systolic: 120,
            diastolic: 80,
            timestamp: Some(t0),
        };

        assert!(reading.merge(&result(QuantityCategory::Systolic, 135.0, t1)));
        assert_eq!(
            reading,
            Reading {
                systolic: 135,
                diastolic: 80,
                timestamp: Some(t1),
            }
        );
    }

    #[test]
    fn test_diastolic_only_fills_missing_timestamp() {
        let t0 = Utc::now();
        let t1 = t0 + Duration::minutes(5);

        let mut stamped = Reading {
            systolic: 120,
            diastolic: 80,
            timestamp: Some(t0),
        };
        stamped.merge(&result(QuantityCategory::Diastolic, 88.0, t1));
        assert_eq!(stamped.timestamp, Some(t0));
        assert_eq!(stamped.diastolic, 88);

        let mut unstamped = Reading {
            systolic: 120,
            diastolic: 80,
            timestamp: None,
        };
        unstamped.merge(&result(QuantityCategory::Diastolic, 88.0, t1));
        assert_eq!(unstamped.timestamp, Some(t1));
    }

    #[test]
    fn test_merge_touches_only_its_field() {
        let t0 = Utc::now();
        let mut reading = Reading {
            systolic: 131,
            diastolic: 84,
            timestamp: Some(t0),
        };

        reading.merge(&result(QuantityCategory::Diastolic, 79.0, t0));
        assert_eq!(reading.systolic, 131);

        reading.merge(&result(QuantityCategory::Systolic, 118.0, t0));
        assert_eq!(reading.diastolic, 79);
    }

    #[test]
    fn test_merge_reports_unchanged() {
        let t0 = Utc::now();
        let mut reading = Reading {
            systolic: 120,
            diastolic: 80,
            timestamp: Some(t0),
        };
        assert!(!reading.merge(&result(QuantityCategory::Systolic, 120.0, t0)));
    }

    #[test]
    fn test_values_are_truncated() {
        let t0 = Utc::now();
        let mut reading = Reading::default();

        reading.merge(&result(QuantityCategory::Systolic, 129.9, t0));
        reading.merge(&result(QuantityCategory::Diastolic, 80.5, t0));
        assert_eq!((reading.systolic, reading.diastolic), (129, 80));

        reading.merge(&result(QuantityCategory::Diastolic, -4.0, t0));
        assert_eq!(reading.diastolic, 0);
    }

    #[test]
    fn test_display_text() {
        let at = Utc.with_ymd_and_hms(2024, 4, 12, 8, 30, 0).unwrap();
        let reading = Reading {
            systolic: 128,
            diastolic: 82,
            timestamp: Some(at),
        };
        assert_eq!(reading.display(), "128 / 82 mmHg");
        assert_eq!(reading.measured_at_text(), "at 2024-04-12 08:30");

        let blank = Reading { timestamp: None, ..reading };
        assert_eq!(blank.measured_at_text(), "No recent measurements");
    }
}
