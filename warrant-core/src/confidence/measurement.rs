use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::interval::{check_unit, Interval};
use crate::errors::ConfidenceError;

/// An empirical measurement backing a [`MeasuredConfidence`](super::MeasuredConfidence).
///
/// Produced by an external calibration collaborator; treated here as an opaque leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub dataset_id: String,
    pub sample_size: u64,
    /// Observed accuracy, 0.0–1.0.
    pub accuracy: f64,
    pub confidence_interval: Interval,
    pub measured_at: DateTime<Utc>,
}

impl Measurement {
    pub fn new(
        dataset_id: impl Into<String>,
        sample_size: u64,
        accuracy: f64,
        confidence_interval: (f64, f64),
        measured_at: DateTime<Utc>,
    ) -> Result<Self, ConfidenceError> {
        let dataset_id = dataset_id.into();
        let invalid = |reason: String| ConfidenceError::InvalidMeasurement {
            dataset_id: dataset_id.clone(),
            reason,
        };
        if sample_size == 0 {
            return Err(invalid("sample size must be positive".to_string()));
        }
        check_unit("measurement.accuracy", accuracy).map_err(|e| invalid(e.to_string()))?;
        let confidence_interval = Interval::new(confidence_interval.0, confidence_interval.1)
            .map_err(|e| invalid(e.to_string()))?;
        Ok(Self {
            dataset_id,
            sample_size,
            accuracy,
            confidence_interval,
            measured_at,
        })
    }

    /// Re-check invariants of a deserialized measurement.
    pub fn validate(&self) -> Result<(), ConfidenceError> {
        Self::new(
            self.dataset_id.clone(),
            self.sample_size,
            self.accuracy,
            (self.confidence_interval.low(), self.confidence_interval.high()),
            self.measured_at,
        )
        .map(|_| ())
    }
}
