use serde::{Deserialize, Serialize};

use crate::errors::ConfidenceError;

/// A closed sub-interval of [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    low: f64,
    high: f64,
}

impl Interval {
    pub fn new(low: f64, high: f64) -> Result<Self, ConfidenceError> {
        check_unit("interval.low", low)?;
        check_unit("interval.high", high)?;
        if low > high {
            return Err(ConfidenceError::InvertedInterval { low, high });
        }
        Ok(Self { low, high })
    }

    /// Degenerate interval `[v, v]`. The caller guarantees `v` is in range.
    pub(crate) fn point(v: f64) -> Self {
        Self { low: v, high: v }
    }

    /// Interval from already-validated bounds.
    pub(crate) fn from_bounds(low: f64, high: f64) -> Self {
        Self {
            low: low.min(high),
            high: high.max(low),
        }
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    pub fn is_point(&self) -> bool {
        self.width() <= f64::EPSILON
    }

    pub fn contains(&self, v: f64) -> bool {
        (self.low..=self.high).contains(&v)
    }
}

/// Reject NaN, infinities and anything outside [0, 1].
pub(crate) fn check_unit(field: &str, value: f64) -> Result<(), ConfidenceError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfidenceError::OutOfRange {
            field: field.to_string(),
            value,
        })
    }
}
