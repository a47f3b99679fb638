//! Calibration tracking through a sequence of named operations.

use serde::{Deserialize, Serialize};

use warrant_core::confidence::{CalibrationStatus, ConfidenceValue};

/// One recorded operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStep {
    pub operation: String,
    pub before: CalibrationStatus,
    pub contributed: CalibrationStatus,
    pub after: CalibrationStatus,
}

impl TraceStep {
    pub fn degraded(&self) -> bool {
        self.after > self.before
    }
}

/// Threads a running calibration status through named operations.
///
/// Starts at `preserved`; each step combines in the status the operation
/// contributed, so the running status can only get worse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalibrationTracker {
    current: Option<CalibrationStatus>,
    trace: Vec<TraceStep>,
}

impl CalibrationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> CalibrationStatus {
        self.current.unwrap_or(CalibrationStatus::Preserved)
    }

    pub fn trace(&self) -> &[TraceStep] {
        &self.trace
    }

    pub fn record(
        &mut self,
        operation: impl Into<String>,
        contributed: CalibrationStatus,
    ) -> CalibrationStatus {
        let before = self.current();
        let after = before.combine(contributed);
        let step = TraceStep {
            operation: operation.into(),
            before,
            contributed,
            after,
        };
        if step.degraded() {
            tracing::debug!(
                operation = %step.operation,
                before = %before,
                after = %after,
                "calibration degraded"
            );
        }
        self.trace.push(step);
        self.current = Some(after);
        after
    }

    /// Record the status a produced value carries.
    pub fn record_value(
        &mut self,
        operation: impl Into<String>,
        value: &ConfidenceValue,
    ) -> CalibrationStatus {
        self.record(operation, value.calibration_status())
    }

    /// Run `op` over `inputs`, record its result and return it.
    pub fn track<F>(
        &mut self,
        operation: impl Into<String>,
        inputs: &[ConfidenceValue],
        op: F,
    ) -> ConfidenceValue
    where
        F: FnOnce(&[ConfidenceValue]) -> ConfidenceValue,
    {
        let result = op(inputs);
        self.record_value(operation, &result);
        result
    }

    /// The first step that made the running status worse.
    pub fn first_degradation(&self) -> Option<&TraceStep> {
        self.trace.iter().find(|s| s.degraded())
    }
}
