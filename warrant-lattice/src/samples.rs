//! Deterministic sample sets for law checks.
//!
//! Each set covers both identities plus interior values, so identity and
//! absorption are exercised at the edges of the lattice.

use warrant_core::confidence::{
    AbsentReason, BoundBasis, CalibrationStatus, ConfidenceValue, DerivationInput,
};

/// Probabilities including both ends of the unit interval.
pub fn probability_samples() -> Vec<f64> {
    vec![0.0, 0.1, 0.25, 0.5, 0.75, 0.9, 1.0]
}

/// One value per variant, several interior points, and overlapping intervals.
pub fn confidence_samples() -> Vec<ConfidenceValue> {
    let mut out = vec![
        ConfidenceValue::certain("sample top"),
        ConfidenceValue::impossible("sample zero"),
        ConfidenceValue::absent(AbsentReason::Uncalibrated),
        ConfidenceValue::absent(AbsentReason::InsufficientData),
    ];
    out.extend([0.2, 0.5, 0.8].into_iter().filter_map(derived_point));
    out.extend(
        [(0.1, 0.4), (0.3, 0.9), (0.6, 0.7)]
            .into_iter()
            .filter_map(|(lo, hi)| {
                ConfidenceValue::bounded(lo, hi, BoundBasis::Theoretical, "sample bound").ok()
            }),
    );
    out
}

/// Every calibration status.
pub fn calibration_samples() -> Vec<CalibrationStatus> {
    CalibrationStatus::ALL.to_vec()
}

fn derived_point(value: f64) -> Option<ConfidenceValue> {
    ConfidenceValue::derived(
        value,
        "sample",
        vec![DerivationInput::new("seed", ConfidenceValue::certain("seed"))],
        Some(CalibrationStatus::Preserved),
    )
    .ok()
}
