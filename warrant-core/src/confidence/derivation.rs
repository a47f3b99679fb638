//! Derivation operators: pure functions combining confidence values.
//!
//! Every operator is monotone non-decreasing in each input, so interval inputs
//! are propagated exactly: the result's `value` is the operator applied to the
//! lower ends and its `upper` the operator applied to the upper ends. No
//! default is substituted for a missing input; an operator that cannot produce
//! a meaningful result returns `Absent` instead.

use serde::{Deserialize, Serialize};

use super::calibration::CalibrationStatus;
use super::interval::check_unit;
use super::value::{AbsentReason, ConfidenceValue, DerivationInput, DerivedConfidence};
use crate::errors::ConfidenceError;

pub const FORMULA_SEQUENTIAL: &str = "sequential_min";
pub const FORMULA_PARALLEL_ALL: &str = "parallel_all_product";
pub const FORMULA_PARALLEL_ANY: &str = "parallel_any_noisy_or";
pub const FORMULA_WEIGHTED: &str = "weighted_mean";
pub const FORMULA_CORRELATED_ALL: &str = "correlated_all";
pub const FORMULA_CORRELATED_ANY: &str = "correlated_any";
pub const FORMULA_MEET: &str = "meet_min";
pub const FORMULA_JOIN: &str = "join_max";

/// Below this gap an interval result collapses to a point.
const INTERVAL_EPSILON: f64 = 1e-12;

/// Chained steps that must all hold: the weakest link.
pub fn derive_sequential(steps: &[ConfidenceValue]) -> ConfidenceValue {
    compose(FORMULA_SEQUENTIAL, "step", steps, None, min_of)
}

/// Independent branches that must all hold: the product.
pub fn derive_parallel_all(branches: &[ConfidenceValue]) -> ConfidenceValue {
    compose(FORMULA_PARALLEL_ALL, "branch", branches, None, product_of)
}

/// Independent branches of which any suffices: noisy-OR, `1 - Π(1 - p)`.
pub fn derive_parallel_any(branches: &[ConfidenceValue]) -> ConfidenceValue {
    compose(FORMULA_PARALLEL_ANY, "branch", branches, None, noisy_or_of)
}

/// Weighted arithmetic mean.
///
/// Weights must be finite and non-negative with a positive sum. An `Absent`
/// input with zero weight is ignored; with any positive weight it makes the
/// whole result `Absent`.
pub fn derive_weighted(
    inputs: &[(ConfidenceValue, f64)],
) -> Result<ConfidenceValue, ConfidenceError> {
    if inputs.is_empty() {
        return Ok(ConfidenceValue::absent(AbsentReason::NotApplicable));
    }
    if let Some((_, w)) = inputs.iter().find(|(_, w)| !w.is_finite() || *w < 0.0) {
        return Err(ConfidenceError::InvalidWeights {
            reason: format!("weight {w} is negative or not finite"),
        });
    }

    let kept: Vec<&(ConfidenceValue, f64)> = inputs
        .iter()
        .filter(|(c, w)| !(c.is_absent() && *w == 0.0))
        .collect();
    let total: f64 = kept.iter().map(|(_, w)| *w).sum();
    if total <= 0.0 {
        return Err(ConfidenceError::InvalidWeights {
            reason: "weights must have a positive sum".to_string(),
        });
    }

    let values: Vec<ConfidenceValue> = kept.iter().map(|(c, _)| c.clone()).collect();
    let weights: Vec<f64> = kept.iter().map(|(_, w)| *w / total).collect();
    Ok(compose(
        FORMULA_WEIGHTED,
        "weighted",
        &values,
        None,
        |xs: &[f64]| xs.iter().zip(&weights).map(|(x, w)| x * w).sum::<f64>(),
    ))
}

/// Which independence formula a correlation adjustment starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationMode {
    /// Product at ρ = 0, min at ρ = 1.
    All,
    /// Noisy-OR at ρ = 0, max at ρ = 1.
    Any,
}

/// Interpolate linearly between the independence formula (ρ = 0) and the
/// fully-correlated formula (ρ = 1).
///
/// This is a heuristic, not a derived probabilistic result. For `0 < ρ < 1`
/// the result is therefore tagged at best `degraded`.
pub fn derive_correlated(
    branches: &[ConfidenceValue],
    rho: f64,
    mode: CorrelationMode,
) -> Result<ConfidenceValue, ConfidenceError> {
    if !rho.is_finite() || !(0.0..=1.0).contains(&rho) {
        return Err(ConfidenceError::InvalidCorrelation { rho });
    }
    let heuristic = (rho > 0.0 && rho < 1.0).then_some(CalibrationStatus::Degraded);
    let result = match mode {
        CorrelationMode::All => compose(
            FORMULA_CORRELATED_ALL,
            "branch",
            branches,
            heuristic,
            |xs: &[f64]| (1.0 - rho) * product_of(xs) + rho * min_of(xs),
        ),
        CorrelationMode::Any => compose(
            FORMULA_CORRELATED_ANY,
            "branch",
            branches,
            heuristic,
            |xs: &[f64]| (1.0 - rho) * noisy_or_of(xs) + rho * max_of(xs),
        ),
    };
    Ok(result)
}

/// Lattice meet: min-like, `Absent` is absorbing (bottom).
pub fn meet(a: &ConfidenceValue, b: &ConfidenceValue) -> ConfidenceValue {
    compose(FORMULA_MEET, "operand", &[a.clone(), b.clone()], None, min_of)
}

/// Lattice join: max-like, `Absent` is the identity.
///
/// Unlike [`derive_parallel_any`], a missing operand does not poison the
/// result: the join of anything with "unknown" is that thing.
pub fn join(a: &ConfidenceValue, b: &ConfidenceValue) -> ConfidenceValue {
    match (a.is_absent(), b.is_absent()) {
        (true, _) => b.clone(),
        (false, true) => a.clone(),
        (false, false) => compose(FORMULA_JOIN, "operand", &[a.clone(), b.clone()], None, max_of),
    }
}

/// Shared skeleton of every operator.
fn compose<F>(
    formula: &str,
    label: &str,
    inputs: &[ConfidenceValue],
    floor_status: Option<CalibrationStatus>,
    f: F,
) -> ConfidenceValue
where
    F: Fn(&[f64]) -> f64,
{
    if inputs.is_empty() {
        return ConfidenceValue::absent(AbsentReason::NotApplicable);
    }
    if let Some(reason) = inputs.iter().find_map(ConfidenceValue::absent_reason) {
        return ConfidenceValue::absent(reason);
    }

    let intervals: Vec<_> = inputs.iter().filter_map(ConfidenceValue::interval).collect();
    let lows: Vec<f64> = intervals.iter().map(|i| i.low()).collect();
    let highs: Vec<f64> = intervals.iter().map(|i| i.high()).collect();
    let low = clamp_unit(f(&lows));
    let high = clamp_unit(f(&highs)).max(low);

    let calibration = CalibrationStatus::combine_all(
        inputs
            .iter()
            .map(ConfidenceValue::calibration_status)
            .chain(floor_status),
    );
    let named = inputs
        .iter()
        .enumerate()
        .map(|(i, c)| DerivationInput::new(format!("{label}_{i}"), c.clone()))
        .collect();

    debug_assert!(check_unit(formula, low).is_ok());
    ConfidenceValue::Derived(DerivedConfidence::from_parts(
        low,
        (high - low > INTERVAL_EPSILON).then_some(high),
        formula,
        named,
        Some(calibration),
    ))
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

fn min_of(xs: &[f64]) -> f64 {
    xs.iter().copied().fold(f64::INFINITY, f64::min)
}

fn max_of(xs: &[f64]) -> f64 {
    xs.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

fn product_of(xs: &[f64]) -> f64 {
    xs.iter().product()
}

fn noisy_or_of(xs: &[f64]) -> f64 {
    1.0 - xs.iter().map(|x| 1.0 - x).product::<f64>()
}
