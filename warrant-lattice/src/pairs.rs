//! Meet/join pairs registered for law verification.

use serde::{Deserialize, Serialize};

use warrant_core::confidence::{join, meet, AbsentReason, CalibrationStatus, ConfidenceValue};
use warrant_core::constants::FLOAT_TOLERANCE;

use crate::laws::{Law, LawChecker, Operation};
use crate::samples;

/// A bounded lattice: two binary operations with their identities.
pub trait LatticePair<T> {
    fn name(&self) -> &str;
    fn meet(&self, a: &T, b: &T) -> T;
    fn join(&self, a: &T, b: &T) -> T;
    /// Identity of meet.
    fn top(&self) -> T;
    /// Identity of join.
    fn bottom(&self) -> T;
    /// Equality predicate used by default when checking laws.
    fn equivalent(&self, a: &T, b: &T) -> bool;
}

/// Confidence values under [`meet`] and [`join`].
///
/// Top is `Deterministic(1)`, bottom is `Absent`. Two values are equivalent
/// when both are absent, or when their intervals agree within tolerance;
/// provenance is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfidenceLattice;

impl LatticePair<ConfidenceValue> for ConfidenceLattice {
    fn name(&self) -> &str {
        "confidence"
    }

    fn meet(&self, a: &ConfidenceValue, b: &ConfidenceValue) -> ConfidenceValue {
        meet(a, b)
    }

    fn join(&self, a: &ConfidenceValue, b: &ConfidenceValue) -> ConfidenceValue {
        join(a, b)
    }

    fn top(&self) -> ConfidenceValue {
        ConfidenceValue::certain("lattice top")
    }

    fn bottom(&self) -> ConfidenceValue {
        ConfidenceValue::absent(AbsentReason::NotApplicable)
    }

    fn equivalent(&self, a: &ConfidenceValue, b: &ConfidenceValue) -> bool {
        match (a.interval(), b.interval()) {
            (None, None) => true,
            (Some(x), Some(y)) => {
                (x.low() - y.low()).abs() <= FLOAT_TOLERANCE
                    && (x.high() - y.high()).abs() <= FLOAT_TOLERANCE
            }
            _ => false,
        }
    }
}

/// Plain probabilities under min/max on `[0, 1]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProbabilityLattice;

impl LatticePair<f64> for ProbabilityLattice {
    fn name(&self) -> &str {
        "probability"
    }

    fn meet(&self, a: &f64, b: &f64) -> f64 {
        a.min(*b)
    }

    fn join(&self, a: &f64, b: &f64) -> f64 {
        a.max(*b)
    }

    fn top(&self) -> f64 {
        1.0
    }

    fn bottom(&self) -> f64 {
        0.0
    }

    fn equivalent(&self, a: &f64, b: &f64) -> bool {
        (a - b).abs() <= FLOAT_TOLERANCE
    }
}

/// Calibration status: meet keeps the worse status, join the better.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalibrationLattice;

impl LatticePair<CalibrationStatus> for CalibrationLattice {
    fn name(&self) -> &str {
        "calibration"
    }

    fn meet(&self, a: &CalibrationStatus, b: &CalibrationStatus) -> CalibrationStatus {
        a.combine(*b)
    }

    fn join(&self, a: &CalibrationStatus, b: &CalibrationStatus) -> CalibrationStatus {
        (*a).min(*b)
    }

    fn top(&self) -> CalibrationStatus {
        CalibrationStatus::Preserved
    }

    fn bottom(&self) -> CalibrationStatus {
        CalibrationStatus::Unknown
    }

    fn equivalent(&self, a: &CalibrationStatus, b: &CalibrationStatus) -> bool {
        a == b
    }
}

type BinaryFn<T> = Box<dyn Fn(&T, &T) -> T + Send + Sync>;
type EqualityFn<T> = Box<dyn Fn(&T, &T) -> bool + Send + Sync>;

/// A lattice assembled from closures, for pairs defined outside this crate.
pub struct FnLattice<T> {
    name: String,
    meet: BinaryFn<T>,
    join: BinaryFn<T>,
    top: T,
    bottom: T,
    eq: EqualityFn<T>,
}

impl<T: Clone> FnLattice<T> {
    pub fn new<M, J, E>(name: impl Into<String>, meet: M, join: J, top: T, bottom: T, eq: E) -> Self
    where
        M: Fn(&T, &T) -> T + Send + Sync + 'static,
        J: Fn(&T, &T) -> T + Send + Sync + 'static,
        E: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            meet: Box::new(meet),
            join: Box::new(join),
            top,
            bottom,
            eq: Box::new(eq),
        }
    }
}

impl<T: Clone> LatticePair<T> for FnLattice<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn meet(&self, a: &T, b: &T) -> T {
        (self.meet)(a, b)
    }

    fn join(&self, a: &T, b: &T) -> T {
        (self.join)(a, b)
    }

    fn top(&self) -> T {
        self.top.clone()
    }

    fn bottom(&self) -> T {
        self.bottom.clone()
    }

    fn equivalent(&self, a: &T, b: &T) -> bool {
        (self.eq)(a, b)
    }
}

/// Non-generic summary of one pair's law report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairSummary {
    pub pair: String,
    pub passed: bool,
    pub cases_checked: usize,
    pub failures: Vec<(Law, Operation)>,
}

fn summarize<T: Clone, L: LatticePair<T>>(pair: &L, samples: &[T]) -> PairSummary {
    let report = LawChecker::new(pair, samples).check_all();
    PairSummary {
        pair: report.pair.clone(),
        passed: report.all_passed(),
        cases_checked: report.checks.iter().map(|c| c.cases_checked).sum(),
        failures: report.failures().map(|c| (c.law, c.operation)).collect(),
    }
}

/// Check every built-in pair against its default sample set.
pub fn verify_registered_pairs() -> Vec<PairSummary> {
    let summaries = vec![
        summarize(&ConfidenceLattice, &samples::confidence_samples()),
        summarize(&ProbabilityLattice, &samples::probability_samples()),
        summarize(&CalibrationLattice, &samples::calibration_samples()),
    ];
    for s in summaries.iter().filter(|s| !s.passed) {
        tracing::warn!(pair = %s.pair, failures = s.failures.len(), "lattice law violated");
    }
    summaries
}
