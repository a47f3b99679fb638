use serde::{Deserialize, Serialize};

use warrant_core::config::RuleKind;

use super::diagnostics::ObjectDiagnostic;
use super::remediation::Remediation;
use super::violation::{Severity, Violation};

/// Overall verdict of one evaluation.
///
/// Carries nothing time- or version-dependent, so evaluating the same
/// network twice, or an equal network built in another order, compares equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoherenceStatus {
    /// No error-severity violation.
    pub coherent: bool,
    /// In `[0, 1]`.
    pub score: f64,
    /// In rule evaluation order.
    pub violations: Vec<Violation>,
    /// Objects left undecided by defeat labelling.
    pub undecided: Vec<String>,
    /// Whether defeat labelling reached a fixpoint within its bound.
    pub labelling_converged: bool,
    pub rules_evaluated: Vec<RuleKind>,
    /// Fingerprint of the evaluated network.
    pub fingerprint: String,
}

impl CoherenceStatus {
    pub fn violations_for(&self, rule: &RuleKind) -> Vec<&Violation> {
        self.violations.iter().filter(|v| &v.rule == rule).collect()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == severity)
            .count()
    }
}

/// Everything `evaluate` returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoherenceReport {
    pub status: CoherenceStatus,
    /// One per object in id order. Empty when diagnostics were not requested.
    pub diagnostics: Vec<ObjectDiagnostic>,
    /// Most urgent first.
    pub remediation: Vec<Remediation>,
}

impl CoherenceReport {
    pub fn is_coherent(&self) -> bool {
        self.status.coherent
    }

    pub fn diagnostic(&self, object_id: &str) -> Option<&ObjectDiagnostic> {
        self.diagnostics.iter().find(|d| d.object_id == object_id)
    }
}
