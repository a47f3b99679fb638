//! Coherence evaluation: status, per-object diagnostics, ranked remediation.

pub mod context;
pub mod defeat_view;
pub mod diagnostics;
pub mod engine;
pub mod remediation;
pub mod report;
pub mod scoring;
pub mod violation;

pub use context::EvaluationContext;
pub use defeat_view::DefeatView;
pub use diagnostics::ObjectDiagnostic;
pub use engine::{evaluate, CoherenceEvaluator};
pub use remediation::{Remediation, RemediationKind};
pub use report::{CoherenceReport, CoherenceStatus};
pub use violation::{Severity, Violation};
