//! # warrant-coherence
//!
//! Coherence networks: epistemic objects linked by typed grounding edges,
//! optionally placed on abstraction levels, evaluated against a rule set.
//!
//! Construction errors (reflexive edges, asymmetry, strength/type mismatch,
//! dangling references, duplicate ids) are raised at the introducing call.
//! Everything the rules find is returned as data in a [`CoherenceReport`]:
//! violations with severities, per-object diagnostics, and ranked
//! remediation. Defeating edges are resolved through `warrant-defeat`.

pub mod evaluator;
pub mod model;
pub mod network;
pub mod rules;

pub use evaluator::{
    evaluate, CoherenceEvaluator, CoherenceReport, CoherenceStatus, EvaluationContext,
    ObjectDiagnostic, Remediation, RemediationKind, Severity, Violation,
};
pub use model::{
    construct_grounding, AbstractionLevel, Attitude, EpistemicObject, GroundingEdge,
    GroundingStrength, GroundingType, ObjectRevision, ObjectStatus, Revision,
};
pub use network::{CoherenceNetwork, NetworkIndex, NetworkSnapshot};
pub use rules::{GroundingStatus, ICoherenceRule, RuleContext};
