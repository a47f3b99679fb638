//! Confidence values and the operators that compose them.
//!
//! A [`ConfidenceValue`] is a closed sum type: every number carries its
//! provenance, and "unknown" is a variant of its own rather than a sentinel.

pub mod calibration;
pub mod derivation;
pub mod interval;
pub mod level;
pub mod measurement;
pub mod trail;
pub mod value;

pub use calibration::CalibrationStatus;
pub use derivation::{
    derive_correlated, derive_parallel_all, derive_parallel_any, derive_sequential,
    derive_weighted, join, meet, CorrelationMode,
};
pub use interval::Interval;
pub use level::ConfidenceLevel;
pub use measurement::Measurement;
pub use trail::TrailEntry;
pub use value::{
    AbsentConfidence, AbsentReason, BoundBasis, BoundedConfidence, ConfidenceKind,
    ConfidenceValue, DerivationInput, DerivedConfidence, DeterministicConfidence,
    MeasuredConfidence,
};
