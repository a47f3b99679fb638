//! Compiled defaults for every configurable value.

/// Minimum summed positive grounding strength for a non-foundation object.
pub const DEFAULT_MIN_GROUNDING_STRENGTH: f64 = 0.3;
/// Maximum number of objects a single network may hold.
pub const DEFAULT_MAX_OBJECTS: usize = 100_000;

/// Score deduction per error-severity violation.
pub const DEFAULT_ERROR_PENALTY: f64 = 0.2;
/// Score deduction per warning-severity violation.
pub const DEFAULT_WARNING_PENALTY: f64 = 0.1;
/// Score deduction per info-severity violation.
pub const DEFAULT_INFO_PENALTY: f64 = 0.02;
/// Weight applied to the fraction of ungrounded objects.
pub const DEFAULT_UNGROUNDED_WEIGHT: f64 = 0.3;
/// Weight applied to the fraction of partially grounded objects.
pub const DEFAULT_PARTIAL_WEIGHT: f64 = 0.15;

/// Upper bound on defeat labelling steps.
pub const DEFAULT_MAX_DEFEAT_ITERATIONS: usize = 1000;
pub const DEFAULT_SPECIFICITY_WEIGHT: f64 = 0.4;
pub const DEFAULT_RECENCY_WEIGHT: f64 = 0.3;
pub const DEFAULT_RELIABILITY_WEIGHT: f64 = 0.3;
/// Age (days) at which a defeater's recency score halves.
pub const DEFAULT_RECENCY_HALF_LIFE_DAYS: f64 = 30.0;

pub const DEFAULT_LOG_LEVEL: &str = "info";
