/// warrant version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Scalar used for `Absent` when a caller asks for an effective confidence.
pub const ABSENT_EFFECTIVE_CONFIDENCE: f64 = 0.0;

/// Tolerance for floating-point comparisons of strengths and scores.
pub const FLOAT_TOLERANCE: f64 = 1e-9;
