/// Errors raised while constructing or combining confidence values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfidenceError {
    #[error("deterministic confidence must be exactly 0 or 1, got {value}")]
    NonBinaryDeterministic { value: f64 },

    #[error("confidence value {value} for {field} is outside [0, 1]")]
    OutOfRange { field: String, value: f64 },

    #[error("interval [{low}, {high}] is inverted")]
    InvertedInterval { low: f64, high: f64 },

    #[error("invalid measurement for dataset {dataset_id}: {reason}")]
    InvalidMeasurement { dataset_id: String, reason: String },

    #[error("invalid weights: {reason}")]
    InvalidWeights { reason: String },

    #[error("correlation {rho} is outside [0, 1]")]
    InvalidCorrelation { rho: f64 },

    #[error("derived confidence {formula} has no inputs")]
    MissingInputs { formula: String },
}
