use super::{CoherenceError, ConfidenceError, ConfigError, DefeatError, GroundingError};

/// Top-level error aggregating every subsystem error via `From` conversions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WarrantError {
    #[error("confidence error: {0}")]
    Confidence(#[from] ConfidenceError),

    #[error("grounding error: {0}")]
    Grounding(#[from] GroundingError),

    #[error("coherence error: {0}")]
    Coherence(#[from] CoherenceError),

    #[error("defeat error: {0}")]
    Defeat(#[from] DefeatError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for WarrantError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Convenience alias used across the workspace.
pub type WarrantResult<T> = Result<T, WarrantError>;
