use std::fmt;

/// Errors raised while constructing a grounding edge.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GroundingError {
    #[error("grounding edge cannot connect {object_id} to itself")]
    Reflexive { object_id: String },

    #[error("{grounding_type} grounding requires strength {expected}, got {actual}")]
    StrengthTypeMismatch {
        grounding_type: String,
        expected: StrengthRequirement,
        actual: f64,
    },

    #[error("grounding strength {value} is outside (0, 1]")]
    StrengthOutOfRange { value: f64 },
}

/// What a grounding type demands of its strength.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrengthRequirement {
    /// Exactly 1.0.
    Exactly(f64),
    /// Strictly between 0 and 1.
    OpenUnit,
    /// In (0, 1].
    HalfOpenUnit,
}

impl fmt::Display for StrengthRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exactly(v) => write!(f, "exactly {v}"),
            Self::OpenUnit => f.write_str("in (0, 1)"),
            Self::HalfOpenUnit => f.write_str("in (0, 1]"),
        }
    }
}
