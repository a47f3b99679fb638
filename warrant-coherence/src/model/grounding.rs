//! Grounding edges: the "in virtue of" relation between epistemic objects.

use serde::{Deserialize, Serialize};

use warrant_core::errors::grounding_error::StrengthRequirement;
use warrant_core::errors::GroundingError;
use warrant_defeat::AttackType;

/// What kind of grounding an edge expresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroundingType {
    /// The source wholly grounds the target. Strength must be exactly 1.
    Full,
    /// The source partly grounds the target. Strength strictly inside (0, 1).
    Partial,
    /// The source is a precondition for the target.
    Enabling,
    /// Attacks the quality or provenance of the target's evidence.
    Undermining,
    /// Asserts the target's negation.
    Rebutting,
    /// Attacks the link between the target and its evidence.
    Undercutting,
}

impl GroundingType {
    pub const POSITIVE: [GroundingType; 3] = [Self::Full, Self::Partial, Self::Enabling];
    pub const DEFEATING: [GroundingType; 3] =
        [Self::Undermining, Self::Rebutting, Self::Undercutting];

    pub fn is_positive(&self) -> bool {
        matches!(self, Self::Full | Self::Partial | Self::Enabling)
    }

    pub fn is_defeating(&self) -> bool {
        !self.is_positive()
    }

    /// Whether an edge of this type with both endpoints accepted is a contradiction.
    pub fn contradicts(&self) -> bool {
        matches!(self, Self::Undermining | Self::Rebutting)
    }

    /// The attack a defeating edge becomes in a defeat graph.
    pub fn attack_type(&self) -> Option<AttackType> {
        match self {
            Self::Undermining => Some(AttackType::Undermining),
            Self::Rebutting => Some(AttackType::Rebutting),
            Self::Undercutting => Some(AttackType::Undercutting),
            Self::Full | Self::Partial | Self::Enabling => None,
        }
    }

    pub fn strength_requirement(&self) -> StrengthRequirement {
        match self {
            Self::Full => StrengthRequirement::Exactly(1.0),
            Self::Partial => StrengthRequirement::OpenUnit,
            _ => StrengthRequirement::HalfOpenUnit,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Partial => "partial",
            Self::Enabling => "enabling",
            Self::Undermining => "undermining",
            Self::Rebutting => "rebutting",
            Self::Undercutting => "undercutting",
        }
    }
}

/// How strong a grounding is, and on what basis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundingStrength {
    pub value: f64,
    /// Free-form description of where the number comes from.
    pub basis: String,
}

impl GroundingStrength {
    pub fn new(value: f64, basis: impl Into<String>) -> Self {
        Self {
            value,
            basis: basis.into(),
        }
    }

    /// Strength 1.0, for full grounding.
    pub fn full(basis: impl Into<String>) -> Self {
        Self::new(1.0, basis)
    }
}

/// A directed grounding edge between two objects, referenced by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundingEdge {
    pub id: String,
    pub from: String,
    pub to: String,
    pub grounding_type: GroundingType,
    pub strength: GroundingStrength,
    pub active: bool,
}

/// Build a validated, active grounding edge with a generated id.
pub fn construct_grounding(
    from: impl Into<String>,
    to: impl Into<String>,
    grounding_type: GroundingType,
    strength: GroundingStrength,
) -> Result<GroundingEdge, GroundingError> {
    GroundingEdge::with_id(
        uuid::Uuid::new_v4().to_string(),
        from,
        to,
        grounding_type,
        strength,
    )
}

impl GroundingEdge {
    /// Build a validated, active grounding edge with a caller-supplied id.
    pub fn with_id(
        id: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        grounding_type: GroundingType,
        strength: GroundingStrength,
    ) -> Result<Self, GroundingError> {
        let edge = Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            grounding_type,
            strength,
            active: true,
        };
        edge.validate()?;
        Ok(edge)
    }

    /// Irreflexivity plus the strength constraint of the grounding type.
    pub fn validate(&self) -> Result<(), GroundingError> {
        if self.from == self.to {
            return Err(GroundingError::Reflexive {
                object_id: self.from.clone(),
            });
        }
        let v = self.strength.value;
        if !v.is_finite() || v <= 0.0 || v > 1.0 {
            return Err(GroundingError::StrengthOutOfRange { value: v });
        }
        let requirement = self.grounding_type.strength_requirement();
        let ok = match requirement {
            StrengthRequirement::Exactly(expected) => v == expected,
            StrengthRequirement::OpenUnit => v < 1.0,
            StrengthRequirement::HalfOpenUnit => true,
        };
        if !ok {
            return Err(GroundingError::StrengthTypeMismatch {
                grounding_type: self.grounding_type.as_str().to_string(),
                expected: requirement,
                actual: v,
            });
        }
        Ok(())
    }

    pub fn is_positive(&self) -> bool {
        self.grounding_type.is_positive()
    }

    pub fn is_defeating(&self) -> bool {
        self.grounding_type.is_defeating()
    }
}
