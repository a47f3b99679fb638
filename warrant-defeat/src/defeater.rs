//! Defeaters and their lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use warrant_core::errors::DefeatError;

/// How a defeater attacks its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackType {
    /// Asserts the target's negation.
    Rebutting,
    /// Attacks the inferential link; the evidence stands but no longer supports the target.
    Undercutting,
    /// Attacks the quality or provenance of the target's evidence.
    Undermining,
}

impl AttackType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rebutting => "rebutting",
            Self::Undercutting => "undercutting",
            Self::Undermining => "undermining",
        }
    }
}

/// `potential → active → {defeated, resolved}`, plus `potential → resolved`
/// for a potential defeater that is withdrawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DefeaterStatus {
    #[default]
    Potential,
    Active,
    Defeated,
    Resolved,
}

impl DefeaterStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Potential => "potential",
            Self::Active => "active",
            Self::Defeated => "defeated",
            Self::Resolved => "resolved",
        }
    }

    pub fn can_transition_to(&self, next: DefeaterStatus) -> bool {
        use DefeaterStatus::*;
        matches!(
            (*self, next),
            (Potential, Active) | (Potential, Resolved) | (Active, Defeated) | (Active, Resolved)
        )
    }

    /// Terminal states take no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Defeated | Self::Resolved)
    }
}

/// A typed attack from a source claim on one or more targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Defeater {
    pub id: String,
    /// Claim the attack originates from. The defeater stands only while its
    /// source stands, when the source is part of the same graph.
    pub source: String,
    /// Claims or defeaters under attack.
    pub targets: Vec<String>,
    pub attack_type: AttackType,
    pub status: DefeaterStatus,
    pub strength: f64,
    pub created_at: DateTime<Utc>,
    /// How specific the attack is, in `[0, 1]`.
    #[serde(default)]
    pub specificity: f64,
    /// Reliability of the source, in `[0, 1]`.
    #[serde(default)]
    pub reliability: f64,
}

impl Defeater {
    /// A potential defeater with a generated id.
    pub fn new(
        source: impl Into<String>,
        targets: Vec<String>,
        attack_type: AttackType,
        strength: f64,
    ) -> Result<Self, DefeatError> {
        Self::with_id(
            uuid::Uuid::new_v4().to_string(),
            source,
            targets,
            attack_type,
            strength,
        )
    }

    pub fn with_id(
        id: impl Into<String>,
        source: impl Into<String>,
        targets: Vec<String>,
        attack_type: AttackType,
        strength: f64,
    ) -> Result<Self, DefeatError> {
        let defeater = Self {
            id: id.into(),
            source: source.into(),
            targets,
            attack_type,
            status: DefeaterStatus::Potential,
            strength,
            created_at: Utc::now(),
            specificity: 0.5,
            reliability: 0.5,
        };
        defeater.validate()?;
        Ok(defeater)
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn with_specificity(mut self, specificity: f64) -> Self {
        self.specificity = specificity.clamp(0.0, 1.0);
        self
    }

    pub fn with_reliability(mut self, reliability: f64) -> Self {
        self.reliability = reliability.clamp(0.0, 1.0);
        self
    }

    /// Checks that hold without looking at the rest of the graph.
    pub fn validate(&self) -> Result<(), DefeatError> {
        if !self.strength.is_finite() || !(0.0..=1.0).contains(&self.strength) {
            return Err(DefeatError::InvalidStrength {
                value: self.strength,
            });
        }
        if self.targets.is_empty() {
            return Err(DefeatError::NoTargets {
                id: self.id.clone(),
            });
        }
        if self
            .targets
            .iter()
            .any(|t| *t == self.id || *t == self.source)
        {
            return Err(DefeatError::SelfAttack {
                id: self.id.clone(),
            });
        }
        Ok(())
    }

    pub fn attacks(&self, id: &str) -> bool {
        self.targets.iter().any(|t| t == id)
    }

    pub fn is_active(&self) -> bool {
        self.status == DefeaterStatus::Active
    }

    pub fn activate(&mut self) -> Result<(), DefeatError> {
        self.transition(DefeaterStatus::Active)
    }

    pub fn mark_defeated(&mut self) -> Result<(), DefeatError> {
        self.transition(DefeaterStatus::Defeated)
    }

    pub fn mark_resolved(&mut self) -> Result<(), DefeatError> {
        self.transition(DefeaterStatus::Resolved)
    }

    fn transition(&mut self, next: DefeaterStatus) -> Result<(), DefeatError> {
        if !self.status.can_transition_to(next) {
            return Err(DefeatError::InvalidTransition {
                id: self.id.clone(),
                from: self.status.as_str().to_string(),
                to: next.as_str().to_string(),
            });
        }
        tracing::debug!(
            defeater = %self.id,
            from = self.status.as_str(),
            to = next.as_str(),
            "defeater transition"
        );
        self.status = next;
        Ok(())
    }
}
