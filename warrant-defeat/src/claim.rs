use serde::{Deserialize, Serialize};

use warrant_core::ConfidenceValue;

/// A positive support feeding a claim's base confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Support {
    /// Id of the supporting evidence or object.
    pub source: String,
    pub strength: f64,
}

/// A proposition under defeat analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub id: String,
    pub proposition: String,
    pub confidence: ConfidenceValue,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supports: Vec<Support>,
}

impl Claim {
    pub fn new(
        id: impl Into<String>,
        proposition: impl Into<String>,
        confidence: ConfidenceValue,
    ) -> Self {
        Self {
            id: id.into(),
            proposition: proposition.into(),
            confidence,
            supports: Vec::new(),
        }
    }

    pub fn with_support(mut self, source: impl Into<String>, strength: f64) -> Self {
        self.supports.push(Support {
            source: source.into(),
            strength,
        });
        self
    }

    /// Confidence before any defeat: summed support strengths, or the claim's
    /// own effective confidence when it lists no supports.
    ///
    /// The support sum is not clamped and may exceed 1; surplus support
    /// absorbs defeat before [`DefeatGraph::effective_confidence`] clamps.
    ///
    /// [`DefeatGraph::effective_confidence`]: crate::DefeatGraph::effective_confidence
    pub fn base_confidence(&self) -> f64 {
        if self.supports.is_empty() {
            self.confidence.effective_value()
        } else {
            self.supports.iter().map(|s| s.strength).sum()
        }
    }
}
