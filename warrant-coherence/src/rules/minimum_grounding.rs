use serde::{Deserialize, Serialize};

use warrant_core::config::RuleKind;

use super::{ICoherenceRule, RuleContext};
use crate::evaluator::{Severity, Violation};
use crate::model::EpistemicObject;
use crate::network::NetworkIndex;

/// How well an object is grounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroundingStatus {
    /// Summed positive strength meets the floor.
    Grounded,
    /// Level 0 or unleveled, and below the floor: exempt.
    Foundation,
    /// Some positive grounding, but below the floor.
    Partial,
    /// No positive grounding at all.
    Ungrounded,
    /// Not in `active` status, so not assessed.
    Inactive,
}

impl GroundingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grounded => "grounded",
            Self::Foundation => "foundation",
            Self::Partial => "partial",
            Self::Ungrounded => "ungrounded",
            Self::Inactive => "inactive",
        }
    }
}

/// Grounding status and summed live positive strength for one object.
pub fn grounding_status(
    index: &NetworkIndex<'_>,
    object: &EpistemicObject,
    floor: f64,
) -> (GroundingStatus, f64) {
    if !object.is_active() {
        return (GroundingStatus::Inactive, 0.0);
    }
    let sum = index.grounding_sum(&object.id);
    let status = if sum > 0.0 && sum >= floor {
        GroundingStatus::Grounded
    } else if index.is_foundation(object) {
        GroundingStatus::Foundation
    } else if sum > 0.0 {
        GroundingStatus::Partial
    } else {
        GroundingStatus::Ungrounded
    };
    (status, sum)
}

/// Every non-foundation object needs summed positive grounding at or above
/// the configured floor.
pub struct MinimumGroundingRule;

impl ICoherenceRule for MinimumGroundingRule {
    fn kind(&self) -> RuleKind {
        RuleKind::MinimumGrounding
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<Violation> {
        let floor = ctx.config.min_grounding_strength;
        let mut violations = Vec::new();
        for object in ctx.index.active_objects() {
            let (status, sum) = grounding_status(ctx.index, object, floor);
            let violation = match status {
                GroundingStatus::Ungrounded => Violation::new(
                    self.kind(),
                    Severity::Error,
                    format!("{} has no positive grounding and is not a foundation", object.id),
                ),
                GroundingStatus::Partial => Violation::new(
                    self.kind(),
                    Severity::Warning,
                    format!(
                        "{} is grounded with strength {sum:.3}, below the floor {floor:.3}",
                        object.id
                    ),
                ),
                _ => continue,
            };
            let edges: Vec<&str> = ctx
                .index
                .positive_in(&object.id)
                .iter()
                .map(|e| e.id.as_str())
                .collect();
            violations.push(
                violation
                    .with_objects([object.id.as_str()])
                    .with_edges(edges),
            );
        }
        violations
    }
}
