use warrant_core::config::{GroundingDirection, RuleKind};

use super::{ICoherenceRule, RuleContext};
use crate::evaluator::{Severity, Violation};

/// Positive grounding of a leveled object must come from the right side of it.
///
/// Bottom-up networks need a strictly lower source position, top-down ones a
/// strictly higher one. A source with no level cannot be placed and only
/// warns.
pub struct LevelGroundingRule;

impl ICoherenceRule for LevelGroundingRule {
    fn kind(&self) -> RuleKind {
        RuleKind::LevelGrounding
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<Violation> {
        let direction = ctx.config.grounding_direction;
        if direction == GroundingDirection::Bidirectional {
            return Vec::new();
        }

        let mut violations = Vec::new();
        for edge in ctx.index.live_edges() {
            if !edge.is_positive() {
                continue;
            }
            let (Some(from), Some(to)) = (ctx.network.object(&edge.from), ctx.network.object(&edge.to))
            else {
                continue;
            };
            let Some(to_position) = ctx.index.level_position(to) else {
                continue;
            };

            let Some(from_position) = ctx.index.level_position(from) else {
                violations.push(
                    Violation::new(
                        self.kind(),
                        Severity::Warning,
                        format!(
                            "{} (level {}) is grounded by unleveled {}",
                            to.id, to_position, from.id
                        ),
                    )
                    .with_objects([from.id.as_str(), to.id.as_str()])
                    .with_edges([edge.id.as_str()]),
                );
                continue;
            };

            let ordered = match direction {
                GroundingDirection::BottomUp => from_position < to_position,
                GroundingDirection::TopDown => from_position > to_position,
                GroundingDirection::Bidirectional => true,
            };
            if !ordered {
                let expected = match direction {
                    GroundingDirection::TopDown => "higher",
                    _ => "lower",
                };
                violations.push(
                    Violation::new(
                        self.kind(),
                        Severity::Error,
                        format!(
                            "{} (level {}) is grounded by {} (level {}); grounds must come from a strictly {} level",
                            to.id, to_position, from.id, from_position, expected
                        ),
                    )
                    .with_objects([from.id.as_str(), to.id.as_str()])
                    .with_edges([edge.id.as_str()]),
                );
            }
        }
        violations
    }
}
