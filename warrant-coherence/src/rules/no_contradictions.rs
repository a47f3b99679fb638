use warrant_core::config::RuleKind;

use super::{ICoherenceRule, RuleContext};
use crate::evaluator::{Severity, Violation};
use crate::model::GroundingType;

/// An undermining or rebutting edge between two accepted objects.
pub struct NoContradictionsRule;

impl ICoherenceRule for NoContradictionsRule {
    fn kind(&self) -> RuleKind {
        RuleKind::NoContradictions
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<Violation> {
        let mut violations = Vec::new();
        for edge in ctx.index.live_edges() {
            if !edge.grounding_type.contradicts() {
                continue;
            }
            let accepted = |id: &str| ctx.network.object(id).is_some_and(|o| o.is_accepting());
            if accepted(edge.from.as_str()) && accepted(edge.to.as_str()) {
                let verb = match edge.grounding_type {
                    GroundingType::Rebutting => "rebuts",
                    _ => "undermines",
                };
                violations.push(
                    Violation::new(
                        self.kind(),
                        Severity::Error,
                        format!("{} {verb} {} while both are accepted", edge.from, edge.to),
                    )
                    .with_objects([edge.from.as_str(), edge.to.as_str()])
                    .with_edges([edge.id.as_str()]),
                );
            }
        }
        violations
    }
}
