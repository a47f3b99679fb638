use warrant_core::config::RuleKind;

use super::{ICoherenceRule, RuleContext};
use crate::evaluator::{Severity, Violation};

/// Dangling edge endpoints and unknown level names. Strict construction
/// rules these out; leniently loaded networks can still carry them.
pub struct IntegrityRule;

impl ICoherenceRule for IntegrityRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Integrity
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<Violation> {
        let dangling = ctx.index.dangling().iter().map(|(edge, missing)| {
            Violation::new(
                self.kind(),
                Severity::Error,
                format!("edge {} references unknown object {}", edge.id, missing),
            )
            .with_objects([*missing])
            .with_edges([edge.id.as_str()])
        });
        let levels = ctx.index.unknown_levels().iter().map(|(object, level)| {
            Violation::new(
                self.kind(),
                Severity::Error,
                format!("object {} references unknown level {}", object.id, level),
            )
            .with_objects([object.id.as_str()])
            .with_levels([*level])
        });
        dangling.chain(levels).collect()
    }
}
