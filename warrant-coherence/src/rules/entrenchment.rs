use warrant_core::config::RuleKind;
use warrant_core::constants::FLOAT_TOLERANCE;

use super::{ICoherenceRule, RuleContext};
use crate::evaluator::{Severity, Violation};

/// Entrenchment must not increase from one level to the next.
pub struct EntrenchmentOrderingRule;

impl ICoherenceRule for EntrenchmentOrderingRule {
    fn kind(&self) -> RuleKind {
        RuleKind::EntrenchmentOrdering
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<Violation> {
        ctx.network
            .levels()
            .windows(2)
            .filter(|pair| pair[1].entrenchment > pair[0].entrenchment + FLOAT_TOLERANCE)
            .map(|pair| {
                let (lower, upper) = (&pair[0], &pair[1]);
                Violation::new(
                    self.kind(),
                    Severity::Warning,
                    format!(
                        "level {} (position {}) is more entrenched ({}) than level {} below it ({})",
                        upper.name, upper.position, upper.entrenchment, lower.name, lower.entrenchment
                    ),
                )
                .with_levels([lower.name.as_str(), upper.name.as_str()])
            })
            .collect()
    }
}
