//! Coherence rules. Each rule reads a shared [`RuleContext`] and returns
//! violations as data; none can fail.

pub mod acyclicity;
pub mod coverage;
pub mod entrenchment;
pub mod integrity;
pub mod level_grounding;
pub mod minimum_grounding;
pub mod no_contradictions;

use warrant_core::config::{CoherenceConfig, RuleKind};

use crate::evaluator::Violation;
use crate::network::{CoherenceNetwork, NetworkIndex};

pub use acyclicity::AcyclicityRule;
pub use coverage::CoverageRule;
pub use entrenchment::EntrenchmentOrderingRule;
pub use integrity::IntegrityRule;
pub use level_grounding::LevelGroundingRule;
pub use minimum_grounding::{grounding_status, GroundingStatus, MinimumGroundingRule};
pub use no_contradictions::NoContradictionsRule;

/// What a rule gets to look at.
pub struct RuleContext<'a> {
    pub network: &'a CoherenceNetwork,
    pub index: &'a NetworkIndex<'a>,
    pub config: &'a CoherenceConfig,
}

/// A coherence rule.
///
/// Implementations must be deterministic: the same network yields the same
/// violations in the same order.
pub trait ICoherenceRule: Send + Sync {
    /// Which rule this is. Custom rules return [`RuleKind::Custom`].
    fn kind(&self) -> RuleKind;

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<Violation>;
}

/// The implementation of a built-in rule. `None` for custom kinds.
pub fn builtin_rule(kind: &RuleKind) -> Option<Box<dyn ICoherenceRule>> {
    let rule: Box<dyn ICoherenceRule> = match kind {
        RuleKind::NoContradictions => Box::new(NoContradictionsRule),
        RuleKind::Acyclicity => Box::new(AcyclicityRule),
        RuleKind::LevelGrounding => Box::new(LevelGroundingRule),
        RuleKind::MinimumGrounding => Box::new(MinimumGroundingRule),
        RuleKind::Coverage => Box::new(CoverageRule),
        RuleKind::EntrenchmentOrdering => Box::new(EntrenchmentOrderingRule),
        RuleKind::Integrity => Box::new(IntegrityRule),
        RuleKind::Custom(_) => return None,
    };
    Some(rule)
}
