//! CoherenceEvaluator: runs the rule set over one network and assembles the
//! report. Always returns a complete report, however broken the network.

use std::collections::BTreeSet;

use warrant_core::config::RuleKind;

use super::context::EvaluationContext;
use super::defeat_view::DefeatView;
use super::diagnostics::compute_diagnostics;
use super::remediation;
use super::report::{CoherenceReport, CoherenceStatus};
use super::scoring;
use super::violation::Violation;
use crate::network::{CoherenceNetwork, NetworkIndex};
use crate::rules::{builtin_rule, grounding_status, ICoherenceRule, RuleContext};

/// Built-in rules plus any registered custom rules.
#[derive(Default)]
pub struct CoherenceEvaluator {
    custom: Vec<Box<dyn ICoherenceRule>>,
}

impl CoherenceEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Custom rules run after the built-ins on every evaluation, in
    /// registration order.
    pub fn register(&mut self, rule: Box<dyn ICoherenceRule>) {
        self.custom.push(rule);
    }

    pub fn with_rule(mut self, rule: Box<dyn ICoherenceRule>) -> Self {
        self.register(rule);
        self
    }

    pub fn evaluate(
        &self,
        network: &CoherenceNetwork,
        context: &EvaluationContext,
    ) -> CoherenceReport {
        let span = warrant_core::evaluate_span!(
            network.id(),
            network.object_count(),
            network.edge_count()
        );
        let _guard = span.enter();

        let config = network.config();
        let index = NetworkIndex::build(network);
        let rule_ctx = RuleContext {
            network,
            index: &index,
            config,
        };

        // Integrity first, then enabled built-ins in configured order, then custom.
        let mut order: Vec<RuleKind> = vec![RuleKind::Integrity];
        let mut seen: BTreeSet<RuleKind> = order.iter().cloned().collect();
        for kind in &config.rules {
            if config.is_enabled(kind) && seen.insert(kind.clone()) {
                order.push(kind.clone());
            }
        }

        let mut violations: Vec<Violation> = Vec::new();
        let mut rules_evaluated = Vec::new();
        for kind in order {
            let Some(rule) = builtin_rule(&kind) else {
                continue;
            };
            let found = rule.evaluate(&rule_ctx);
            tracing::debug!(rule = kind.as_str(), violations = found.len(), "rule evaluated");
            violations.extend(found);
            rules_evaluated.push(kind);
        }
        for rule in &self.custom {
            let kind = rule.kind();
            let found = rule.evaluate(&rule_ctx);
            tracing::debug!(rule = kind.as_str(), violations = found.len(), "custom rule evaluated");
            violations.extend(found);
            rules_evaluated.push(kind);
        }

        let defeat = DefeatView::build(&index, context.max_defeat_iterations);
        let undecided = defeat.undecided_objects();

        let floor = config.min_grounding_strength;
        let statuses: Vec<_> = network
            .objects()
            .map(|o| grounding_status(&index, o, floor).0)
            .collect();
        let score = scoring::score(&violations, &statuses, &config.penalties);

        let diagnostics = if context.diagnostics {
            compute_diagnostics(&index, &defeat, floor)
        } else {
            Vec::new()
        };
        let remediation = remediation::plan(network, &violations, &undecided);

        let coherent = !violations.iter().any(Violation::is_error);
        tracing::info!(
            coherent,
            score,
            violations = violations.len(),
            undecided = undecided.len(),
            "coherence evaluated"
        );

        CoherenceReport {
            status: CoherenceStatus {
                coherent,
                score,
                violations,
                undecided,
                labelling_converged: defeat.labelling().converged(),
                rules_evaluated,
                fingerprint: network.fingerprint(),
            },
            diagnostics,
            remediation,
        }
    }
}

/// Evaluate with the built-in rules only.
pub fn evaluate(network: &CoherenceNetwork, context: &EvaluationContext) -> CoherenceReport {
    CoherenceEvaluator::new().evaluate(network, context)
}
