use std::collections::BTreeMap;

use petgraph::unionfind::UnionFind;

use warrant_core::config::RuleKind;

use super::{ICoherenceRule, RuleContext};
use crate::evaluator::{Severity, Violation};

/// Connected components over the undirected closure of live edges. Every
/// component but the largest is a disconnected fragment.
pub struct CoverageRule;

impl ICoherenceRule for CoverageRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Coverage
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<Violation> {
        let ids: Vec<&str> = ctx.index.active_objects().map(|o| o.id.as_str()).collect();
        if ids.len() < 2 {
            return Vec::new();
        }
        let position: BTreeMap<&str, usize> =
            ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();

        let mut sets = UnionFind::<usize>::new(ids.len());
        for edge in ctx.index.live_edges() {
            if let (Some(&a), Some(&b)) = (
                position.get(edge.from.as_str()),
                position.get(edge.to.as_str()),
            ) {
                sets.union(a, b);
            }
        }

        // Members arrive in id order, so each component comes out sorted.
        let mut by_root: BTreeMap<usize, Vec<&str>> = BTreeMap::new();
        for (i, id) in ids.iter().copied().enumerate() {
            by_root.entry(sets.find(i)).or_default().push(id);
        }
        let mut components: Vec<Vec<&str>> = by_root.into_values().collect();
        if components.len() < 2 {
            return Vec::new();
        }
        components.sort_by(|a, b| a[0].cmp(b[0]));

        let largest = components
            .iter()
            .enumerate()
            .fold(0, |best, (i, c)| if c.len() > components[best].len() { i } else { best });
        let main_size = components[largest].len();

        components
            .into_iter()
            .enumerate()
            .filter(|(i, _)| *i != largest)
            .map(|(_, members)| {
                Violation::new(
                    self.kind(),
                    Severity::Warning,
                    format!(
                        "{} object(s) starting at {} are disconnected from the main component of {}",
                        members.len(),
                        members[0],
                        main_size
                    ),
                )
                .with_objects(members)
            })
            .collect()
    }
}
