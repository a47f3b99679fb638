//! Property tests: evaluation ignores insertion order, is idempotent, and
//! reports a closed grounding chain as exactly one cycle through its root.

use std::collections::BTreeSet;

use proptest::prelude::*;

use warrant_coherence::{
    Attitude, CoherenceNetwork, EpistemicObject, EvaluationContext, GroundingEdge,
    GroundingStrength, GroundingType,
};
use warrant_core::config::{CoherenceConfig, RuleKind};

#[derive(Debug, Clone)]
struct EdgePlan {
    from: usize,
    to: usize,
    kind: GroundingType,
    strength: f64,
}

fn id(i: usize) -> String {
    format!("o{i:02}")
}

fn attitude() -> impl Strategy<Value = Attitude> {
    prop_oneof![
        Just(Attitude::Accepting),
        Just(Attitude::Rejecting),
        Just(Attitude::Entertaining),
        Just(Attitude::Questioning),
        Just(Attitude::Suspending),
    ]
}

fn edge_plan(n: usize) -> impl Strategy<Value = EdgePlan> {
    (
        0..n,
        0..n,
        prop_oneof![
            Just(GroundingType::Full),
            Just(GroundingType::Partial),
            Just(GroundingType::Enabling),
            Just(GroundingType::Undermining),
            Just(GroundingType::Rebutting),
            Just(GroundingType::Undercutting),
        ],
        0.05_f64..0.95,
    )
        .prop_map(|(a, b, kind, strength)| {
            // Positive grounding only points from lower to higher index, so no
            // pair is ever grounded both ways.
            let (from, to) = if kind.is_positive() && a > b { (b, a) } else { (a, b) };
            let strength = if kind == GroundingType::Full { 1.0 } else { strength };
            EdgePlan {
                from,
                to,
                kind,
                strength,
            }
        })
}

fn network_parts() -> impl Strategy<Value = (Vec<Attitude>, Vec<EdgePlan>)> {
    (2usize..10).prop_flat_map(|n| {
        (
            prop::collection::vec(attitude(), n),
            prop::collection::vec(edge_plan(n), 0..20),
        )
    })
}

fn materialize(
    attitudes: &[Attitude],
    plans: &[EdgePlan],
) -> (Vec<EpistemicObject>, Vec<GroundingEdge>) {
    let objects = attitudes
        .iter()
        .enumerate()
        .map(|(i, a)| EpistemicObject::with_id(id(i), format!("belief {i}"), *a))
        .collect();
    let edges = plans
        .iter()
        .enumerate()
        .filter(|(_, s)| s.from != s.to)
        .map(|(k, s)| {
            GroundingEdge::with_id(
                format!("e{k:02}"),
                id(s.from),
                id(s.to),
                s.kind,
                GroundingStrength::new(s.strength, "generated"),
            )
            .unwrap()
        })
        .collect();
    (objects, edges)
}

fn build(objects: Vec<EpistemicObject>, edges: Vec<GroundingEdge>) -> CoherenceNetwork {
    CoherenceNetwork::construct("prop", objects, edges, vec![], CoherenceConfig::default())
        .unwrap()
}

proptest! {
    #[test]
    fn evaluation_ignores_insertion_order((attitudes, plans) in network_parts()) {
        let (objects, edges) = materialize(&attitudes, &plans);
        let forward = build(objects.clone(), edges.clone());

        let mut objects = objects;
        let mut edges = edges;
        objects.reverse();
        edges.reverse();
        let backward = build(objects, edges);

        let ctx = EvaluationContext::default();
        prop_assert_eq!(forward.fingerprint(), backward.fingerprint());
        prop_assert_eq!(forward.evaluate(&ctx), backward.evaluate(&ctx));
    }

    #[test]
    fn evaluation_is_idempotent((attitudes, plans) in network_parts()) {
        let (objects, edges) = materialize(&attitudes, &plans);
        let mut network = build(objects, edges);
        let ctx = EvaluationContext::default();

        let first = network.evaluate(&ctx);
        prop_assert_eq!(&first, &network.evaluate(&ctx));
        prop_assert_eq!(&first, &network.evaluate_cached(&ctx));
        prop_assert_eq!(&first, &network.evaluate_cached(&ctx));
    }

    #[test]
    fn closed_chain_is_one_cycle_through_root(
        n in 3usize..9,
        extra in prop::collection::vec((0usize..9, 0usize..9), 0..10),
    ) {
        let objects: Vec<_> = (0..n)
            .map(|i| EpistemicObject::with_id(id(i), format!("step {i}"), Attitude::Accepting))
            .collect();

        let mut pairs: BTreeSet<(usize, usize)> = (0..n - 1).map(|i| (i, i + 1)).collect();
        for (a, b) in extra {
            let (a, b) = (a % n, b % n);
            let (lo, hi) = (a.min(b), a.max(b));
            if hi - lo >= 2 && (lo, hi) != (0, n - 1) {
                pairs.insert((lo, hi));
            }
        }
        pairs.insert((n - 1, 0));

        let edges = pairs
            .iter()
            .map(|(from, to)| {
                GroundingEdge::with_id(
                    format!("{}-{}", id(*from), id(*to)),
                    id(*from),
                    id(*to),
                    GroundingType::Enabling,
                    GroundingStrength::new(0.5, "chain"),
                )
                .unwrap()
            })
            .collect();

        let report = build(objects, edges).evaluate(&EvaluationContext::default());
        let cycles = report.status.violations_for(&RuleKind::Acyclicity);
        prop_assert_eq!(cycles.len(), 1);

        let path = &cycles[0].path;
        let last = id(n - 1);
        prop_assert_eq!(path.first().map(String::as_str), Some("o00"));
        prop_assert_eq!(path.last().map(String::as_str), Some("o00"));
        prop_assert!(path.contains(&last));

        // Chords may shorten the cycle, but every hop must be a real edge.
        let index = |s: &String| s[1..].parse::<usize>().unwrap();
        for hop in path.windows(2) {
            prop_assert!(pairs.contains(&(index(&hop[0]), index(&hop[1]))));
        }
        let members: BTreeSet<&String> = path[..path.len() - 1].iter().collect();
        prop_assert_eq!(members.len(), path.len() - 1);
        let expected: Vec<String> = members.into_iter().cloned().collect();
        prop_assert_eq!(&cycles[0].objects, &expected);
    }
}
