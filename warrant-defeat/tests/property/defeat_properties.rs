//! Property tests: defeat never raises effective confidence; labelling is deterministic.

use proptest::prelude::*;

use warrant_core::ConfidenceValue;
use warrant_defeat::{compute_grounded_extension, AttackType, Claim, DefeatGraph, Defeater};

#[derive(Debug, Clone)]
struct Addition {
    strength: f64,
    attack: AttackType,
    activate: bool,
    /// Index into the defeaters added so far; `None` targets the claim.
    second_order: Option<usize>,
}

fn addition() -> impl Strategy<Value = Addition> {
    (
        0.0_f64..=1.0,
        prop_oneof![
            Just(AttackType::Rebutting),
            Just(AttackType::Undercutting),
            Just(AttackType::Undermining),
        ],
        any::<bool>(),
        prop::option::of(0usize..8),
    )
        .prop_map(|(strength, attack, activate, second_order)| Addition {
            strength,
            attack,
            activate,
            second_order,
        })
}

fn base_graph(supports: &[f64]) -> DefeatGraph {
    let mut claim = Claim::new("C", "claim under attack", ConfidenceValue::certain("seed"));
    for (i, s) in supports.iter().enumerate() {
        claim = claim.with_support(format!("e{i}"), *s);
    }
    let mut g = DefeatGraph::new();
    g.add_claim(claim).unwrap();
    g
}

proptest! {
    #[test]
    fn adding_defeaters_never_raises_effective_confidence(
        supports in prop::collection::vec(0.0_f64..=0.5, 0..4),
        additions in prop::collection::vec(addition(), 1..12),
    ) {
        let mut g = base_graph(&supports);
        let mut previous = g.effective_confidence("C").unwrap();
        let mut added: Vec<String> = Vec::new();

        for (i, a) in additions.iter().enumerate() {
            let id = format!("d{i:02}");
            let target = match a.second_order {
                Some(k) if !added.is_empty() => added[k % added.len()].clone(),
                _ => "C".to_string(),
            };
            let mut d = Defeater::with_id(&id, format!("src{i}"), vec![target], a.attack, a.strength)
                .unwrap();
            if a.activate {
                d.activate().unwrap();
            }
            g.add_defeater(d).unwrap();
            added.push(id);

            let current = g.effective_confidence("C").unwrap();
            prop_assert!(current <= previous + 1e-12, "{} > {}", current, previous);
            prop_assert!((0.0..=1.0).contains(&current));
            previous = current;
        }
    }

    #[test]
    fn labelling_is_reproducible(
        additions in prop::collection::vec(addition(), 1..12),
    ) {
        let mut g = base_graph(&[0.5]);
        let mut added: Vec<String> = Vec::new();
        for (i, a) in additions.iter().enumerate() {
            let id = format!("d{i:02}");
            let target = match a.second_order {
                Some(k) if !added.is_empty() => added[k % added.len()].clone(),
                _ => "C".to_string(),
            };
            let mut d = Defeater::with_id(&id, format!("src{i}"), vec![target], a.attack, a.strength)
                .unwrap();
            if a.activate {
                d.activate().unwrap();
            }
            g.add_defeater(d).unwrap();
            added.push(id);
        }
        let first = compute_grounded_extension(&g, 1000);
        let second = compute_grounded_extension(&g, 1000);
        prop_assert!(first.converged());
        prop_assert_eq!(first, second);
    }
}
