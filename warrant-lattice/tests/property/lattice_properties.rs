//! Property tests: lattice laws on generated samples.

use proptest::prelude::*;

use warrant_core::confidence::{
    AbsentReason, BoundBasis, CalibrationStatus, ConfidenceValue, DerivationInput,
};
use warrant_lattice::{ConfidenceLattice, LawChecker, ProbabilityLattice};

fn confidence() -> impl Strategy<Value = ConfidenceValue> {
    prop_oneof![
        Just(ConfidenceValue::certain("top")),
        Just(ConfidenceValue::absent(AbsentReason::Uncalibrated)),
        (0.0_f64..=1.0).prop_map(|v| {
            ConfidenceValue::derived(
                v,
                "generated",
                vec![DerivationInput::new("seed", ConfidenceValue::certain("seed"))],
                Some(CalibrationStatus::Preserved),
            )
            .unwrap()
        }),
        (0.0_f64..=1.0, 0.0_f64..=1.0).prop_map(|(a, b)| {
            ConfidenceValue::bounded(a.min(b), a.max(b), BoundBasis::FormalAnalysis, "gen")
                .unwrap()
        }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn confidence_lattice_laws_hold_on_generated_samples(
        samples in prop::collection::vec(confidence(), 1..6)
    ) {
        let report = LawChecker::new(&ConfidenceLattice, &samples).check_all();
        let failures: Vec<_> = report.failures().map(|c| (c.law, c.operation)).collect();
        prop_assert!(report.all_passed(), "failures: {:?}", failures);
    }

    #[test]
    fn probability_lattice_laws_hold_on_generated_samples(
        samples in prop::collection::vec(0.0_f64..=1.0, 1..8)
    ) {
        prop_assert!(LawChecker::new(&ProbabilityLattice, &samples).check_all().all_passed());
    }
}
