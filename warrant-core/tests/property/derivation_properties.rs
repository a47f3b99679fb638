//! Property tests for the derivation operators.

use proptest::prelude::*;

use warrant_core::confidence::{
    derive_parallel_all, derive_parallel_any, derive_sequential, AbsentReason, BoundBasis,
    CalibrationStatus, ConfidenceValue, DerivationInput,
};

fn leaf() -> impl Strategy<Value = ConfidenceValue> {
    prop_oneof![
        any::<bool>().prop_map(|passed| if passed {
            ConfidenceValue::certain("check passed")
        } else {
            ConfidenceValue::impossible("check failed")
        }),
        (0.0_f64..=1.0).prop_map(|v| {
            ConfidenceValue::derived(
                v,
                "estimate",
                vec![DerivationInput::new("seed", ConfidenceValue::certain("seed"))],
                Some(CalibrationStatus::Preserved),
            )
            .unwrap()
        }),
        (0.0_f64..=1.0, 0.0_f64..=1.0).prop_map(|(a, b)| {
            ConfidenceValue::bounded(a.min(b), a.max(b), BoundBasis::Literature, "bound").unwrap()
        }),
        Just(ConfidenceValue::absent(AbsentReason::InsufficientData)),
    ]
}

proptest! {
    #[test]
    fn sequential_bounded_by_min_numeric_input(inputs in prop::collection::vec(leaf(), 1..8)) {
        let result = derive_sequential(&inputs);
        if inputs.iter().any(ConfidenceValue::is_absent) {
            prop_assert!(result.is_absent());
        } else {
            let v = result.numeric_value().unwrap();
            for input in inputs.iter().filter_map(ConfidenceValue::numeric_value) {
                prop_assert!(v <= input + 1e-12);
            }
        }
    }

    #[test]
    fn operators_stay_in_unit_interval(inputs in prop::collection::vec(leaf(), 1..8)) {
        for result in [
            derive_sequential(&inputs),
            derive_parallel_all(&inputs),
            derive_parallel_any(&inputs),
        ] {
            if let Some(interval) = result.interval() {
                prop_assert!((0.0..=1.0).contains(&interval.low()));
                prop_assert!((0.0..=1.0).contains(&interval.high()));
                prop_assert!(interval.low() <= interval.high());
            }
            prop_assert!(result.validate().is_ok());
        }
    }

    #[test]
    fn composition_never_upgrades_calibration(inputs in prop::collection::vec(leaf(), 1..8)) {
        let result = derive_parallel_all(&inputs);
        if !result.is_absent() {
            let worst = CalibrationStatus::combine_all(
                inputs.iter().map(ConfidenceValue::calibration_status),
            );
            prop_assert!(result.calibration_status() >= worst);
        }
    }

    #[test]
    fn parallel_all_never_exceeds_parallel_any(inputs in prop::collection::vec(leaf(), 1..8)) {
        let all = derive_parallel_all(&inputs);
        let any = derive_parallel_any(&inputs);
        if let (Some(a), Some(b)) = (all.numeric_value(), any.numeric_value()) {
            prop_assert!(a <= b + 1e-12);
        }
    }
}
