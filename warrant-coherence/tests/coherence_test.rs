//! Tests for warrant-coherence: rule scenarios, construction errors, mutation
//! and caching, serialization, custom rules, and golden scenarios.

use serde_json::Value;
use test_fixtures::{golden_scenarios, load_fixture_value};
use warrant_coherence::{
    construct_grounding, AbstractionLevel, Attitude, CoherenceEvaluator, CoherenceNetwork,
    EpistemicObject, EvaluationContext, GroundingEdge, GroundingStatus, GroundingStrength,
    GroundingType, ICoherenceRule, ObjectRevision, ObjectStatus, RemediationKind, RuleContext,
    Severity, Violation,
};
use warrant_core::config::{CoherenceConfig, GroundingDirection, RuleKind};
use warrant_core::confidence::ConfidenceLevel;
use warrant_core::errors::{CoherenceError, GroundingError, WarrantError};
use warrant_defeat::Label;

fn object(id: &str, attitude: Attitude) -> EpistemicObject {
    EpistemicObject::with_id(id, format!("{id} holds"), attitude)
}

fn leveled(id: &str, level: &str) -> EpistemicObject {
    object(id, Attitude::Accepting).with_level(level)
}

fn edge(id: &str, from: &str, to: &str, kind: GroundingType, strength: f64) -> GroundingEdge {
    GroundingEdge::with_id(id, from, to, kind, GroundingStrength::new(strength, "test")).unwrap()
}

fn two_levels() -> Vec<AbstractionLevel> {
    vec![
        AbstractionLevel::new("base", 0, 0.9).unwrap(),
        AbstractionLevel::new("top", 1, 0.5).unwrap(),
    ]
}

fn build(
    objects: Vec<EpistemicObject>,
    edges: Vec<GroundingEdge>,
    levels: Vec<AbstractionLevel>,
    config: CoherenceConfig,
) -> CoherenceNetwork {
    CoherenceNetwork::construct("test", objects, edges, levels, config).unwrap()
}

/// Foundation A (level 0); B on level 1 grounded by A at 0.8; C undermines B at 0.5.
fn contradiction_network() -> CoherenceNetwork {
    build(
        vec![
            leveled("A", "base"),
            leveled("B", "top"),
            object("C", Attitude::Accepting),
        ],
        vec![
            edge("eAB", "A", "B", GroundingType::Partial, 0.8),
            edge("eCB", "C", "B", GroundingType::Undermining, 0.5),
        ],
        two_levels(),
        CoherenceConfig::default(),
    )
}

fn cycle_network(config: CoherenceConfig) -> CoherenceNetwork {
    build(
        vec![
            object("X", Attitude::Accepting),
            object("Y", Attitude::Accepting),
            object("Z", Attitude::Accepting),
        ],
        vec![
            edge("xy", "X", "Y", GroundingType::Full, 1.0),
            edge("yz", "Y", "Z", GroundingType::Full, 1.0),
            edge("zx", "Z", "X", GroundingType::Full, 1.0),
        ],
        vec![],
        config,
    )
}

fn ctx() -> EvaluationContext {
    EvaluationContext::default()
}

// =============================================================================
// Contradiction: C undermines B, both accepted
// =============================================================================
#[test]
fn contradiction_between_accepted_objects_is_an_error() {
    let report = contradiction_network().evaluate(&ctx());

    let contradictions = report.status.violations_for(&RuleKind::NoContradictions);
    assert_eq!(contradictions.len(), 1);
    assert_eq!(contradictions[0].severity, Severity::Error);
    assert_eq!(contradictions[0].objects, vec!["C", "B"]);
    assert_eq!(contradictions[0].edges, vec!["eCB"]);
    assert_eq!(report.status.violations.len(), 1);
    assert!(!report.is_coherent());

    let b = report.diagnostic("B").unwrap();
    assert!((b.effective_strength - 0.3).abs() < 1e-9);
    assert!((b.grounding_sum - 0.8).abs() < 1e-9);
    assert_eq!(b.grounding_status, GroundingStatus::Grounded);
    assert_eq!(b.active_defeaters, vec!["eCB"]);
    assert!(b.contradiction);
    assert_eq!(b.label, Some(Label::Out));
    assert_eq!(b.confidence_level, ConfidenceLevel::Low);

    assert!(!report.diagnostic("A").unwrap().contradiction);
    assert!(report.diagnostic("C").unwrap().contradiction);

    assert_eq!(
        report.remediation[0].kind,
        RemediationKind::ResolveContradiction
    );
}

#[test]
fn rejecting_target_is_not_a_contradiction() {
    let mut net = contradiction_network();
    net.revise_object("B", ObjectRevision::new("disputed").attitude(Attitude::Rejecting))
        .unwrap();
    let report = net.evaluate(&ctx());
    assert!(report
        .status
        .violations_for(&RuleKind::NoContradictions)
        .is_empty());
    assert!(report.is_coherent());
}

#[test]
fn retracted_attacker_stops_defeating() {
    let mut net = contradiction_network();
    net.retract_object("C", "suite re-enabled").unwrap();
    let report = net.evaluate(&ctx());

    assert!(report.is_coherent());
    let c = report.diagnostic("C").unwrap();
    assert_eq!(c.status, ObjectStatus::Retracted);
    assert_eq!(c.grounding_status, GroundingStatus::Inactive);
    assert_eq!(c.label, None);

    let b = report.diagnostic("B").unwrap();
    assert!((b.effective_strength - 0.8).abs() < 1e-9);
    assert!(b.active_defeaters.is_empty());
    assert_eq!(net.object("C").unwrap().history.len(), 1);
}

#[test]
fn surplus_grounding_absorbs_undermining() {
    let report = build(
        vec![
            leveled("A1", "base"),
            leveled("A2", "base"),
            leveled("B", "top"),
            object("C", Attitude::Accepting),
        ],
        vec![
            edge("a1b", "A1", "B", GroundingType::Partial, 0.6),
            edge("a2b", "A2", "B", GroundingType::Partial, 0.6),
            edge("cb", "C", "B", GroundingType::Undermining, 0.5),
        ],
        two_levels(),
        CoherenceConfig::default(),
    )
    .evaluate(&ctx());

    let b = report.diagnostic("B").unwrap();
    assert!((b.grounding_sum - 1.2).abs() < 1e-9);
    // 0.6 + 0.6 - 0.5, clamped only after defeat.
    assert!((b.effective_strength - 0.7).abs() < 1e-9);
    assert_eq!(b.active_defeaters, vec!["cb"]);
}

// =============================================================================
// Acyclicity: X -> Y -> Z -> X
// =============================================================================
#[test]
fn grounding_cycle_reports_full_path() {
    let report = cycle_network(CoherenceConfig::default()).evaluate(&ctx());

    let cycles = report.status.violations_for(&RuleKind::Acyclicity);
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].severity, Severity::Error);
    assert_eq!(cycles[0].path, vec!["X", "Y", "Z", "X"]);
    assert_eq!(cycles[0].edges, vec!["xy", "yz", "zx"]);
    assert_eq!(cycles[0].objects, vec!["X", "Y", "Z"]);

    let fix = report
        .remediation
        .iter()
        .find(|r| r.kind == RemediationKind::BreakCycle)
        .unwrap();
    assert_eq!(fix.edges, vec!["xy"]);
}

#[test]
fn allow_cycles_removes_acyclicity_violation() {
    let report = cycle_network(CoherenceConfig::default().with_allow_cycles(true)).evaluate(&ctx());
    assert!(report
        .status
        .violations_for(&RuleKind::Acyclicity)
        .is_empty());
    assert!(!report
        .status
        .rules_evaluated
        .contains(&RuleKind::Acyclicity));
    assert!(report.is_coherent());
}

#[test]
fn cycle_path_starts_at_smallest_id() {
    let net = build(
        vec![
            object("m", Attitude::Accepting),
            object("b", Attitude::Accepting),
            object("q", Attitude::Accepting),
            object("z", Attitude::Accepting),
        ],
        vec![
            edge("1", "q", "b", GroundingType::Enabling, 0.5),
            edge("2", "b", "m", GroundingType::Enabling, 0.5),
            edge("3", "m", "q", GroundingType::Enabling, 0.7),
            edge("4", "z", "m", GroundingType::Enabling, 0.5),
        ],
        vec![],
        CoherenceConfig::default(),
    );
    let report = net.evaluate(&ctx());
    let cycles = report.status.violations_for(&RuleKind::Acyclicity);
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].path, vec!["b", "m", "q", "b"]);
    let fix = report
        .remediation
        .iter()
        .find(|r| r.kind == RemediationKind::BreakCycle)
        .unwrap();
    // Two edges tie at 0.5; the smaller id wins.
    assert_eq!(fix.edges, vec!["1"]);
}

#[test]
fn inactive_edge_breaks_cycle() {
    let mut net = cycle_network(CoherenceConfig::default());
    net.set_edge_active("zx", false).unwrap();
    let report = net.evaluate(&ctx());
    assert!(report
        .status
        .violations_for(&RuleKind::Acyclicity)
        .is_empty());
}

// =============================================================================
// Minimum grounding
// =============================================================================
#[test]
fn single_grounding_above_floor_is_grounded() {
    let net = build(
        vec![leveled("F", "base"), leveled("G", "top")],
        vec![edge("fg", "F", "G", GroundingType::Partial, 0.9)],
        two_levels(),
        CoherenceConfig::default(),
    );
    let report = net.evaluate(&ctx());
    assert!(report.status.violations.is_empty());
    assert_eq!(report.status.score, 1.0);

    let g = report.diagnostic("G").unwrap();
    assert_eq!(g.grounding_status, GroundingStatus::Grounded);
    assert!((g.effective_strength - 0.9).abs() < 1e-9);
    assert_eq!(g.confidence_level, ConfidenceLevel::High);
    assert!(g.active_defeaters.is_empty());
    assert_eq!(g.label, Some(Label::In));
    let support = g.support_confidence.numeric_value().unwrap();
    assert!((support - 0.9).abs() < 1e-9);
    assert!(!g.support_confidence.trail().is_empty());

    let f = report.diagnostic("F").unwrap();
    assert_eq!(f.grounding_status, GroundingStatus::Foundation);
    assert!(f.support_confidence.is_absent());
}

#[test]
fn ungrounded_non_foundation_is_an_error() {
    let net = build(
        vec![leveled("T", "top")],
        vec![],
        two_levels(),
        CoherenceConfig::default(),
    );
    let report = net.evaluate(&ctx());
    let found = report.status.violations_for(&RuleKind::MinimumGrounding);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].severity, Severity::Error);
    assert_eq!(
        report.diagnostic("T").unwrap().grounding_status,
        GroundingStatus::Ungrounded
    );
    // 1 - 0.2 (error) - 0.3 * 1/1 (ungrounded)
    assert!((report.status.score - 0.5).abs() < 1e-9);
    assert_eq!(report.remediation[0].kind, RemediationKind::AddGrounding);
    assert_eq!(report.remediation[0].objects, vec!["T"]);
}

#[test]
fn grounding_below_floor_is_partial() {
    let config = CoherenceConfig {
        min_grounding_strength: 0.5,
        ..CoherenceConfig::default()
    };
    let net = build(
        vec![leveled("A", "base"), leveled("B", "top")],
        vec![edge("ab", "A", "B", GroundingType::Partial, 0.3)],
        two_levels(),
        config,
    );
    let report = net.evaluate(&ctx());
    let found = report.status.violations_for(&RuleKind::MinimumGrounding);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].severity, Severity::Warning);
    assert_eq!(found[0].edges, vec!["ab"]);
    assert!(report.is_coherent());
    // 1 - 0.1 (warning) - 0.15 * 1/2 (partial)
    assert!((report.status.score - 0.825).abs() < 1e-9);
    assert_eq!(
        report.remediation[0].kind,
        RemediationKind::StrengthenGrounding
    );
}

#[test]
fn unleveled_object_is_an_exempt_foundation() {
    let report = build(
        vec![object("lonely", Attitude::Accepting)],
        vec![],
        vec![],
        CoherenceConfig::default(),
    )
    .evaluate(&ctx());
    assert!(report.status.violations.is_empty());
    assert_eq!(
        report.diagnostic("lonely").unwrap().grounding_status,
        GroundingStatus::Foundation
    );
}

// =============================================================================
// Level grounding
// =============================================================================
#[test]
fn grounding_from_higher_level_is_an_error_bottom_up() {
    let mut net = build(
        vec![leveled("A", "top"), leveled("B", "base")],
        vec![edge("ab", "A", "B", GroundingType::Full, 1.0)],
        two_levels(),
        CoherenceConfig::default(),
    );
    let report = net.evaluate(&ctx());
    let found = report.status.violations_for(&RuleKind::LevelGrounding);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].severity, Severity::Error);
    assert!(report
        .remediation
        .iter()
        .any(|r| r.kind == RemediationKind::ReassignLevel));

    net.set_config(CoherenceConfig {
        grounding_direction: GroundingDirection::TopDown,
        ..CoherenceConfig::default()
    })
    .unwrap();
    let report = net.evaluate(&ctx());
    assert!(report
        .status
        .violations_for(&RuleKind::LevelGrounding)
        .is_empty());
}

#[test]
fn unleveled_source_only_warns() {
    let net = build(
        vec![object("A", Attitude::Accepting), leveled("B", "top")],
        vec![edge("ab", "A", "B", GroundingType::Partial, 0.6)],
        two_levels(),
        CoherenceConfig::default(),
    );
    let report = net.evaluate(&ctx());
    let found = report.status.violations_for(&RuleKind::LevelGrounding);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].severity, Severity::Warning);
    assert!(report.is_coherent());
}

#[test]
fn bidirectional_skips_level_checks() {
    let net = build(
        vec![leveled("A", "top"), leveled("B", "base")],
        vec![edge("ab", "A", "B", GroundingType::Full, 1.0)],
        two_levels(),
        CoherenceConfig {
            grounding_direction: GroundingDirection::Bidirectional,
            ..CoherenceConfig::default()
        },
    );
    let report = net.evaluate(&ctx());
    assert!(report
        .status
        .violations_for(&RuleKind::LevelGrounding)
        .is_empty());
}

// =============================================================================
// Coverage and entrenchment
// =============================================================================
#[test]
fn disconnected_fragment_warns() {
    let net = build(
        ["A", "B", "C", "D", "E"]
            .into_iter()
            .map(|id| object(id, Attitude::Accepting))
            .collect(),
        vec![
            edge("ab", "A", "B", GroundingType::Full, 1.0),
            edge("bc", "B", "C", GroundingType::Full, 1.0),
            edge("de", "D", "E", GroundingType::Full, 1.0),
        ],
        vec![],
        CoherenceConfig::default(),
    );
    let report = net.evaluate(&ctx());
    let found = report.status.violations_for(&RuleKind::Coverage);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].severity, Severity::Warning);
    assert_eq!(found[0].objects, vec!["D", "E"]);
    assert!(report
        .remediation
        .iter()
        .any(|r| r.kind == RemediationKind::ConnectFragment && r.objects == ["D", "E"]));
}

#[test]
fn equal_fragments_keep_the_one_with_smallest_id() {
    let net = build(
        ["A", "B", "C", "D"]
            .into_iter()
            .map(|id| object(id, Attitude::Accepting))
            .collect(),
        vec![
            edge("cd", "C", "D", GroundingType::Enabling, 0.5),
            edge("ab", "A", "B", GroundingType::Enabling, 0.5),
        ],
        vec![],
        CoherenceConfig::default(),
    );
    let found = net.evaluate(&ctx()).status.violations;
    let coverage: Vec<_> = found
        .iter()
        .filter(|v| v.rule == RuleKind::Coverage)
        .collect();
    assert_eq!(coverage.len(), 1);
    assert_eq!(coverage[0].objects, vec!["C", "D"]);
}

#[test]
fn rising_entrenchment_warns() {
    let net = build(
        vec![],
        vec![],
        vec![
            AbstractionLevel::new("base", 0, 0.5).unwrap(),
            AbstractionLevel::new("top", 1, 0.8).unwrap(),
        ],
        CoherenceConfig::default(),
    );
    let report = net.evaluate(&ctx());
    let found = report.status.violations_for(&RuleKind::EntrenchmentOrdering);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].levels, vec!["base", "top"]);
    assert!(report.is_coherent());
    assert!((report.status.score - 0.9).abs() < 1e-9);
    assert_eq!(report.remediation[0].kind, RemediationKind::ReorderLevels);
}

// =============================================================================
// Circular defeat
// =============================================================================
#[test]
fn circular_defeat_is_undecided_with_evidence_remediation() {
    let net = build(
        vec![
            object("P", Attitude::Entertaining),
            object("Q", Attitude::Entertaining),
        ],
        vec![
            edge("pq", "P", "Q", GroundingType::Rebutting, 0.4),
            edge("qp", "Q", "P", GroundingType::Rebutting, 0.4),
        ],
        vec![],
        CoherenceConfig::default(),
    );
    let report = net.evaluate(&ctx());
    assert!(report.is_coherent());
    assert_eq!(report.status.undecided, vec!["P", "Q"]);
    assert_eq!(report.diagnostic("P").unwrap().label, Some(Label::Undecided));

    let gather: Vec<_> = report
        .remediation
        .iter()
        .filter(|r| r.kind == RemediationKind::GatherEvidence)
        .map(|r| r.objects[0].as_str())
        .collect();
    assert_eq!(gather, vec!["P", "Q"]);
}

#[test]
fn deep_undercutting_chain_is_fully_decided() {
    let depth = 1200;
    let id = |i: usize| format!("o{i:04}");
    let objects = (0..depth)
        .map(|i| object(&id(i), Attitude::Entertaining))
        .collect();
    let edges = (0..depth - 1)
        .map(|i| {
            edge(
                &format!("u{i:04}"),
                &id(i + 1),
                &id(i),
                GroundingType::Undercutting,
                0.5,
            )
        })
        .collect();
    let report = build(objects, edges, vec![], CoherenceConfig::default()).evaluate(&ctx());

    assert!(report.status.labelling_converged);
    assert!(report.status.undecided.is_empty());
    assert!(!report
        .remediation
        .iter()
        .any(|r| r.kind == RemediationKind::GatherEvidence));
    // The unattacked end is in; labels alternate back to the start.
    assert_eq!(report.diagnostic("o1199").unwrap().label, Some(Label::In));
    assert_eq!(report.diagnostic("o1198").unwrap().label, Some(Label::Out));
    assert_eq!(report.diagnostic("o0000").unwrap().label, Some(Label::Out));
}

#[test]
fn defeat_labelling_opens_one_span_per_evaluation() {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing::span::{Attributes, Id};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    struct SpanCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for SpanCounter {
        fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
            if attrs.metadata().name() == "warrant.defeat.label" {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    let net = contradiction_network();
    let seen = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(SpanCounter(Arc::clone(&seen)));
    tracing::subscriber::with_default(subscriber, || {
        net.evaluate(&ctx());
    });
    assert_eq!(seen.load(Ordering::SeqCst), 1);
}

// =============================================================================
// Construction errors
// =============================================================================
#[test]
fn grounding_constructor_rejects_bad_edges() {
    assert!(matches!(
        construct_grounding("a", "a", GroundingType::Partial, GroundingStrength::new(0.5, "x")),
        Err(GroundingError::Reflexive { .. })
    ));
    assert!(matches!(
        construct_grounding("a", "b", GroundingType::Full, GroundingStrength::new(0.9, "x")),
        Err(GroundingError::StrengthTypeMismatch { .. })
    ));
    let e = construct_grounding("a", "b", GroundingType::Full, GroundingStrength::full("x")).unwrap();
    assert!(e.active);
    assert_eq!(e.id.len(), 36);
}

#[test]
fn construct_rejects_structural_errors() {
    let cfg = CoherenceConfig::default;

    let dup = CoherenceNetwork::construct(
        "n",
        vec![object("a", Attitude::Accepting), object("a", Attitude::Rejecting)],
        vec![],
        vec![],
        cfg(),
    );
    assert!(matches!(dup, Err(CoherenceError::DuplicateObject { .. })));

    let dangling = CoherenceNetwork::construct(
        "n",
        vec![object("a", Attitude::Accepting)],
        vec![edge("e", "a", "ghost", GroundingType::Enabling, 0.5)],
        vec![],
        cfg(),
    );
    assert!(matches!(
        dangling,
        Err(CoherenceError::DanglingReference { ref object_id, .. }) if object_id == "ghost"
    ));

    let unknown_level = CoherenceNetwork::construct(
        "n",
        vec![leveled("a", "nowhere")],
        vec![],
        vec![],
        cfg(),
    );
    assert!(matches!(unknown_level, Err(CoherenceError::UnknownLevel { .. })));

    let capacity = CoherenceNetwork::construct(
        "n",
        vec![object("a", Attitude::Accepting), object("b", Attitude::Accepting)],
        vec![],
        vec![],
        CoherenceConfig {
            max_objects: 1,
            ..cfg()
        },
    );
    assert!(matches!(
        capacity,
        Err(CoherenceError::CapacityExceeded { count: 2, cap: 1 })
    ));

    let bad_edge = GroundingEdge {
        id: "e".into(),
        from: "a".into(),
        to: "b".into(),
        grounding_type: GroundingType::Full,
        strength: GroundingStrength::new(0.5, "hand-built"),
        active: true,
    };
    let invalid = CoherenceNetwork::construct(
        "n",
        vec![object("a", Attitude::Accepting), object("b", Attitude::Accepting)],
        vec![bad_edge],
        vec![],
        cfg(),
    );
    assert!(matches!(invalid, Err(CoherenceError::InvalidEdge { .. })));

    let levels = CoherenceNetwork::construct(
        "n",
        vec![],
        vec![],
        vec![
            AbstractionLevel::new("base", 0, 0.9).unwrap(),
            AbstractionLevel::new("base", 1, 0.5).unwrap(),
        ],
        cfg(),
    );
    assert!(matches!(levels, Err(CoherenceError::DuplicateLevel { .. })));
}

#[test]
fn failed_mutation_leaves_network_unchanged() {
    let mut net = build(
        vec![object("a", Attitude::Accepting), object("b", Attitude::Accepting)],
        vec![edge("ab", "a", "b", GroundingType::Partial, 0.5)],
        vec![],
        CoherenceConfig::default(),
    );
    let version = net.version();
    let fingerprint = net.fingerprint();

    let err = net
        .add_edge(edge("ba", "b", "a", GroundingType::Enabling, 0.5))
        .unwrap_err();
    assert!(matches!(
        err,
        CoherenceError::AsymmetryViolation { ref existing_edge_id, .. } if existing_edge_id == "ab"
    ));
    assert!(matches!(
        net.add_edge(edge("ab", "b", "a", GroundingType::Rebutting, 0.5)),
        Err(CoherenceError::DuplicateEdge { .. })
    ));
    assert!(matches!(
        net.set_edge_active("missing", false),
        Err(CoherenceError::UnknownEdge { .. })
    ));
    assert!(matches!(
        net.revise_object("missing", ObjectRevision::new("x")),
        Err(CoherenceError::UnknownObject { .. })
    ));

    assert_eq!(net.version(), version);
    assert_eq!(net.fingerprint(), fingerprint);
    assert_eq!(net.edge_count(), 1);
}

#[test]
fn defeating_edges_may_point_both_ways() {
    let mut net = build(
        vec![object("a", Attitude::Accepting), object("b", Attitude::Accepting)],
        vec![edge("ab", "a", "b", GroundingType::Partial, 0.5)],
        vec![],
        CoherenceConfig::default(),
    );
    net.add_edge(edge("ba", "b", "a", GroundingType::Undercutting, 0.2))
        .unwrap();
    assert_eq!(net.incoming_edges("a").count(), 1);
    assert_eq!(net.outgoing_edges("a").count(), 1);
}

// =============================================================================
// Mutation, caching, determinism
// =============================================================================
#[test]
fn revision_is_copy_on_write() {
    let mut net = contradiction_network();
    let before = net.object_arc("B").unwrap();
    let snapshot = net.clone();

    let after = net
        .revise_object("B", ObjectRevision::new("re-checked").attitude(Attitude::Questioning))
        .unwrap();

    assert_eq!(before.attitude, Attitude::Accepting);
    assert!(before.history.is_empty());
    assert_eq!(after.attitude, Attitude::Questioning);
    assert_eq!(after.history.len(), 1);
    assert_eq!(after.history[0].reason, "re-checked");
    assert_eq!(snapshot.object("B").unwrap().attitude, Attitude::Accepting);
    assert_eq!(net.version(), snapshot.version() + 1);
}

#[test]
fn invalid_revision_is_rejected() {
    let mut net = contradiction_network();
    net.retract_object("C", "gone").unwrap();
    let err = net
        .revise_object("C", ObjectRevision::new("back").status(ObjectStatus::Active))
        .unwrap_err();
    assert!(matches!(err, CoherenceError::InvalidRevision { .. }));
}

#[test]
fn cache_is_invalidated_by_mutation() {
    let mut net = contradiction_network();
    assert!(net.cached_report().is_none());

    let first = net.evaluate_cached(&ctx());
    assert_eq!(net.cached_report(), Some(&first));
    let second = net.evaluate_cached(&ctx());
    assert_eq!(first, second);

    net.add_object(object("D", Attitude::Accepting)).unwrap();
    assert!(net.cached_report().is_none());

    let third = net.evaluate_cached(&ctx());
    assert_ne!(third.status.fingerprint, first.status.fingerprint);
    assert!(third.diagnostic("D").is_some());
}

#[test]
fn cache_respects_context() {
    let mut net = contradiction_network();
    let full = net.evaluate_cached(&ctx());
    let lean = net.evaluate_cached(&ctx().without_diagnostics());
    assert!(!full.diagnostics.is_empty());
    assert!(lean.diagnostics.is_empty());
    assert_eq!(full.remediation, lean.remediation);
    assert_eq!(full.status, lean.status);
}

#[test]
fn evaluation_is_idempotent() {
    let net = contradiction_network();
    assert_eq!(net.evaluate(&ctx()), net.evaluate(&ctx()));
}

#[test]
fn insertion_order_does_not_matter() {
    let objects = vec![
        leveled("A", "base"),
        leveled("B", "top"),
        object("C", Attitude::Accepting),
        object("X", Attitude::Accepting),
        object("Y", Attitude::Accepting),
    ];
    let edges = vec![
        edge("eAB", "A", "B", GroundingType::Partial, 0.8),
        edge("eCB", "C", "B", GroundingType::Undermining, 0.5),
        edge("xy", "X", "Y", GroundingType::Full, 1.0),
        edge("yx", "Y", "X", GroundingType::Rebutting, 0.3),
    ];
    let mut levels = two_levels();

    let forward = build(
        objects.clone(),
        edges.clone(),
        levels.clone(),
        CoherenceConfig::default(),
    );
    let mut objects = objects;
    let mut edges = edges;
    objects.reverse();
    edges.reverse();
    levels.reverse();
    let backward = build(objects, edges, levels, CoherenceConfig::default());

    assert_eq!(forward.fingerprint(), backward.fingerprint());
    assert_eq!(forward.evaluate(&ctx()), backward.evaluate(&ctx()));
}

// =============================================================================
// Serialization
// =============================================================================
#[test]
fn json_roundtrip_preserves_evaluation() {
    let net = contradiction_network();
    let json = net.to_json().unwrap();
    let restored = CoherenceNetwork::from_json(&json).unwrap();
    assert_eq!(restored.fingerprint(), net.fingerprint());
    assert_eq!(restored.evaluate(&ctx()), net.evaluate(&ctx()));
}

const BROKEN_NETWORK: &str = r#"{
    "id": "broken",
    "objects": [
        { "id": "A", "content": "a", "attitude": "accepting", "level": "nowhere" }
    ],
    "edges": [
        {
            "id": "e1", "from": "A", "to": "ghost", "grounding_type": "partial",
            "strength": { "value": 0.5, "basis": "import" }, "active": true
        }
    ]
}"#;

#[test]
fn strict_load_rejects_broken_network() {
    let err = CoherenceNetwork::from_json(BROKEN_NETWORK).unwrap_err();
    assert!(matches!(
        err,
        WarrantError::Coherence(CoherenceError::UnknownLevel { .. })
    ));
}

#[test]
fn lenient_load_reports_integrity_violations() {
    let net = CoherenceNetwork::from_json_lenient(BROKEN_NETWORK).unwrap();
    assert_eq!(net.missing_references().into_iter().collect::<Vec<_>>(), vec!["ghost"]);

    let report = net.evaluate(&ctx());
    let integrity = report.status.violations_for(&RuleKind::Integrity);
    assert_eq!(integrity.len(), 2);
    assert!(integrity.iter().all(|v| v.is_error()));
    assert!(!report.is_coherent());
    assert_eq!(
        report
            .remediation
            .iter()
            .filter(|r| r.kind == RemediationKind::RepairReference)
            .count(),
        2
    );
    assert_eq!(report.status.rules_evaluated[0], RuleKind::Integrity);
}

// =============================================================================
// Custom rules
// =============================================================================
struct NoQuestioning;

impl ICoherenceRule for NoQuestioning {
    fn kind(&self) -> RuleKind {
        RuleKind::Custom("no_questioning".into())
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<Violation> {
        ctx.index
            .active_objects()
            .filter(|o| o.attitude == Attitude::Questioning)
            .map(|o| {
                Violation::new(self.kind(), Severity::Info, format!("{} is questioned", o.id))
                    .with_objects([o.id.as_str()])
            })
            .collect()
    }
}

#[test]
fn custom_rule_runs_after_builtins() {
    let net = build(
        vec![object("q", Attitude::Questioning)],
        vec![],
        vec![],
        CoherenceConfig::default(),
    );
    let evaluator = CoherenceEvaluator::new().with_rule(Box::new(NoQuestioning));
    let report = evaluator.evaluate(&net, &ctx());

    let custom = RuleKind::Custom("no_questioning".into());
    assert_eq!(report.status.violations_for(&custom).len(), 1);
    assert_eq!(report.status.rules_evaluated.last(), Some(&custom));
    assert!(report.is_coherent());
    assert!((report.status.score - 0.98).abs() < 1e-9);
    assert!(report.remediation.is_empty());
}

#[test]
fn disabled_rules_do_not_run() {
    let config = CoherenceConfig {
        rules: vec![RuleKind::Coverage],
        ..CoherenceConfig::default()
    };
    let net = cycle_network(config);
    let report = net.evaluate(&ctx());
    assert_eq!(
        report.status.rules_evaluated,
        vec![RuleKind::Integrity, RuleKind::Coverage]
    );
    assert!(report.status.violations.is_empty());
}

// =============================================================================
// Golden scenarios
// =============================================================================
fn parse_grounding(s: &str) -> GroundingType {
    serde_json::from_value(Value::String(s.to_string()))
        .unwrap_or_else(|_| panic!("unknown grounding type {s}"))
}

fn network_from_fixture(fixture: &Value) -> CoherenceNetwork {
    let levels = fixture
        .get("levels")
        .map(|l| serde_json::from_value::<Vec<AbstractionLevel>>(l.clone()).unwrap())
        .unwrap_or_default();
    let objects = fixture["objects"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| {
            let attitude: Attitude = serde_json::from_value(o["attitude"].clone()).unwrap();
            let obj = EpistemicObject::with_id(
                o["id"].as_str().unwrap(),
                o["content"].clone(),
                attitude,
            );
            match o["level"].as_str() {
                Some(level) => obj.with_level(level),
                None => obj,
            }
        })
        .collect();
    let edges = fixture["edges"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| {
            edge(
                e["id"].as_str().unwrap(),
                e["from"].as_str().unwrap(),
                e["to"].as_str().unwrap(),
                parse_grounding(e["type"].as_str().unwrap()),
                e["strength"].as_f64().unwrap(),
            )
        })
        .collect();
    let config = fixture
        .get("config")
        .map(|c| serde_json::from_value::<CoherenceConfig>(c.clone()).unwrap())
        .unwrap_or_default();
    build(objects, edges, levels, config)
}

#[test]
fn golden_coherence_scenarios() {
    let scenarios = golden_scenarios("coherence");
    assert!(scenarios.len() >= 4);

    for path in scenarios {
        let fixture = load_fixture_value(&path);
        let expected = &fixture["expected"];
        let report = network_from_fixture(&fixture).evaluate(&ctx());

        assert_eq!(
            report.is_coherent(),
            expected["coherent"].as_bool().unwrap(),
            "{path}: coherent"
        );

        let counts = expected["violation_counts"].as_object().unwrap();
        let total: u64 = counts.values().map(|v| v.as_u64().unwrap()).sum();
        assert_eq!(report.status.violations.len() as u64, total, "{path}: violations");
        for (rule, count) in counts {
            let found = report
                .status
                .violations
                .iter()
                .filter(|v| v.rule.as_str() == rule)
                .count() as u64;
            assert_eq!(found, count.as_u64().unwrap(), "{path}: {rule}");
        }

        for (id, status) in expected["grounding"].as_object().unwrap() {
            let diag = report.diagnostic(id).unwrap();
            assert_eq!(
                diag.grounding_status.as_str(),
                status.as_str().unwrap(),
                "{path}: grounding of {id}"
            );
        }

        if let Some(strengths) = expected.get("effective_strength").and_then(Value::as_object) {
            for (id, value) in strengths {
                let diag = report.diagnostic(id).unwrap();
                assert!(
                    (diag.effective_strength - value.as_f64().unwrap()).abs() < 1e-9,
                    "{path}: effective strength of {id}"
                );
            }
        }

        if let Some(path_ids) = expected.get("cycle_path").and_then(Value::as_array) {
            let want: Vec<&str> = path_ids.iter().map(|v| v.as_str().unwrap()).collect();
            let cycles = report.status.violations_for(&RuleKind::Acyclicity);
            assert_eq!(cycles[0].path, want, "{path}: cycle path");
        }

        if let Some(score) = expected.get("score").and_then(Value::as_f64) {
            assert!((report.status.score - score).abs() < 1e-9, "{path}: score");
        }

        let undecided: Vec<&str> = expected["undecided"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(report.status.undecided, undecided, "{path}: undecided");
    }
}
