//! Remediation: a ranked list of concrete changes, derived from violations.

use serde::{Deserialize, Serialize};

use warrant_core::config::RuleKind;

use super::violation::{Severity, Violation};
use crate::network::CoherenceNetwork;

/// Kinds of suggested change. Declaration order is the tie-break rank
/// within a severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemediationKind {
    ResolveContradiction,
    BreakCycle,
    RepairReference,
    AddGrounding,
    ReassignLevel,
    StrengthenGrounding,
    GatherEvidence,
    ConnectFragment,
    ReorderLevels,
}

impl RemediationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ResolveContradiction => "resolve_contradiction",
            Self::BreakCycle => "break_cycle",
            Self::RepairReference => "repair_reference",
            Self::AddGrounding => "add_grounding",
            Self::ReassignLevel => "reassign_level",
            Self::StrengthenGrounding => "strengthen_grounding",
            Self::GatherEvidence => "gather_evidence",
            Self::ConnectFragment => "connect_fragment",
            Self::ReorderLevels => "reorder_levels",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Remediation {
    pub kind: RemediationKind,
    pub severity: Severity,
    pub objects: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub edges: Vec<String>,
    pub description: String,
}

/// One suggestion per actionable violation, plus evidence gathering for every
/// undecided object. Ranked by severity, then kind, then first object id.
pub fn plan(
    network: &CoherenceNetwork,
    violations: &[Violation],
    undecided: &[String],
) -> Vec<Remediation> {
    let mut plan: Vec<Remediation> = violations
        .iter()
        .filter_map(|v| for_violation(network, v))
        .collect();

    plan.extend(undecided.iter().map(|id| Remediation {
        kind: RemediationKind::GatherEvidence,
        severity: Severity::Warning,
        objects: vec![id.clone()],
        edges: Vec::new(),
        description: format!(
            "defeat over {id} is circular and undecided; gather evidence that settles one side"
        ),
    }));

    plan.sort_by(|a, b| {
        (a.severity, a.kind, a.objects.first()).cmp(&(b.severity, b.kind, b.objects.first()))
    });
    plan
}

fn for_violation(network: &CoherenceNetwork, v: &Violation) -> Option<Remediation> {
    let first = v.objects.first().map(String::as_str).unwrap_or("?");
    let (kind, edges, description) = match &v.rule {
        RuleKind::NoContradictions => (
            RemediationKind::ResolveContradiction,
            v.edges.clone(),
            format!(
                "revise the attitude of {} or deactivate the contradicting edge",
                v.objects.join(" or ")
            ),
        ),
        RuleKind::Acyclicity => {
            let weakest = weakest_edge(network, &v.edges)?;
            (
                RemediationKind::BreakCycle,
                vec![weakest.clone()],
                format!(
                    "deactivate {weakest}, the weakest edge on cycle {}",
                    v.path.join(" -> ")
                ),
            )
        }
        RuleKind::MinimumGrounding if v.is_error() => (
            RemediationKind::AddGrounding,
            Vec::new(),
            format!("add positive grounding for {first} or move it to a foundational level"),
        ),
        RuleKind::MinimumGrounding => (
            RemediationKind::StrengthenGrounding,
            v.edges.clone(),
            format!("strengthen the existing grounding of {first} or add another ground"),
        ),
        RuleKind::LevelGrounding => (
            RemediationKind::ReassignLevel,
            v.edges.clone(),
            format!("assign {} levels consistent with the grounding direction", v.objects.join(" and ")),
        ),
        RuleKind::Coverage => (
            RemediationKind::ConnectFragment,
            Vec::new(),
            format!("connect the fragment containing {first} to the main network"),
        ),
        RuleKind::EntrenchmentOrdering => (
            RemediationKind::ReorderLevels,
            Vec::new(),
            format!("make entrenchment non-increasing across levels {}", v.levels.join(", ")),
        ),
        RuleKind::Integrity => (
            RemediationKind::RepairReference,
            v.edges.clone(),
            v.message.clone(),
        ),
        RuleKind::Custom(_) => return None,
    };
    Some(Remediation {
        kind,
        severity: v.severity,
        objects: v.objects.clone(),
        edges,
        description,
    })
}

/// Lowest strength, ties to the smallest id.
fn weakest_edge<'a>(network: &CoherenceNetwork, edge_ids: &'a [String]) -> Option<&'a String> {
    edge_ids
        .iter()
        .filter_map(|id| network.edge(id).map(|e| (e.strength.value, id)))
        .min_by(|(a, a_id), (b, b_id)| a.total_cmp(b).then_with(|| a_id.cmp(b_id)))
        .map(|(_, id)| id)
}
