use serde::{Deserialize, Serialize};

use warrant_core::confidence::{derive_parallel_any, ConfidenceLevel, DerivationInput};
use warrant_core::{AbsentReason, ConfidenceValue};
use warrant_defeat::Label;

use super::defeat_view::DefeatView;
use crate::model::{EpistemicObject, ObjectStatus};
use crate::network::NetworkIndex;
use crate::rules::{grounding_status, GroundingStatus};

const FORMULA_GROUNDING_EDGE: &str = "grounding_edge";

/// Per-object view of an evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDiagnostic {
    pub object_id: String,
    pub status: ObjectStatus,
    pub grounding_status: GroundingStatus,
    /// Summed strength of live positive edges into the object.
    pub grounding_sum: f64,
    /// Grounding after active defeaters are subtracted, clamped to `[0, 1]`.
    pub effective_strength: f64,
    pub confidence_level: ConfidenceLevel,
    /// Live defeating edges targeting the object.
    pub active_defeaters: Vec<String>,
    /// Endpoint of an undermining or rebutting edge with both sides accepted.
    pub contradiction: bool,
    /// Defeat label, for active objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    /// Noisy-OR of the positive groundings, with each edge as a derivation
    /// input. Absent when nothing grounds the object.
    pub support_confidence: ConfidenceValue,
}

/// One diagnostic per object, in id order.
pub fn compute_diagnostics(
    index: &NetworkIndex<'_>,
    defeat: &DefeatView,
    floor: f64,
) -> Vec<ObjectDiagnostic> {
    let contradicted = contradicted_objects(index);
    index
        .network()
        .objects()
        .map(|object| {
            let (grounding, sum) = grounding_status(index, object, floor);
            let effective_strength = if object.is_active() {
                defeat.effective_strength(&object.id)
            } else {
                0.0
            };
            ObjectDiagnostic {
                object_id: object.id.clone(),
                status: object.status,
                grounding_status: grounding,
                grounding_sum: sum,
                effective_strength,
                confidence_level: ConfidenceLevel::from_value(effective_strength),
                active_defeaters: index
                    .defeating_in(&object.id)
                    .iter()
                    .map(|e| e.id.clone())
                    .collect(),
                contradiction: contradicted.binary_search(&object.id.as_str()).is_ok(),
                label: defeat.object_label(&object.id),
                support_confidence: support_confidence(index, object),
            }
        })
        .collect()
}

/// Sorted ids of objects at either end of a contradicting edge.
fn contradicted_objects<'a>(index: &NetworkIndex<'a>) -> Vec<&'a str> {
    let network = index.network();
    let accepting = |id: &str| network.object(id).is_some_and(EpistemicObject::is_accepting);
    let mut ids: Vec<&str> = index
        .live_edges()
        .iter()
        .copied()
        .filter(|e| {
            e.grounding_type.contradicts()
                && accepting(e.from.as_str())
                && accepting(e.to.as_str())
        })
        .flat_map(|e| [e.from.as_str(), e.to.as_str()])
        .collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

fn support_confidence(index: &NetworkIndex<'_>, object: &EpistemicObject) -> ConfidenceValue {
    let network = index.network();
    let branches: Vec<ConfidenceValue> = index
        .positive_in(&object.id)
        .iter()
        .filter_map(|edge| {
            let source = network
                .object(&edge.from)
                .and_then(|o| o.confidence.clone())
                .unwrap_or_else(|| ConfidenceValue::absent(AbsentReason::InsufficientData));
            ConfidenceValue::derived(
                edge.strength.value,
                FORMULA_GROUNDING_EDGE,
                vec![DerivationInput::new(edge.from.clone(), source)],
                None,
            )
            .ok()
        })
        .collect();
    if branches.is_empty() {
        return ConfidenceValue::absent(AbsentReason::NotApplicable);
    }
    derive_parallel_any(&branches)
}
