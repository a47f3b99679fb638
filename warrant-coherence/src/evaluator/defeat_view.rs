//! Projects the live part of a network onto a defeat graph.
//!
//! Active objects become claims supported by their live positive edges; live
//! defeating edges become active defeaters sourced at the attacking object.
//! Node ids are prefixed so objects and edges cannot collide.

use warrant_core::{AbsentReason, ConfidenceValue};
use warrant_defeat::{compute_grounded_extension, Claim, DefeatGraph, Defeater, Label, Labelling};

use crate::network::NetworkIndex;

const OBJECT_PREFIX: &str = "object:";
const EDGE_PREFIX: &str = "edge:";

pub(crate) fn object_node(id: &str) -> String {
    format!("{OBJECT_PREFIX}{id}")
}

pub(crate) fn edge_node(id: &str) -> String {
    format!("{EDGE_PREFIX}{id}")
}

pub struct DefeatView {
    graph: DefeatGraph,
    labelling: Labelling,
}

impl DefeatView {
    pub fn build(index: &NetworkIndex<'_>, max_iterations: usize) -> Self {
        let mut graph = DefeatGraph::new();

        for object in index.active_objects() {
            let confidence = object
                .confidence
                .clone()
                .unwrap_or_else(|| ConfidenceValue::absent(AbsentReason::InsufficientData));
            let proposition = match &object.content {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            let claim = index.positive_in(&object.id).iter().fold(
                Claim::new(object_node(&object.id), proposition, confidence),
                |claim, edge| claim.with_support(object_node(&edge.from), edge.strength.value),
            );
            if let Err(e) = graph.add_claim(claim) {
                tracing::warn!(object = %object.id, error = %e, "object skipped in defeat graph");
            }
        }

        for edge in index.live_edges() {
            let Some(attack) = edge.grounding_type.attack_type() else {
                continue;
            };
            let id = edge_node(&edge.id);
            let added = Defeater::with_id(
                id.clone(),
                object_node(&edge.from),
                vec![object_node(&edge.to)],
                attack,
                edge.strength.value,
            )
            .and_then(|d| graph.add_defeater(d))
            .and_then(|()| graph.activate(&id));
            if let Err(e) = added {
                tracing::warn!(edge = %edge.id, error = %e, "edge skipped in defeat graph");
            }
        }

        let labelling = compute_grounded_extension(&graph, max_iterations);
        Self { graph, labelling }
    }

    pub fn graph(&self) -> &DefeatGraph {
        &self.graph
    }

    pub fn labelling(&self) -> &Labelling {
        &self.labelling
    }

    pub fn object_label(&self, object_id: &str) -> Option<Label> {
        self.labelling.label(&object_node(object_id))
    }

    /// Defeat-adjusted strength: summed support minus active defeaters,
    /// clamped. Zero for objects outside the graph.
    pub fn effective_strength(&self, object_id: &str) -> f64 {
        self.graph
            .effective_confidence(&object_node(object_id))
            .unwrap_or(0.0)
    }

    /// Objects the labelling could not decide, ordered by id.
    pub fn undecided_objects(&self) -> Vec<String> {
        self.labelling
            .undecided()
            .into_iter()
            .filter_map(|node| node.strip_prefix(OBJECT_PREFIX))
            .map(str::to_string)
            .collect()
    }
}
