//! One-pass index over a network, shared by every rule in an evaluation.

use std::collections::BTreeMap;

use crate::model::{EpistemicObject, GroundingEdge};

use super::CoherenceNetwork;

/// Read-only lookups built once per evaluation so no rule re-scans the
/// edge set per object.
///
/// An edge is *live* when it is active and both endpoints exist and are
/// active. Only live edges take part in rule evaluation.
#[derive(Debug)]
pub struct NetworkIndex<'a> {
    network: &'a CoherenceNetwork,
    live: Vec<&'a GroundingEdge>,
    positive_in: BTreeMap<&'a str, Vec<&'a GroundingEdge>>,
    defeating_in: BTreeMap<&'a str, Vec<&'a GroundingEdge>>,
    level_positions: BTreeMap<&'a str, u32>,
    dangling: Vec<(&'a GroundingEdge, &'a str)>,
    unknown_levels: Vec<(&'a EpistemicObject, &'a str)>,
}

impl<'a> NetworkIndex<'a> {
    pub fn build(network: &'a CoherenceNetwork) -> Self {
        let level_positions: BTreeMap<&str, u32> = network
            .levels()
            .iter()
            .map(|l| (l.name.as_str(), l.position))
            .collect();

        let mut unknown_levels = Vec::new();
        for object in network.objects() {
            if let Some(level) = object.level.as_deref() {
                if !level_positions.contains_key(level) {
                    unknown_levels.push((object, level));
                }
            }
        }

        let mut live = Vec::new();
        let mut positive_in: BTreeMap<&str, Vec<&GroundingEdge>> = BTreeMap::new();
        let mut defeating_in: BTreeMap<&str, Vec<&GroundingEdge>> = BTreeMap::new();
        let mut dangling = Vec::new();
        for edge in network.edges() {
            let from = network.object(&edge.from);
            let to = network.object(&edge.to);
            if from.is_none() {
                dangling.push((edge, edge.from.as_str()));
            }
            if to.is_none() {
                dangling.push((edge, edge.to.as_str()));
            }
            let (Some(from), Some(to)) = (from, to) else {
                continue;
            };
            if !edge.active || !from.is_active() || !to.is_active() {
                continue;
            }
            live.push(edge);
            let bucket = if edge.is_positive() {
                &mut positive_in
            } else {
                &mut defeating_in
            };
            bucket.entry(edge.to.as_str()).or_default().push(edge);
        }

        Self {
            network,
            live,
            positive_in,
            defeating_in,
            level_positions,
            dangling,
            unknown_levels,
        }
    }

    pub fn network(&self) -> &'a CoherenceNetwork {
        self.network
    }

    /// Live edges ordered by id.
    pub fn live_edges(&self) -> &[&'a GroundingEdge] {
        &self.live
    }

    pub fn active_objects(&self) -> impl Iterator<Item = &'a EpistemicObject> + 'a {
        self.network.objects().filter(|o| o.is_active())
    }

    pub fn positive_in(&self, object_id: &str) -> &[&'a GroundingEdge] {
        self.positive_in
            .get(object_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn defeating_in(&self, object_id: &str) -> &[&'a GroundingEdge] {
        self.defeating_in
            .get(object_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Summed strength of live positive edges into `object_id`.
    pub fn grounding_sum(&self, object_id: &str) -> f64 {
        self.positive_in(object_id)
            .iter()
            .map(|e| e.strength.value)
            .sum()
    }

    /// Position of the object's level. `None` for unleveled objects and for
    /// objects naming a level the network does not have.
    pub fn level_position(&self, object: &EpistemicObject) -> Option<u32> {
        object
            .level
            .as_deref()
            .and_then(|name| self.level_positions.get(name).copied())
    }

    /// Level 0 or no level: exempt from needing positive grounding.
    pub fn is_foundation(&self, object: &EpistemicObject) -> bool {
        self.level_position(object).map_or(true, |p| p == 0)
    }

    /// Edges with an endpoint missing from the network, with the missing id.
    pub fn dangling(&self) -> &[(&'a GroundingEdge, &'a str)] {
        &self.dangling
    }

    /// Objects naming a level the network does not have.
    pub fn unknown_levels(&self) -> &[(&'a EpistemicObject, &'a str)] {
        &self.unknown_levels
    }
}
