//! The defeat graph: claims and defeaters keyed by id.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use warrant_core::errors::{DefeatError, WarrantResult};

use crate::claim::Claim;
use crate::defeater::Defeater;

/// Claims and defeaters as nodes, attacks as edges.
///
/// Ids are unique across both kinds, since a defeater can itself be the
/// target of another defeater. Storage is ordered by id so every traversal
/// is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "GraphParts")]
pub struct DefeatGraph {
    claims: BTreeMap<String, Claim>,
    defeaters: BTreeMap<String, Defeater>,
    /// Target id to the ids of defeaters attacking it, sorted.
    #[serde(skip)]
    attacked_by: BTreeMap<String, Vec<String>>,
}

/// Serialized shape of a [`DefeatGraph`]; the attacker index is rebuilt on load.
#[derive(Deserialize)]
struct GraphParts {
    #[serde(default)]
    claims: BTreeMap<String, Claim>,
    #[serde(default)]
    defeaters: BTreeMap<String, Defeater>,
}

impl From<GraphParts> for DefeatGraph {
    fn from(parts: GraphParts) -> Self {
        let mut graph = Self {
            claims: parts.claims,
            defeaters: parts.defeaters,
            attacked_by: BTreeMap::new(),
        };
        let attacks: Vec<(String, String)> = graph
            .defeaters
            .values()
            .flat_map(|d| d.targets.iter().map(move |t| (t.clone(), d.id.clone())))
            .collect();
        for (target, defeater) in attacks {
            graph.index_attack(target, defeater);
        }
        graph
    }
}

impl DefeatGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.claims.contains_key(id) || self.defeaters.contains_key(id)
    }

    pub fn add_claim(&mut self, claim: Claim) -> Result<(), DefeatError> {
        if self.contains(&claim.id) {
            return Err(DefeatError::DuplicateId { id: claim.id });
        }
        self.claims.insert(claim.id.clone(), claim);
        Ok(())
    }

    /// Add a defeater. Every target must already be in the graph.
    pub fn add_defeater(&mut self, defeater: Defeater) -> Result<(), DefeatError> {
        defeater.validate()?;
        if self.contains(&defeater.id) {
            return Err(DefeatError::DuplicateId { id: defeater.id });
        }
        if let Some(missing) = defeater.targets.iter().find(|t| !self.contains(t)) {
            return Err(DefeatError::DanglingTarget {
                defeater_id: defeater.id.clone(),
                target_id: missing.clone(),
            });
        }
        tracing::debug!(
            defeater = %defeater.id,
            attack = defeater.attack_type.as_str(),
            targets = defeater.targets.len(),
            "defeater added"
        );
        for target in &defeater.targets {
            self.index_attack(target.clone(), defeater.id.clone());
        }
        self.defeaters.insert(defeater.id.clone(), defeater);
        Ok(())
    }

    /// Extend an existing defeater's targets. This is the only way to close a
    /// cycle between defeaters, since targets must exist when a defeater is added.
    pub fn add_attack(&mut self, defeater_id: &str, target_id: &str) -> Result<(), DefeatError> {
        if !self.contains(target_id) {
            return Err(DefeatError::DanglingTarget {
                defeater_id: defeater_id.to_string(),
                target_id: target_id.to_string(),
            });
        }
        let defeater = self.defeater_mut(defeater_id)?;
        if target_id == defeater.id || target_id == defeater.source {
            return Err(DefeatError::SelfAttack {
                id: defeater.id.clone(),
            });
        }
        if !defeater.attacks(target_id) {
            defeater.targets.push(target_id.to_string());
            self.index_attack(target_id.to_string(), defeater_id.to_string());
        }
        Ok(())
    }

    fn index_attack(&mut self, target: String, defeater: String) {
        let attackers = self.attacked_by.entry(target).or_default();
        if let Err(at) = attackers.binary_search(&defeater) {
            attackers.insert(at, defeater);
        }
    }

    pub fn claim(&self, id: &str) -> Option<&Claim> {
        self.claims.get(id)
    }

    pub fn defeater(&self, id: &str) -> Option<&Defeater> {
        self.defeaters.get(id)
    }

    pub fn claims(&self) -> impl Iterator<Item = &Claim> {
        self.claims.values()
    }

    pub fn defeaters(&self) -> impl Iterator<Item = &Defeater> {
        self.defeaters.values()
    }

    pub fn claim_count(&self) -> usize {
        self.claims.len()
    }

    pub fn defeater_count(&self) -> usize {
        self.defeaters.len()
    }

    /// Every defeater targeting `id`, whatever its status, ordered by id.
    pub fn attackers_of<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a Defeater> + 'a {
        self.attacked_by
            .get(id)
            .into_iter()
            .flatten()
            .filter_map(move |d| self.defeaters.get(d))
    }

    /// Defeaters in `active` status targeting `id`.
    pub fn active_defeaters_of(&self, id: &str) -> Vec<&Defeater> {
        self.attackers_of(id).filter(|d| d.is_active()).collect()
    }

    pub fn activate(&mut self, id: &str) -> Result<(), DefeatError> {
        self.defeater_mut(id)?.activate()
    }

    pub fn mark_defeated(&mut self, id: &str) -> Result<(), DefeatError> {
        self.defeater_mut(id)?.mark_defeated()
    }

    pub fn mark_resolved(&mut self, id: &str) -> Result<(), DefeatError> {
        self.defeater_mut(id)?.mark_resolved()
    }

    fn defeater_mut(&mut self, id: &str) -> Result<&mut Defeater, DefeatError> {
        self.defeaters
            .get_mut(id)
            .ok_or_else(|| DefeatError::UnknownDefeater { id: id.to_string() })
    }

    /// Base confidence minus the strengths of active defeaters, clamped to
    /// `[0, 1]` once, after the subtraction.
    ///
    /// Only `active` defeaters subtract, so adding a defeater in any status,
    /// or activating one, can never raise the result.
    pub fn effective_confidence(&self, claim_id: &str) -> Result<f64, DefeatError> {
        let claim = self
            .claims
            .get(claim_id)
            .ok_or_else(|| DefeatError::UnknownClaim {
                id: claim_id.to_string(),
            })?;
        let defeat: f64 = self
            .attackers_of(claim_id)
            .filter(|d| d.is_active())
            .map(|d| d.strength)
            .sum();
        Ok((claim.base_confidence() - defeat).clamp(0.0, 1.0))
    }

    pub fn to_json(&self) -> WarrantResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize and re-check every construction invariant.
    pub fn from_json(json: &str) -> WarrantResult<Self> {
        let graph: Self = serde_json::from_str(json)?;
        graph.validate()?;
        Ok(graph)
    }

    fn validate(&self) -> Result<(), DefeatError> {
        for (key, claim) in &self.claims {
            if key != &claim.id || self.defeaters.contains_key(key) {
                return Err(DefeatError::DuplicateId { id: key.clone() });
            }
        }
        for (key, defeater) in &self.defeaters {
            defeater.validate()?;
            if key != &defeater.id {
                return Err(DefeatError::DuplicateId { id: key.clone() });
            }
            if let Some(missing) = defeater.targets.iter().find(|t| !self.contains(t)) {
                return Err(DefeatError::DanglingTarget {
                    defeater_id: defeater.id.clone(),
                    target_id: missing.clone(),
                });
            }
        }
        Ok(())
    }
}
