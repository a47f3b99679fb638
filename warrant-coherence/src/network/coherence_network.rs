use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use warrant_core::config::CoherenceConfig;
use warrant_core::errors::{CoherenceError, WarrantResult};

use super::snapshot::NetworkSnapshot;
use crate::evaluator::{evaluate, CoherenceReport, EvaluationContext};
use crate::model::{
    AbstractionLevel, EpistemicObject, GroundingEdge, ObjectRevision, ObjectStatus,
};

#[derive(Debug, Clone)]
struct CachedReport {
    fingerprint: String,
    context: EvaluationContext,
    report: CoherenceReport,
}

/// Objects and grounding edges keyed by id, plus optional abstraction levels.
///
/// Edges reference objects by id only. Objects and edges sit behind `Arc`, and
/// a revision swaps in a new `Arc` rather than writing through the old one, so
/// a clone taken before a revision keeps seeing the earlier version.
#[derive(Debug, Clone)]
pub struct CoherenceNetwork {
    id: String,
    objects: BTreeMap<String, Arc<EpistemicObject>>,
    edges: BTreeMap<String, Arc<GroundingEdge>>,
    /// Sorted by position.
    levels: Vec<AbstractionLevel>,
    config: CoherenceConfig,
    version: u64,
    cache: Option<CachedReport>,
}

impl CoherenceNetwork {
    /// An empty network.
    pub fn new(id: impl Into<String>, config: CoherenceConfig) -> Self {
        Self {
            id: id.into(),
            objects: BTreeMap::new(),
            edges: BTreeMap::new(),
            levels: Vec::new(),
            config,
            version: 0,
            cache: None,
        }
    }

    /// Build a network, rejecting the first construction error found.
    ///
    /// Levels go in first, then objects, then edges, so every reference can be
    /// checked as it arrives.
    pub fn construct(
        id: impl Into<String>,
        objects: Vec<EpistemicObject>,
        edges: Vec<GroundingEdge>,
        levels: Vec<AbstractionLevel>,
        config: CoherenceConfig,
    ) -> Result<Self, CoherenceError> {
        Self::build(id.into(), objects, edges, levels, config, true)
    }

    pub(crate) fn build(
        id: String,
        objects: Vec<EpistemicObject>,
        edges: Vec<GroundingEdge>,
        levels: Vec<AbstractionLevel>,
        config: CoherenceConfig,
        strict: bool,
    ) -> Result<Self, CoherenceError> {
        if objects.len() > config.max_objects {
            return Err(CoherenceError::CapacityExceeded {
                count: objects.len(),
                cap: config.max_objects,
            });
        }
        let mut network = Self::new(id, config);
        for level in levels {
            network.insert_level(level)?;
        }
        for object in objects {
            network.insert_object(object, strict)?;
        }

        // Positive (from, to) pairs seen so far, for the asymmetry check.
        let mut pairs: BTreeMap<(String, String), String> = BTreeMap::new();
        for edge in edges {
            network.check_edge(&edge, strict)?;
            if edge.is_positive() && !network.config.permits_mutual_grounding() {
                if let Some(existing) = pairs.get(&(edge.to.clone(), edge.from.clone())) {
                    return Err(CoherenceError::AsymmetryViolation {
                        edge_id: edge.id.clone(),
                        from: edge.from.clone(),
                        to: edge.to.clone(),
                        existing_edge_id: existing.clone(),
                    });
                }
                pairs.insert((edge.from.clone(), edge.to.clone()), edge.id.clone());
            }
            network.edges.insert(edge.id.clone(), Arc::new(edge));
        }

        tracing::debug!(
            network_id = %network.id,
            objects = network.objects.len(),
            edges = network.edges.len(),
            levels = network.levels.len(),
            strict,
            "coherence network constructed"
        );
        Ok(network)
    }

    fn insert_level(&mut self, level: AbstractionLevel) -> Result<(), CoherenceError> {
        level.validate()?;
        if self.levels.iter().any(|l| l.name == level.name) {
            return Err(CoherenceError::DuplicateLevel { name: level.name });
        }
        if let Some(clash) = self.levels.iter().find(|l| l.position == level.position) {
            return Err(CoherenceError::InvalidLevel {
                name: level.name.clone(),
                reason: format!("position {} already taken by {}", level.position, clash.name),
            });
        }
        let at = self
            .levels
            .partition_point(|l| l.position < level.position);
        self.levels.insert(at, level);
        Ok(())
    }

    fn insert_object(
        &mut self,
        mut object: EpistemicObject,
        strict: bool,
    ) -> Result<(), CoherenceError> {
        if self.objects.contains_key(&object.id) {
            return Err(CoherenceError::DuplicateObject { id: object.id });
        }
        if strict {
            if let Some(level) = object.level.as_deref() {
                if self.level(level).is_none() {
                    return Err(CoherenceError::UnknownLevel {
                        object_id: object.id.clone(),
                        level: level.to_string(),
                    });
                }
            }
        }
        object.normalize()?;
        self.objects.insert(object.id.clone(), Arc::new(object));
        Ok(())
    }

    fn check_edge(&self, edge: &GroundingEdge, strict: bool) -> Result<(), CoherenceError> {
        edge.validate().map_err(|source| CoherenceError::InvalidEdge {
            edge_id: edge.id.clone(),
            source,
        })?;
        if self.edges.contains_key(&edge.id) {
            return Err(CoherenceError::DuplicateEdge {
                id: edge.id.clone(),
            });
        }
        if strict {
            for endpoint in [&edge.from, &edge.to] {
                if !self.objects.contains_key(endpoint) {
                    return Err(CoherenceError::DanglingReference {
                        edge_id: edge.id.clone(),
                        object_id: endpoint.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn reverse_positive_edge(&self, edge: &GroundingEdge) -> Option<&GroundingEdge> {
        self.edges
            .values()
            .map(Arc::as_ref)
            .find(|e| e.is_positive() && e.from == edge.to && e.to == edge.from)
    }

    fn invalidate(&mut self) {
        self.version += 1;
        if self.cache.take().is_some() {
            tracing::debug!(network_id = %self.id, version = self.version, "coherence cache invalidated");
        }
    }

    // ---- mutation ----

    pub fn add_level(&mut self, level: AbstractionLevel) -> Result<(), CoherenceError> {
        self.insert_level(level)?;
        self.invalidate();
        Ok(())
    }

    pub fn add_object(&mut self, object: EpistemicObject) -> Result<(), CoherenceError> {
        if self.objects.len() >= self.config.max_objects {
            return Err(CoherenceError::CapacityExceeded {
                count: self.objects.len() + 1,
                cap: self.config.max_objects,
            });
        }
        let id = object.id.clone();
        self.insert_object(object, true)?;
        self.invalidate();
        tracing::debug!(network_id = %self.id, object = %id, "object added");
        Ok(())
    }

    pub fn add_edge(&mut self, edge: GroundingEdge) -> Result<(), CoherenceError> {
        self.check_edge(&edge, true)?;
        if edge.is_positive() && !self.config.permits_mutual_grounding() {
            if let Some(existing) = self.reverse_positive_edge(&edge) {
                return Err(CoherenceError::AsymmetryViolation {
                    edge_id: edge.id.clone(),
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    existing_edge_id: existing.id.clone(),
                });
            }
        }
        tracing::debug!(
            network_id = %self.id,
            edge = %edge.id,
            grounding = edge.grounding_type.as_str(),
            "edge added"
        );
        self.edges.insert(edge.id.clone(), Arc::new(edge));
        self.invalidate();
        Ok(())
    }

    /// Toggle an edge without removing it.
    pub fn set_edge_active(&mut self, edge_id: &str, active: bool) -> Result<(), CoherenceError> {
        let current = self
            .edges
            .get(edge_id)
            .ok_or_else(|| CoherenceError::UnknownEdge {
                id: edge_id.to_string(),
            })?;
        if current.active == active {
            return Ok(());
        }
        let mut next = GroundingEdge::clone(current);
        next.active = active;
        self.edges.insert(edge_id.to_string(), Arc::new(next));
        self.invalidate();
        Ok(())
    }

    /// Apply a revision, replacing the stored object with its next version.
    pub fn revise_object(
        &mut self,
        object_id: &str,
        revision: ObjectRevision,
    ) -> Result<Arc<EpistemicObject>, CoherenceError> {
        let span = warrant_core::network_revise_span!(self.id, object_id);
        let _guard = span.enter();

        let current = self
            .objects
            .get(object_id)
            .ok_or_else(|| CoherenceError::UnknownObject {
                id: object_id.to_string(),
            })?;
        let next = Arc::new(current.revise(revision)?);
        tracing::debug!(
            from = current.status.as_str(),
            to = next.status.as_str(),
            attitude = next.attitude.as_str(),
            "object revised"
        );
        self.objects.insert(object_id.to_string(), Arc::clone(&next));
        self.invalidate();
        Ok(next)
    }

    /// Retraction is a status change; the object stays in the network.
    pub fn retract_object(
        &mut self,
        object_id: &str,
        reason: impl Into<String>,
    ) -> Result<Arc<EpistemicObject>, CoherenceError> {
        self.revise_object(
            object_id,
            ObjectRevision::new(reason).status(ObjectStatus::Retracted),
        )
    }

    /// Replace the configuration. Rejected if the network would break the new
    /// capacity or asymmetry constraints.
    pub fn set_config(&mut self, config: CoherenceConfig) -> Result<(), CoherenceError> {
        if self.objects.len() > config.max_objects {
            return Err(CoherenceError::CapacityExceeded {
                count: self.objects.len(),
                cap: config.max_objects,
            });
        }
        if !config.permits_mutual_grounding() {
            let positive: BTreeMap<(&str, &str), &str> = self
                .edges
                .values()
                .filter(|e| e.is_positive())
                .map(|e| ((e.from.as_str(), e.to.as_str()), e.id.as_str()))
                .collect();
            for ((from, to), edge_id) in &positive {
                if let Some(existing) = positive.get(&(*to, *from)) {
                    return Err(CoherenceError::AsymmetryViolation {
                        edge_id: edge_id.to_string(),
                        from: from.to_string(),
                        to: to.to_string(),
                        existing_edge_id: existing.to_string(),
                    });
                }
            }
        }
        self.config = config;
        self.invalidate();
        Ok(())
    }

    // ---- reads ----

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &CoherenceConfig {
        &self.config
    }

    /// Bumped by every successful mutation.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn object(&self, id: &str) -> Option<&EpistemicObject> {
        self.objects.get(id).map(Arc::as_ref)
    }

    /// Shared handle to the current version of an object.
    pub fn object_arc(&self, id: &str) -> Option<Arc<EpistemicObject>> {
        self.objects.get(id).cloned()
    }

    /// Objects ordered by id.
    pub fn objects(&self) -> impl Iterator<Item = &EpistemicObject> {
        self.objects.values().map(Arc::as_ref)
    }

    pub fn edge(&self, id: &str) -> Option<&GroundingEdge> {
        self.edges.get(id).map(Arc::as_ref)
    }

    /// Edges ordered by id.
    pub fn edges(&self) -> impl Iterator<Item = &GroundingEdge> {
        self.edges.values().map(Arc::as_ref)
    }

    pub fn levels(&self) -> &[AbstractionLevel] {
        &self.levels
    }

    pub fn level(&self, name: &str) -> Option<&AbstractionLevel> {
        self.levels.iter().find(|l| l.name == name)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges pointing at `object_id`, active or not.
    pub fn incoming_edges<'a>(
        &'a self,
        object_id: &'a str,
    ) -> impl Iterator<Item = &'a GroundingEdge> + 'a {
        self.edges().filter(move |e| e.to == object_id)
    }

    /// Edges leaving `object_id`, active or not.
    pub fn outgoing_edges<'a>(
        &'a self,
        object_id: &'a str,
    ) -> impl Iterator<Item = &'a GroundingEdge> + 'a {
        self.edges().filter(move |e| e.from == object_id)
    }

    /// blake3 over everything evaluation reads, in id order. Two networks built
    /// from the same parts in any order share a fingerprint; revision history
    /// and the version counter are excluded.
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        let mut field = |bytes: &[u8]| {
            hasher.update(bytes);
            hasher.update(&[0x1f]);
        };

        for object in self.objects() {
            field(b"object");
            field(object.id.as_bytes());
            field(object.content_hash.as_bytes());
            field(object.attitude.as_str().as_bytes());
            field(object.status.as_str().as_bytes());
            field(object.level.as_deref().unwrap_or("").as_bytes());
            if let Some(confidence) = &object.confidence {
                if let Ok(bytes) = serde_json::to_vec(confidence) {
                    field(&bytes);
                }
            }
        }
        for edge in self.edges() {
            field(b"edge");
            field(edge.id.as_bytes());
            field(edge.from.as_bytes());
            field(edge.to.as_bytes());
            field(edge.grounding_type.as_str().as_bytes());
            field(&edge.strength.value.to_bits().to_le_bytes());
            field(&[u8::from(edge.active)]);
        }
        for level in &self.levels {
            field(b"level");
            field(level.name.as_bytes());
            field(&level.position.to_le_bytes());
            field(&level.entrenchment.to_bits().to_le_bytes());
        }
        if let Ok(bytes) = serde_json::to_vec(&self.config) {
            field(&bytes);
        }
        hasher.finalize().to_hex().to_string()
    }

    // ---- evaluation ----

    pub fn evaluate(&self, context: &EvaluationContext) -> CoherenceReport {
        evaluate(self, context)
    }

    /// Evaluate, reusing the stored report when neither the network nor the
    /// context changed since it was computed.
    pub fn evaluate_cached(&mut self, context: &EvaluationContext) -> CoherenceReport {
        let fingerprint = self.fingerprint();
        if let Some(cached) = &self.cache {
            if cached.fingerprint == fingerprint && cached.context == *context {
                tracing::trace!(network_id = %self.id, "coherence cache hit");
                return cached.report.clone();
            }
        }
        let report = evaluate(self, context);
        self.cache = Some(CachedReport {
            fingerprint,
            context: context.clone(),
            report: report.clone(),
        });
        report
    }

    /// The stored report, if still fresh.
    pub fn cached_report(&self) -> Option<&CoherenceReport> {
        self.cache.as_ref().map(|c| &c.report)
    }

    // ---- serialization ----

    pub fn snapshot(&self) -> NetworkSnapshot {
        NetworkSnapshot {
            id: self.id.clone(),
            objects: self.objects().cloned().collect(),
            edges: self.edges().cloned().collect(),
            levels: self.levels.clone(),
            config: self.config.clone(),
        }
    }

    pub fn to_json(&self) -> WarrantResult<String> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    /// Deserialize with every construction check applied.
    pub fn from_json(json: &str) -> WarrantResult<Self> {
        let snapshot: NetworkSnapshot = serde_json::from_str(json)?;
        Ok(snapshot.into_network()?)
    }

    /// Deserialize keeping dangling edge endpoints and unknown level names.
    /// The integrity rule reports them at evaluation time.
    pub fn from_json_lenient(json: &str) -> WarrantResult<Self> {
        let snapshot: NetworkSnapshot = serde_json::from_str(json)?;
        Ok(snapshot.into_network_lenient()?)
    }

    /// Ids of every object any edge mentions that is not in the network.
    pub fn missing_references(&self) -> BTreeSet<&str> {
        self.edges()
            .flat_map(|e| [e.from.as_str(), e.to.as_str()])
            .filter(|id| !self.objects.contains_key(*id))
            .collect()
    }
}
