//! Grounded labelling by bounded worklist iteration.
//!
//! A node is `in` when every attacker is `out` (and, for a defeater whose
//! source claim is in the graph, that source is `in`). A node is `out` when
//! some attacker is `in` or its source is `out`. Nodes never decided are
//! `undecided`: that is the answer for circular defeat, not a failure.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use warrant_core::config::DefeatConfig;

use crate::graph::DefeatGraph;
use crate::priority::priority_score;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    In,
    Out,
    Undecided,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
            Self::Undecided => "undecided",
        }
    }
}

/// Why a node received its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cause", rename_all = "snake_case")]
pub enum LabelCause {
    /// Defeater not in `active` status; it attacks nothing.
    Inactive,
    /// Every attacker is out (vacuously, when there are none).
    AttackersOut,
    AttackedBy { attacker: String },
    SourceOut { source: String },
    /// Still unlabelled when iteration stopped.
    Unresolved,
}

/// One label assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelStep {
    /// Pass in which the label was assigned; 0 for initial labels.
    pub iteration: usize,
    pub node: String,
    pub label: Label,
    pub cause: LabelCause,
}

/// Result of grounded labelling over claims and defeaters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Labelling {
    labels: BTreeMap<String, Label>,
    iterations: usize,
    converged: bool,
    trace: Vec<LabelStep>,
}

impl Labelling {
    pub fn label(&self, id: &str) -> Option<Label> {
        self.labels.get(id).copied()
    }

    pub fn is_in(&self, id: &str) -> bool {
        self.label(id) == Some(Label::In)
    }

    pub fn labels(&self) -> &BTreeMap<String, Label> {
        &self.labels
    }

    /// Ids labelled `label`, in id order.
    pub fn with_label(&self, label: Label) -> Vec<&str> {
        self.labels
            .iter()
            .filter(|(_, l)| **l == label)
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// The grounded extension: every node labelled `in`.
    pub fn extension(&self) -> Vec<&str> {
        self.with_label(Label::In)
    }

    pub fn undecided(&self) -> Vec<&str> {
        self.with_label(Label::Undecided)
    }

    /// Passes used, rounded up.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// False when the iteration bound stopped labelling early.
    pub fn converged(&self) -> bool {
        self.converged
    }

    pub fn trace(&self) -> &[LabelStep] {
        &self.trace
    }
}

/// Grounded labelling of `graph`, giving up after `max_iterations` passes.
///
/// A pass is one node evaluation per node in the graph, spent from a single
/// worklist, so the depth of an acyclic chain does not consume passes.
pub fn compute_grounded_extension(graph: &DefeatGraph, max_iterations: usize) -> Labelling {
    let index = AttackIndex::build(graph, |_, _| true);
    run(graph, &index, max_iterations)
}

/// Grounded labelling where an attack on a defeater only succeeds if the
/// attacker's priority is not lower than its target's.
///
/// Higher-priority defeaters therefore win mutual attacks; equal priorities
/// leave the cycle undecided. Attacks on claims are never filtered.
pub fn compute_grounded_extension_with_priority(
    graph: &DefeatGraph,
    config: &DefeatConfig,
    now: DateTime<Utc>,
) -> Labelling {
    let scores: BTreeMap<&str, f64> = graph
        .defeaters()
        .map(|d| (d.id.as_str(), priority_score(d, config, now)))
        .collect();
    let index = AttackIndex::build(graph, |attacker, target| {
        match (scores.get(attacker), scores.get(target)) {
            (Some(a), Some(t)) => a >= t,
            _ => true,
        }
    });
    run(graph, &index, config.max_iterations)
}

struct AttackIndex<'g> {
    /// Every node id, sorted.
    nodes: Vec<&'g str>,
    /// Defeaters that start out `out` because they are not active.
    inactive: Vec<&'g str>,
    attackers: BTreeMap<&'g str, Vec<&'g str>>,
    source_of: BTreeMap<&'g str, &'g str>,
    /// Nodes whose label may change once the key is labelled.
    dependents: BTreeMap<&'g str, Vec<&'g str>>,
}

impl<'g> AttackIndex<'g> {
    fn build<F>(graph: &'g DefeatGraph, keep: F) -> Self
    where
        F: Fn(&str, &str) -> bool,
    {
        let mut nodes: Vec<&str> = graph
            .claims()
            .map(|c| c.id.as_str())
            .chain(graph.defeaters().map(|d| d.id.as_str()))
            .collect();
        nodes.sort_unstable();

        let mut inactive = Vec::new();
        let mut attackers: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        let mut source_of = BTreeMap::new();
        let mut dependents: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

        for d in graph.defeaters() {
            if !d.is_active() {
                inactive.push(d.id.as_str());
                continue;
            }
            for target in &d.targets {
                let is_defeater = graph.defeater(target).is_some();
                if !is_defeater || keep(&d.id, target) {
                    attackers.entry(target.as_str()).or_default().push(&d.id);
                    dependents.entry(d.id.as_str()).or_default().push(target);
                }
            }
            if graph.contains(&d.source) {
                source_of.insert(d.id.as_str(), d.source.as_str());
                dependents.entry(d.source.as_str()).or_default().push(&d.id);
            }
        }

        Self {
            nodes,
            inactive,
            attackers,
            source_of,
            dependents,
        }
    }

    /// Label for `node` given the labels so far, or `None` if not yet decidable.
    fn decide(&self, node: &str, labels: &BTreeMap<&str, Label>) -> Option<(Label, LabelCause)> {
        let attackers = self.attackers.get(node).map(Vec::as_slice).unwrap_or(&[]);
        if let Some(attacker) = attackers
            .iter()
            .find(|a| labels.get(*a) == Some(&Label::In))
        {
            return Some((
                Label::Out,
                LabelCause::AttackedBy {
                    attacker: attacker.to_string(),
                },
            ));
        }
        if let Some(source) = self.source_of.get(node) {
            match labels.get(source) {
                Some(Label::Out) => {
                    return Some((
                        Label::Out,
                        LabelCause::SourceOut {
                            source: source.to_string(),
                        },
                    ))
                }
                Some(Label::In) => {}
                _ => return None,
            }
        }
        attackers
            .iter()
            .all(|a| labels.get(a) == Some(&Label::Out))
            .then_some((Label::In, LabelCause::AttackersOut))
    }
}

fn run(graph: &DefeatGraph, index: &AttackIndex<'_>, max_iterations: usize) -> Labelling {
    let span = warrant_core::defeat_label_span!(graph.claim_count(), graph.defeater_count());
    let _guard = span.enter();

    let mut labels: BTreeMap<&str, Label> = BTreeMap::new();
    let mut trace = Vec::new();
    for id in index.inactive.iter().copied() {
        labels.insert(id, Label::Out);
        trace.push(LabelStep {
            iteration: 0,
            node: id.to_string(),
            label: Label::Out,
            cause: LabelCause::Inactive,
        });
    }

    // One pass is one evaluation per node; a node is re-queued as soon as one
    // of its attackers or its source is labelled, so depth costs no passes.
    let pass_len = index.nodes.len().max(1);
    let budget = max_iterations.saturating_mul(pass_len);
    let mut worklist: BTreeSet<&str> = index
        .nodes
        .iter()
        .copied()
        .filter(|n| !labels.contains_key(n))
        .collect();
    let mut evaluations = 0usize;
    while evaluations < budget {
        let Some(node) = worklist.pop_first() else {
            break;
        };
        evaluations += 1;
        if labels.contains_key(node) {
            continue;
        }
        let Some((label, cause)) = index.decide(node, &labels) else {
            continue;
        };
        labels.insert(node, label);
        trace.push(LabelStep {
            iteration: evaluations.div_ceil(pass_len),
            node: node.to_string(),
            label,
            cause,
        });
        if let Some(deps) = index.dependents.get(node) {
            worklist.extend(deps.iter().copied().filter(|d| !labels.contains_key(d)));
        }
    }
    let iterations = evaluations.div_ceil(pass_len);

    let converged = worklist.is_empty();
    if !converged {
        tracing::warn!(
            max_iterations,
            pending = worklist.len(),
            "defeat labelling hit the iteration bound"
        );
    }

    let mut out = BTreeMap::new();
    for node in &index.nodes {
        let label = match labels.get(node) {
            Some(label) => *label,
            None => {
                trace.push(LabelStep {
                    iteration: iterations,
                    node: node.to_string(),
                    label: Label::Undecided,
                    cause: LabelCause::Unresolved,
                });
                Label::Undecided
            }
        };
        out.insert(node.to_string(), label);
    }

    tracing::debug!(
        iterations,
        converged,
        undecided = out.values().filter(|l| **l == Label::Undecided).count(),
        "defeat labelling finished"
    );

    Labelling {
        labels: out,
        iterations,
        converged,
        trace,
    }
}
