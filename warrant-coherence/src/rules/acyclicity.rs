//! Cycle detection over the positive grounding subgraph.
//!
//! Tarjan's SCC finds every strongly connected component in one pass; each
//! component with more than one object holds at least one cycle and yields
//! one violation. The reported path is the shortest cycle through the
//! component's smallest id, so it is stable across insertion orders.

use std::collections::{BTreeMap, VecDeque};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use warrant_core::config::RuleKind;

use super::{ICoherenceRule, RuleContext};
use crate::evaluator::{Severity, Violation};
use crate::model::GroundingEdge;

pub struct AcyclicityRule;

type PositiveGraph<'a> = DiGraph<&'a str, &'a GroundingEdge>;

impl ICoherenceRule for AcyclicityRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Acyclicity
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<Violation> {
        let mut graph: PositiveGraph<'_> = DiGraph::new();
        let mut nodes: BTreeMap<&str, NodeIndex> = BTreeMap::new();
        for object in ctx.index.active_objects() {
            nodes.insert(object.id.as_str(), graph.add_node(object.id.as_str()));
        }
        for edge in ctx.index.live_edges() {
            if !edge.is_positive() {
                continue;
            }
            if let (Some(&from), Some(&to)) = (nodes.get(edge.from.as_str()), nodes.get(edge.to.as_str())) {
                graph.add_edge(from, to, *edge);
            }
        }

        let mut in_scc = vec![false; graph.node_count()];
        let mut cycles: Vec<(Vec<&str>, Vec<&str>)> = tarjan_scc(&graph)
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .filter_map(|scc| shortest_cycle(&graph, &scc, &mut in_scc))
            .collect();
        cycles.sort();

        cycles
            .into_iter()
            .map(|(path, edges)| {
                let mut members: Vec<&str> = path[..path.len() - 1].to_vec();
                members.sort_unstable();
                Violation::new(
                    self.kind(),
                    Severity::Error,
                    format!("grounding cycle: {}", path.join(" -> ")),
                )
                .with_objects(members)
                .with_edges(edges)
                .with_path(path)
            })
            .collect()
    }
}

/// BFS from the component's smallest id back to itself, staying inside the
/// component. Returns the closed path and the edges along it.
///
/// `in_scc` is shared across components: it must be all `false` on entry
/// and is left all `false` on return.
fn shortest_cycle<'a>(
    graph: &PositiveGraph<'a>,
    scc: &[NodeIndex],
    in_scc: &mut [bool],
) -> Option<(Vec<&'a str>, Vec<&'a str>)> {
    for n in scc {
        in_scc[n.index()] = true;
    }
    let found = bfs_back_to_start(graph, scc, in_scc);
    for n in scc {
        in_scc[n.index()] = false;
    }
    found
}

fn bfs_back_to_start<'a>(
    graph: &PositiveGraph<'a>,
    scc: &[NodeIndex],
    in_scc: &[bool],
) -> Option<(Vec<&'a str>, Vec<&'a str>)> {
    let start = *scc.iter().min_by_key(|n| graph[**n])?;

    let mut parent: BTreeMap<NodeIndex, (NodeIndex, EdgeIndex)> = BTreeMap::new();
    let mut queue = VecDeque::from([start]);
    while let Some(node) = queue.pop_front() {
        let mut out: Vec<_> = graph
            .edges(node)
            .filter(|e| in_scc[e.target().index()])
            .collect();
        out.sort_by_key(|e| (graph[e.target()], e.weight().id.as_str()));

        for e in out {
            let next = e.target();
            if next == start {
                return Some(unwind(graph, &parent, node, e.id(), start));
            }
            if parent.contains_key(&next) {
                continue;
            }
            parent.insert(next, (node, e.id()));
            queue.push_back(next);
        }
    }
    None
}

fn unwind<'a>(
    graph: &PositiveGraph<'a>,
    parent: &BTreeMap<NodeIndex, (NodeIndex, EdgeIndex)>,
    last: NodeIndex,
    closing: EdgeIndex,
    start: NodeIndex,
) -> (Vec<&'a str>, Vec<&'a str>) {
    let mut nodes = vec![start, last];
    let mut edges = vec![closing];
    let mut cursor = last;
    while cursor != start {
        let Some(&(prev, via)) = parent.get(&cursor) else {
            break;
        };
        edges.push(via);
        nodes.push(prev);
        cursor = prev;
    }
    nodes.reverse();
    edges.reverse();
    (
        nodes.into_iter().map(|n| graph[n]).collect(),
        edges.into_iter().map(|e| graph[e].id.as_str()).collect(),
    )
}
