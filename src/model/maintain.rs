// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of qgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Invariant maintenance: root selection, reachability pruning and id allocation.
//!
//! Everything here is pure. The reducer calls these after structural edits so that every
//! committed graph is anchored at a root and fully reachable from it.

use std::collections::{HashMap, HashSet, VecDeque};

use super::graph::QueryGraph;
use super::ids::{EdgeId, Id, IdKind, NodeId};

/// Keeps `previous_root` while it still exists, otherwise falls back to the first node.
pub fn compute_root(graph: &QueryGraph, previous_root: Option<&NodeId>) -> Option<NodeId> {
    if let Some(root) = previous_root {
        if graph.nodes().contains_key(root) {
            return Some(root.clone());
        }
    }
    graph.nodes().keys().next().cloned()
}

/// Undirected adjacency over edges whose endpoints both exist.
fn undirected_adjacency(graph: &QueryGraph) -> HashMap<&NodeId, Vec<&NodeId>> {
    let mut adjacency: HashMap<&NodeId, Vec<&NodeId>> = HashMap::new();
    for edge in graph.edges().values() {
        let (subject, object) = (edge.subject(), edge.object());
        if !graph.nodes().contains_key(subject) || !graph.nodes().contains_key(object) {
            continue;
        }
        adjacency.entry(subject).or_default().push(object);
        adjacency.entry(object).or_default().push(subject);
    }
    adjacency
}

/// Node ids reachable from `root`, treating edges as undirected.
pub fn reachable_from(graph: &QueryGraph, root: &NodeId) -> HashSet<NodeId> {
    let mut seen = HashSet::new();
    if !graph.nodes().contains_key(root) {
        return seen;
    }

    let adjacency = undirected_adjacency(graph);
    let mut queue = VecDeque::from([root]);
    seen.insert(root.clone());
    while let Some(current) = queue.pop_front() {
        let Some(neighbors) = adjacency.get(current) else {
            continue;
        };
        for &neighbor in neighbors {
            if seen.insert(neighbor.clone()) {
                queue.push_back(neighbor);
            }
        }
    }
    seen
}

/// Drops every node not reachable from `root`, and every edge that lost an endpoint.
///
/// With no root the result is the empty graph. Insertion order of survivors is preserved.
pub fn prune_unreachable(graph: &QueryGraph, root: Option<&NodeId>) -> QueryGraph {
    let Some(root) = root else {
        return QueryGraph::new();
    };

    let keep = reachable_from(graph, root);
    let mut pruned = QueryGraph::new();
    for (node_id, node) in graph.nodes() {
        if keep.contains(node_id) {
            pruned.insert_node(node_id.clone(), node.clone());
        }
    }
    for (edge_id, edge) in graph.edges() {
        if keep.contains(edge.subject()) && keep.contains(edge.object()) {
            pruned.insert_edge(edge_id.clone(), edge.clone());
        }
    }
    pruned
}

/// Smallest unused `n<k>` / `e<k>` id.
pub fn next_id<T>(graph: &QueryGraph, kind: IdKind) -> Id<T> {
    let prefix = kind.prefix();
    let used: HashSet<u64> = match kind {
        IdKind::Node => graph
            .nodes()
            .keys()
            .filter_map(|id| id.numeric_suffix(prefix))
            .collect(),
        IdKind::Edge => graph
            .edges()
            .keys()
            .filter_map(|id| id.numeric_suffix(prefix))
            .collect(),
    };

    let k = (0u64..)
        .find(|k| !used.contains(k))
        .unwrap_or(used.len() as u64);
    Id::allocated(prefix, k)
}

pub fn next_node_id(graph: &QueryGraph) -> NodeId {
    next_id(graph, IdKind::Node)
}

pub fn next_edge_id(graph: &QueryGraph) -> EdgeId {
    next_id(graph, IdKind::Edge)
}
