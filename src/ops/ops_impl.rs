// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of qgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

// Graph mutation helpers used by `apply`.
// Keeps `ops::mod` focused on command types and orchestration. Helpers only mutate; the
// caller restores invariants afterwards.

/// The graph every editing session starts from: `n0 -[related_to]-> n1`.
pub fn default_graph() -> QueryGraph {
    let mut graph = QueryGraph::new();
    let subject = allocate_node(&mut graph);
    let object = allocate_node(&mut graph);
    let edge_id = next_edge_id(&graph);
    graph.insert_edge(edge_id, QueryGraphEdge::new(subject, object));
    graph
}

/// First half of "attach to a new node": inserts a default node under the lowest free id.
fn allocate_node(graph: &mut QueryGraph) -> NodeId {
    let node_id = next_node_id(graph);
    graph.insert_node(node_id.clone(), QueryGraphNode::new());
    node_id
}

/// Second half: points one end of an edge at an existing node.
fn attach_endpoint(
    graph: &mut QueryGraph,
    edge_id: &EdgeId,
    endpoint: Endpoint,
    node_id: NodeId,
) -> bool {
    let Some(edge) = graph.edges_mut().get_mut(edge_id) else {
        return false;
    };
    edge.set_endpoint(endpoint, node_id);
    true
}

fn add_edge(graph: &mut QueryGraph, subject: &NodeId, object: &NodeId) -> Option<EdgeId> {
    for node_id in [subject, object] {
        if graph.node(node_id).is_none() {
            warn!(%node_id, "add_edge: unknown node");
            return None;
        }
    }
    let edge_id = next_edge_id(graph);
    graph.insert_edge(edge_id.clone(), QueryGraphEdge::new(subject.clone(), object.clone()));
    Some(edge_id)
}

fn edit_edge(
    graph: &mut QueryGraph,
    edge_id: &EdgeId,
    endpoint: Endpoint,
    target: &EndpointTarget,
) {
    if graph.edge(edge_id).is_none() {
        warn!(%edge_id, "edit_edge: unknown edge");
        return;
    }

    let node_id = match target {
        EndpointTarget::Node(node_id) => {
            if graph.node(node_id).is_none() {
                warn!(%edge_id, %node_id, "edit_edge: unknown target node");
                return;
            }
            node_id.clone()
        }
        EndpointTarget::NewNode => allocate_node(graph),
    };
    attach_endpoint(graph, edge_id, endpoint, node_id);
}

fn edit_predicate(graph: &mut QueryGraph, edge_id: &EdgeId, predicates: &[String]) {
    match graph.edges_mut().get_mut(edge_id) {
        Some(edge) => edge.set_predicates(predicates.to_vec()),
        None => warn!(%edge_id, "edit_predicate: unknown edge"),
    }
}

const QUALIFIED_PREDICATE: &str = "qualified_predicate";

/// Encodes UI qualifier names/values as a single TRAPI qualifier set.
///
/// Names become namespaced snake_case type ids, values become snake_case; the value of a
/// `qualified predicate` is a predicate itself and is namespaced too. Blank values are skipped.
pub fn encode_qualifiers(qualifiers: &IndexMap<String, String>) -> Option<Vec<QualifierSet>> {
    let qualifier_set: Vec<Qualifier> = qualifiers
        .iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(name, value)| {
            let name = snake_case(name);
            let value = if strip_biolink(&name) == QUALIFIED_PREDICATE {
                namespaced(&snake_case(value))
            } else {
                snake_case(value)
            };
            Qualifier::new(namespaced(&name), value)
        })
        .collect();

    if qualifier_set.is_empty() {
        return None;
    }
    Some(vec![QualifierSet { qualifier_set }])
}

fn edit_qualifiers(graph: &mut QueryGraph, edge_id: &EdgeId, qualifiers: &IndexMap<String, String>) {
    match graph.edges_mut().get_mut(edge_id) {
        Some(edge) => edge.set_qualifier_constraints(encode_qualifiers(qualifiers)),
        None => warn!(%edge_id, "edit_qualifiers: unknown edge"),
    }
}

/// Grows a chain: a new node hanging off `from` (or off the most recently created node).
fn add_hop(graph: &mut QueryGraph, from: Option<&NodeId>) {
    let subject = match from {
        Some(node_id) if graph.node(node_id).is_none() => {
            warn!(%node_id, "add_hop: unknown node");
            return;
        }
        Some(node_id) => node_id.clone(),
        None => match graph.last_node_id() {
            Some(node_id) => node_id.clone(),
            None => {
                allocate_node(graph);
                return;
            }
        },
    };

    let object = allocate_node(graph);
    let edge_id = next_edge_id(graph);
    graph.insert_edge(edge_id, QueryGraphEdge::new(subject, object));
}

/// Replaces identity fields; `None` resets the node to an unconstrained default.
fn edit_node(graph: &mut QueryGraph, node_id: &NodeId, node: Option<&QueryGraphNode>) {
    match graph.nodes_mut().get_mut(node_id) {
        Some(existing) => *existing = node.cloned().unwrap_or_default(),
        None => warn!(%node_id, "edit_node: unknown node"),
    }
}
