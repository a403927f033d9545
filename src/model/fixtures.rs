// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of qgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::edge::QueryGraphEdge;
use super::graph::QueryGraph;
use super::ids::{EdgeId, NodeId};
use super::node::QueryGraphNode;

pub(crate) fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

pub(crate) fn eid(value: &str) -> EdgeId {
    EdgeId::new(value).expect("edge id")
}

/// `n0 -> n1` via `e0`, both nodes unconstrained.
pub(crate) fn default_graph() -> QueryGraph {
    let mut graph = QueryGraph::new();
    graph.insert_node(nid("n0"), QueryGraphNode::new());
    graph.insert_node(nid("n1"), QueryGraphNode::new());
    graph.insert_edge(eid("e0"), QueryGraphEdge::new(nid("n0"), nid("n1")));
    graph
}

/// `n0 -e0-> n1 -e1-> n2`.
pub(crate) fn two_hop_chain() -> QueryGraph {
    let mut graph = default_graph();
    graph.insert_node(nid("n2"), QueryGraphNode::new());
    graph.insert_edge(eid("e1"), QueryGraphEdge::new(nid("n1"), nid("n2")));
    graph
}

/// Drug -> disease -> gene, with one reversed parallel edge between the first two.
pub(crate) fn treats_with_parallel_edges() -> QueryGraph {
    let mut graph = QueryGraph::new();
    let mut drug = QueryGraphNode::with_categories(["biolink:SmallMolecule"]);
    drug.set_is_set(true);
    graph.insert_node(nid("n0"), drug);
    graph.insert_node(nid("n1"), QueryGraphNode::with_ids(["MONDO:0005148"]));
    graph.insert_node(nid("n2"), QueryGraphNode::with_categories(["biolink:Gene"]));

    graph.insert_edge(
        eid("e0"),
        QueryGraphEdge::new_with(nid("n0"), nid("n1"), vec!["biolink:treats".to_owned()]),
    );
    graph.insert_edge(
        eid("e1"),
        QueryGraphEdge::new_with(nid("n1"), nid("n0"), vec!["biolink:caused_by".to_owned()]),
    );
    graph.insert_edge(
        eid("e2"),
        QueryGraphEdge::new_with(
            nid("n1"),
            nid("n2"),
            vec!["biolink:condition_associated_with_gene".to_owned()],
        ),
    );
    graph
}
