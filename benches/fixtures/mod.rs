// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of qgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark graphs (no RNG).

use qgraph::model::{EdgeId, NodeId, QueryGraph, QueryGraphEdge, QueryGraphNode};

#[derive(Debug, Clone, Copy)]
pub enum Case {
    /// A three-hop chain.
    Small,
    /// A 24-node tree: a chain with a fan of leaves on every other node.
    Medium,
    /// Twelve nodes with many parallel and reversed edges between neighbors.
    Dense,
}

impl Case {
    pub fn name(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Dense => "dense",
        }
    }
}

pub const ALL: [Case; 3] = [Case::Small, Case::Medium, Case::Dense];

pub fn nid(idx: usize) -> NodeId {
    NodeId::new(format!("n{idx}")).expect("node id")
}

pub fn eid(idx: usize) -> EdgeId {
    EdgeId::new(format!("e{idx}")).expect("edge id")
}

const CATEGORIES: [&str; 4] =
    ["biolink:SmallMolecule", "biolink:Disease", "biolink:Gene", "biolink:Protein"];

const PREDICATES: [&str; 4] =
    ["biolink:treats", "biolink:caused_by", "biolink:interacts_with", "biolink:related_to"];

fn node(idx: usize) -> QueryGraphNode {
    QueryGraphNode::with_categories([CATEGORIES[idx % CATEGORIES.len()]])
}

fn edge(idx: usize, subject: usize, object: usize) -> QueryGraphEdge {
    QueryGraphEdge::new_with(
        nid(subject),
        nid(object),
        vec![PREDICATES[idx % PREDICATES.len()].to_owned()],
    )
}

pub fn graph(case: Case) -> QueryGraph {
    let mut graph = QueryGraph::new();
    let mut links: Vec<(usize, usize)> = Vec::new();
    let node_count = match case {
        Case::Small => {
            links.extend([(0, 1), (1, 2), (2, 3)]);
            4
        }
        Case::Medium => {
            let spine = 8;
            links.extend((0..spine - 1).map(|idx| (idx, idx + 1)));
            let mut next = spine;
            for hub in (0..spine).step_by(2) {
                for _ in 0..4 {
                    links.push((hub, next));
                    next += 1;
                }
            }
            next
        }
        Case::Dense => {
            let count = 12;
            for idx in 0..count - 1 {
                links.push((idx, idx + 1));
                links.push((idx + 1, idx));
                links.push((idx, idx + 1));
            }
            count
        }
    };

    for idx in 0..node_count {
        graph.insert_node(nid(idx), node(idx));
    }
    for (idx, (subject, object)) in links.into_iter().enumerate() {
        graph.insert_edge(eid(idx), edge(idx, subject, object));
    }
    graph
}
