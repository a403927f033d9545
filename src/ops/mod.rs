// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of qgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Edit commands for query graphs.
//!
//! `apply` is a pure reducer: it never fails, it clones the state, mutates the clone, restores
//! the root/reachability invariants after structural edits, and re-validates. Every result
//! carries a coarse delta the UI can use to refresh derived state.

pub mod validate;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::format::text::{namespaced, snake_case, strip_biolink};
use crate::model::{
    compute_root, next_edge_id, next_node_id, prune_unreachable, EdgeId, Endpoint, NodeId,
    Qualifier, QualifierSet, QueryGraph, QueryGraphEdge, QueryGraphNode,
};

pub use validate::{GraphValidator, StructuralValidator, Validation, ValidationRules};

/// Where an edge endpoint should point after `EditEdge`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointTarget {
    /// An existing node.
    Node(NodeId),
    /// A freshly allocated default node.
    NewNode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddEdge {
        subject: NodeId,
        object: NodeId,
    },
    EditEdge {
        edge_id: EdgeId,
        endpoint: Endpoint,
        target: EndpointTarget,
    },
    EditPredicate {
        edge_id: EdgeId,
        predicates: Vec<String>,
    },
    /// Human-readable qualifier names to values, e.g. `"object aspect qualifier" -> "activity"`.
    EditQualifiers {
        edge_id: EdgeId,
        qualifiers: IndexMap<String, String>,
    },
    DeleteEdge {
        edge_id: EdgeId,
    },
    AddHop {
        node_id: Option<NodeId>,
    },
    AddNode,
    EditNode {
        node_id: NodeId,
        node: Option<QueryGraphNode>,
    },
    ResetGraph,
    DeleteNode {
        node_id: NodeId,
    },
    SaveGraph {
        graph: QueryGraph,
    },
    RestoreGraph {
        graph: QueryGraph,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddEdge { .. } => "add_edge",
            Self::EditEdge { .. } => "edit_edge",
            Self::EditPredicate { .. } => "edit_predicate",
            Self::EditQualifiers { .. } => "edit_qualifiers",
            Self::DeleteEdge { .. } => "delete_edge",
            Self::AddHop { .. } => "add_hop",
            Self::AddNode => "add_node",
            Self::EditNode { .. } => "edit_node",
            Self::ResetGraph => "reset_graph",
            Self::DeleteNode { .. } => "delete_node",
            Self::SaveGraph { .. } => "save_graph",
            Self::RestoreGraph { .. } => "restore_graph",
        }
    }
}

/// The reducer's state. The presentation layer only ever sees clones of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    graph: QueryGraph,
    root_node: Option<NodeId>,
    is_valid: bool,
    error_message: Option<String>,
    rev: u64,
}

impl EditorState {
    /// The default two-node/one-edge graph rooted at `n0`.
    pub fn new(validator: &dyn GraphValidator) -> Self {
        let graph = default_graph();
        let root_node = compute_root(&graph, None);
        let mut state = Self { graph, root_node, is_valid: false, error_message: None, rev: 0 };
        state.revalidate(validator);
        state
    }

    pub fn graph(&self) -> &QueryGraph {
        &self.graph
    }

    pub fn root_node(&self) -> Option<&NodeId> {
        self.root_node.as_ref()
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Bumped once per applied command.
    pub fn rev(&self) -> u64 {
        self.rev
    }

    fn revalidate(&mut self, validator: &dyn GraphValidator) {
        let Validation { is_valid, error_message } = validator.validate(&self.graph);
        self.is_valid = is_valid;
        self.error_message = if is_valid { None } else { error_message };
    }

    /// Recomputes the root (preferring `previous_root`) and prunes everything it cannot reach.
    fn maintain(&mut self, previous_root: Option<&NodeId>) -> Pruned {
        let root = compute_root(&self.graph, previous_root);
        let pruned = prune_unreachable(&self.graph, root.as_ref());
        let report = Pruned {
            nodes: self.graph.nodes().len() - pruned.nodes().len(),
            edges: self.graph.edges().len() - pruned.edges().len(),
        };
        self.graph = pruned;
        self.root_node = root;
        report
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Pruned {
    nodes: usize,
    edges: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    pub state: EditorState,
    pub delta: Delta,
}

/// Node/edge ids that appeared, disappeared or changed between two graphs, in graph order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delta {
    pub added_nodes: Vec<NodeId>,
    pub removed_nodes: Vec<NodeId>,
    pub updated_nodes: Vec<NodeId>,
    pub added_edges: Vec<EdgeId>,
    pub removed_edges: Vec<EdgeId>,
    pub updated_edges: Vec<EdgeId>,
}

impl Delta {
    pub fn between(before: &QueryGraph, after: &QueryGraph) -> Self {
        let mut delta = Self::default();

        for (node_id, node) in after.nodes() {
            match before.node(node_id) {
                None => delta.added_nodes.push(node_id.clone()),
                Some(previous) if previous != node => delta.updated_nodes.push(node_id.clone()),
                Some(_) => {}
            }
        }
        delta.removed_nodes = before
            .nodes()
            .keys()
            .filter(|node_id| !after.nodes().contains_key(*node_id))
            .cloned()
            .collect();

        for (edge_id, edge) in after.edges() {
            match before.edge(edge_id) {
                None => delta.added_edges.push(edge_id.clone()),
                Some(previous) if previous != edge => delta.updated_edges.push(edge_id.clone()),
                Some(_) => {}
            }
        }
        delta.removed_edges = before
            .edges()
            .keys()
            .filter(|edge_id| !after.edges().contains_key(*edge_id))
            .cloned()
            .collect();

        delta
    }

    pub fn is_empty(&self) -> bool {
        self.added_nodes.is_empty()
            && self.removed_nodes.is_empty()
            && self.updated_nodes.is_empty()
            && self.added_edges.is_empty()
            && self.removed_edges.is_empty()
            && self.updated_edges.is_empty()
    }
}

pub fn apply(state: &EditorState, command: &Command, validator: &dyn GraphValidator) -> ApplyResult {
    let mut next = state.clone();
    let previous_root = state.root_node.clone();

    let pruned = match command {
        Command::AddEdge { subject, object } => {
            add_edge(&mut next.graph, subject, object);
            Some(next.maintain(previous_root.as_ref()))
        }
        Command::EditEdge { edge_id, endpoint, target } => {
            edit_edge(&mut next.graph, edge_id, *endpoint, target);
            Some(next.maintain(previous_root.as_ref()))
        }
        Command::EditPredicate { edge_id, predicates } => {
            edit_predicate(&mut next.graph, edge_id, predicates);
            None
        }
        Command::EditQualifiers { edge_id, qualifiers } => {
            edit_qualifiers(&mut next.graph, edge_id, qualifiers);
            None
        }
        Command::DeleteEdge { edge_id } => {
            if next.graph.remove_edge(edge_id).is_none() {
                warn!(%edge_id, "delete_edge: unknown edge");
            }
            Some(next.maintain(previous_root.as_ref()))
        }
        Command::AddHop { node_id } => {
            add_hop(&mut next.graph, node_id.as_ref());
            Some(next.maintain(previous_root.as_ref()))
        }
        Command::AddNode => {
            allocate_node(&mut next.graph);
            Some(next.maintain(previous_root.as_ref()))
        }
        Command::EditNode { node_id, node } => {
            edit_node(&mut next.graph, node_id, node.as_ref());
            None
        }
        Command::ResetGraph => {
            next.graph = default_graph();
            Some(next.maintain(None))
        }
        Command::DeleteNode { node_id } => {
            if next.graph.remove_node(node_id).is_none() {
                warn!(%node_id, "delete_node: unknown node");
            }
            Some(next.maintain(previous_root.as_ref()))
        }
        Command::SaveGraph { graph } | Command::RestoreGraph { graph } => {
            next.graph = graph.clone();
            Some(next.maintain(None))
        }
    };

    if let Some(pruned) = pruned.filter(|pruned| *pruned != Pruned::default()) {
        debug!(
            command = command.name(),
            pruned_nodes = pruned.nodes,
            pruned_edges = pruned.edges,
            "pruned unreachable part of the graph"
        );
    }

    next.revalidate(validator);
    next.rev = next.rev.saturating_add(1);
    debug!(
        command = command.name(),
        nodes = next.graph.nodes().len(),
        edges = next.graph.edges().len(),
        root = next.root_node.as_ref().map(NodeId::as_str),
        valid = next.is_valid,
        "applied command"
    );

    let delta = Delta::between(&state.graph, &next.graph);
    ApplyResult { state: next, delta }
}

// Per-command graph mutations.
include!("ops_impl.rs");
