// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of qgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use indexmap::IndexMap;

use super::edge::QueryGraphEdge;
use super::ids::{EdgeId, NodeId};
use super::node::QueryGraphNode;

/// Nodes and edges keyed by id, in insertion order.
///
/// Insertion order is observable: root fallback picks the first node and the row linearizer
/// walks edges in this order. Removals therefore use `shift_remove`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryGraph {
    nodes: IndexMap<NodeId, QueryGraphNode>,
    edges: IndexMap<EdgeId, QueryGraphEdge>,
}

impl QueryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &IndexMap<NodeId, QueryGraphNode> {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut IndexMap<NodeId, QueryGraphNode> {
        &mut self.nodes
    }

    pub fn edges(&self) -> &IndexMap<EdgeId, QueryGraphEdge> {
        &self.edges
    }

    pub fn edges_mut(&mut self) -> &mut IndexMap<EdgeId, QueryGraphEdge> {
        &mut self.edges
    }

    pub fn node(&self, node_id: &NodeId) -> Option<&QueryGraphNode> {
        self.nodes.get(node_id)
    }

    pub fn edge(&self, edge_id: &EdgeId) -> Option<&QueryGraphEdge> {
        self.edges.get(edge_id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn insert_node(&mut self, node_id: NodeId, node: QueryGraphNode) {
        self.nodes.insert(node_id, node);
    }

    pub fn insert_edge(&mut self, edge_id: EdgeId, edge: QueryGraphEdge) {
        self.edges.insert(edge_id, edge);
    }

    /// Removes the node and every edge touching it; returns the removed edge ids.
    pub fn remove_node(&mut self, node_id: &NodeId) -> Option<(QueryGraphNode, Vec<EdgeId>)> {
        let node = self.nodes.shift_remove(node_id)?;
        let incident = self.incident_edges(node_id);
        for edge_id in &incident {
            self.edges.shift_remove(edge_id);
        }
        Some((node, incident))
    }

    pub fn remove_edge(&mut self, edge_id: &EdgeId) -> Option<QueryGraphEdge> {
        self.edges.shift_remove(edge_id)
    }

    pub fn incident_edges(&self, node_id: &NodeId) -> Vec<EdgeId> {
        self.edges
            .iter()
            .filter(|(_, edge)| edge.touches(node_id))
            .map(|(edge_id, _)| edge_id.clone())
            .collect()
    }

    /// Number of edge endpoints on the node; a self-loop counts twice.
    pub fn degree(&self, node_id: &NodeId) -> usize {
        self.edges
            .values()
            .map(|edge| {
                usize::from(edge.subject() == node_id) + usize::from(edge.object() == node_id)
            })
            .sum()
    }

    /// Edges whose subject or object is not a node of this graph.
    pub fn dangling_edges(&self) -> Vec<EdgeId> {
        self.edges
            .iter()
            .filter(|(_, edge)| {
                !self.nodes.contains_key(edge.subject()) || !self.nodes.contains_key(edge.object())
            })
            .map(|(edge_id, _)| edge_id.clone())
            .collect()
    }

    /// The node inserted last, used as the anchor for growing a chain.
    pub fn last_node_id(&self) -> Option<&NodeId> {
        self.nodes.keys().last()
    }
}
