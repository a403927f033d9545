// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of qgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Shared UI state for cross-view coordination.
//!
//! This lightweight state propagates the current selection and connect-mode highlights
//! between the graph canvas and the linear row view. `rev` changes whenever either does.

use serde::Serialize;

use crate::model::{EdgeId, NodeId};

/// What the edit popover is anchored to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Selection {
    Node(NodeId),
    Edge(EdgeId),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    rev: u64,
    selection: Option<Selection>,
    chosen_nodes: Vec<NodeId>,
}

impl UiState {
    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Nodes already picked while connecting.
    pub fn chosen_nodes(&self) -> &[NodeId] {
        &self.chosen_nodes
    }

    pub fn is_node_highlighted(&self, node_id: &NodeId) -> bool {
        matches!(&self.selection, Some(Selection::Node(selected)) if selected == node_id)
            || self.chosen_nodes.contains(node_id)
    }

    pub fn is_edge_highlighted(&self, edge_id: &EdgeId) -> bool {
        matches!(&self.selection, Some(Selection::Edge(selected)) if selected == edge_id)
    }

    pub fn set_selection(&mut self, selection: Option<Selection>) {
        if self.selection == selection {
            return;
        }
        self.selection = selection;
        self.rev = self.rev.wrapping_add(1);
    }

    pub fn set_chosen_nodes(&mut self, chosen_nodes: &[NodeId]) {
        if self.chosen_nodes == chosen_nodes {
            return;
        }
        self.chosen_nodes = chosen_nodes.to_vec();
        self.rev = self.rev.wrapping_add(1);
    }

    /// Drops highlights that point at ids no longer present.
    pub fn retain(&mut self, has_node: impl Fn(&NodeId) -> bool, has_edge: impl Fn(&EdgeId) -> bool) {
        let stale = match &self.selection {
            Some(Selection::Node(node_id)) => !has_node(node_id),
            Some(Selection::Edge(edge_id)) => !has_edge(edge_id),
            None => false,
        };
        if stale {
            self.set_selection(None);
        }
        if self.chosen_nodes.iter().any(|node_id| !has_node(node_id)) {
            let kept: Vec<NodeId> =
                self.chosen_nodes.iter().filter(|node_id| has_node(node_id)).cloned().collect();
            self.set_chosen_nodes(&kept);
        }
    }
}
