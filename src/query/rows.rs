// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of qgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;

use serde::Serialize;

use crate::model::{EdgeId, NodeId, QueryGraph};
use crate::ops::EditorState;

/// One sentence-style row: `subject -predicate-> object`.
///
/// An endpoint is a reference when an earlier row already introduced it; the linear view
/// renders references read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub edge_id: EdgeId,
    pub subject_is_reference: bool,
    pub object_is_reference: bool,
}

/// Rows for the current state; an invalid graph yields no rows.
pub fn linearize(state: &EditorState) -> Vec<Row> {
    if !state.is_valid() {
        return Vec::new();
    }
    linearize_graph(state.graph(), state.root_node())
}

/// Edge order with the first root-subject edge moved to the front, then reference flags.
pub fn linearize_graph(graph: &QueryGraph, root: Option<&NodeId>) -> Vec<Row> {
    let mut order: Vec<(&EdgeId, _)> = graph.edges().iter().collect();
    if let Some(root) = root {
        if let Some(pos) = order.iter().position(|(_, edge)| edge.subject() == root) {
            let first = order.remove(pos);
            order.insert(0, first);
        }
    }

    let mut seen: HashSet<&NodeId> = HashSet::with_capacity(graph.nodes().len());
    order
        .into_iter()
        .map(|(edge_id, edge)| {
            let row = Row {
                edge_id: edge_id.clone(),
                subject_is_reference: seen.contains(edge.subject()),
                object_is_reference: seen.contains(edge.object()),
            };
            seen.insert(edge.subject());
            seen.insert(edge.object());
            row
        })
        .collect()
}
