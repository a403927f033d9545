// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of qgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Presentation read model.
//!
//! A `RenderFrame` is everything a view needs for one repaint: the linear rows, positioned
//! nodes with fill colors, curved edges with label paths and qualifier badges, selection
//! highlights and the validity verdict. It is plain data and serializes to JSON.

pub mod sentence;

use serde::Serialize;

use crate::layout::{EdgeCurve, LayoutStore};
use crate::model::{EdgeId, NodeId};
use crate::ontology::Ontology;
use crate::ops::EditorState;
use crate::query::{linearize, Row};
use crate::ui::{Selection, UiState};

pub use sentence::{predicate_phrase, render_rows};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeView {
    pub id: NodeId,
    pub label: String,
    pub categories: Vec<String>,
    pub is_set: bool,
    pub x: f64,
    pub y: f64,
    pub pinned: bool,
    pub fill: String,
    pub matched_category: Option<String>,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeView {
    pub id: EdgeId,
    pub subject: NodeId,
    pub object: NodeId,
    pub label: String,
    pub index: i32,
    pub curve: EdgeCurve,
    pub path: String,
    pub label_path: String,
    pub has_qualifiers: bool,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    pub rev: u64,
    pub ui_rev: u64,
    pub is_valid: bool,
    pub error_message: Option<String>,
    pub root_node: Option<NodeId>,
    pub rows: Vec<Row>,
    pub sentence: Vec<String>,
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
    pub selection: Option<Selection>,
}

/// Snapshot of state, layout and UI highlights. Nodes or edges the layout has not seen yet
/// (no `sync` since the last edit) are left out.
pub fn build_frame(
    state: &EditorState,
    store: &LayoutStore,
    ui: &UiState,
    ontology: &dyn Ontology,
) -> RenderFrame {
    let graph = state.graph();
    let rows = linearize(state);
    let sentence = render_rows(graph, &rows);

    let nodes = graph
        .nodes()
        .iter()
        .filter_map(|(node_id, node)| {
            let sim = store.node(node_id)?;
            let (matched_category, fill) = ontology.color_map(node.categories());
            Some(NodeView {
                id: node_id.clone(),
                label: node.display_name(),
                categories: node.categories().to_vec(),
                is_set: node.is_set(),
                x: sim.x,
                y: sim.y,
                pinned: sim.is_pinned(),
                fill,
                matched_category,
                highlighted: ui.is_node_highlighted(node_id),
            })
        })
        .collect();

    let edges = graph
        .edges()
        .iter()
        .filter_map(|(edge_id, edge)| {
            let curve = *store.curve(edge_id)?;
            let index = store.placement(edge_id).map_or(0, |placement| placement.index);
            Some(EdgeView {
                id: edge_id.clone(),
                subject: edge.subject().clone(),
                object: edge.object().clone(),
                label: predicate_phrase(&edge.effective_predicates()),
                index,
                curve,
                path: curve.to_svg_path(),
                label_path: curve.label_path(),
                has_qualifiers: edge.has_qualifiers(),
                highlighted: ui.is_edge_highlighted(edge_id),
            })
        })
        .collect();

    RenderFrame {
        rev: state.rev(),
        ui_rev: ui.rev(),
        is_valid: state.is_valid(),
        error_message: state.error_message().map(str::to_owned),
        root_node: state.root_node().cloned(),
        rows,
        sentence,
        nodes,
        edges,
        selection: ui.selection().cloned(),
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::build_frame;
    use crate::layout::{LayoutConfig, LayoutStore};
    use crate::model::fixtures::{eid, nid, treats_with_parallel_edges};
    use crate::ontology::StaticOntology;
    use crate::ops::{apply, Command, EditorState, StructuralValidator};
    use crate::ui::{Selection, UiState};

    #[test]
    fn frame_carries_rows_nodes_edges_and_badges() {
        let validator = StructuralValidator::default();
        let state = EditorState::new(&validator);
        let state = apply(
            &state,
            &Command::SaveGraph { graph: treats_with_parallel_edges() },
            &validator,
        )
        .state;
        let mut qualifiers = IndexMap::new();
        qualifiers.insert("object aspect qualifier".to_owned(), "activity".to_owned());
        let state =
            apply(&state, &Command::EditQualifiers { edge_id: eid("e2"), qualifiers }, &validator)
                .state;

        let mut store = LayoutStore::new(LayoutConfig::default());
        store.sync(state.graph());
        store.settle(300);
        let mut ui = UiState::default();
        ui.set_selection(Some(Selection::Edge(eid("e1"))));

        let frame = build_frame(&state, &store, &ui, &StaticOntology::biolink());
        assert!(frame.is_valid);
        assert_eq!(frame.rows.len(), 3);
        assert_eq!(frame.sentence[0], "Find Small Molecules");
        assert_eq!(frame.nodes.len(), 3);
        assert_eq!(frame.nodes[0].fill, "#b8e186");
        assert_eq!(frame.nodes[1].fill, "#ffffff");
        assert_eq!(frame.edges.len(), 3);
        assert_eq!(frame.edges[0].index + frame.edges[1].index, 0);
        assert!(frame.edges[1].highlighted);
        assert!(frame.edges[2].has_qualifiers);
        assert!(frame.edges[0].path.starts_with("M "));
        assert_eq!(frame.root_node, Some(nid("n0")));

        let json = serde_json::to_value(&frame).expect("frame json");
        assert_eq!(json["selection"]["kind"], "edge");
        assert_eq!(json["edges"][2]["label"], "condition associated with gene");
    }
}
