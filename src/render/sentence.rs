// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of qgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Sentence-style text for linearized rows.
//!
//! `Find Small Molecules` / `where Small Molecule treats Disease` / `and where ...`.
//! Set nodes are pluralized only in the opening `Find` line.

use crate::format::text::{pluralize, pretty_predicate};
use crate::model::{NodeId, QueryGraph, FALLBACK_NODE_NAME};
use crate::query::Row;

fn node_label(graph: &QueryGraph, node_id: &NodeId) -> String {
    graph
        .node(node_id)
        .map(|node| node.display_name())
        .unwrap_or_else(|| FALLBACK_NODE_NAME.to_owned())
}

/// `treats or affects`; an edge without predicates reads `related to`.
pub fn predicate_phrase(predicates: &[&str]) -> String {
    predicates.iter().map(|predicate| pretty_predicate(predicate)).collect::<Vec<_>>().join(" or ")
}

/// One line per row plus the opening `Find` line; no rows means no text.
pub fn render_rows(graph: &QueryGraph, rows: &[Row]) -> Vec<String> {
    let Some(first_edge) = rows.first().and_then(|row| graph.edge(&row.edge_id)) else {
        return Vec::new();
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    let subject = first_edge.subject();
    let mut head = node_label(graph, subject);
    if graph.node(subject).is_some_and(|node| node.is_set()) {
        head = pluralize(&head);
    }
    lines.push(format!("Find {head}"));

    for (idx, row) in rows.iter().enumerate() {
        let Some(edge) = graph.edge(&row.edge_id) else {
            continue;
        };
        let lead = if idx == 0 { "where" } else { "and where" };
        let mut line = format!(
            "{lead} {} {} {}",
            node_label(graph, edge.subject()),
            predicate_phrase(&edge.effective_predicates()),
            node_label(graph, edge.object()),
        );
        if edge.has_qualifiers() {
            line.push_str(" (qualified)");
        }
        lines.push(line);
    }
    lines
}
