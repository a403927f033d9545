// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of qgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Structural validity of a query graph.
//!
//! Invalid graphs are still committed by the reducer; the verdict only decides whether the
//! graph may be submitted and what warning the presentation layer shows.

use serde::{Deserialize, Serialize};

use crate::model::QueryGraph;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Validation {
    pub is_valid: bool,
    pub error_message: Option<String>,
}

impl Validation {
    pub fn valid() -> Self {
        Self { is_valid: true, error_message: None }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self { is_valid: false, error_message: Some(message.into()) }
    }
}

pub trait GraphValidator {
    fn validate(&self, graph: &QueryGraph) -> Validation;
}

impl<F> GraphValidator for F
where
    F: Fn(&QueryGraph) -> Validation,
{
    fn validate(&self, graph: &QueryGraph) -> Validation {
        self(graph)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationRules {
    pub min_edges: usize,
    pub max_edges: Option<usize>,
    /// Reject nodes that have neither identifiers nor categories.
    pub require_node_constraint: bool,
    pub allow_self_loops: bool,
    pub max_set_nodes: Option<usize>,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            min_edges: 1,
            max_edges: None,
            require_node_constraint: false,
            allow_self_loops: true,
            max_set_nodes: None,
        }
    }
}

/// Rule-table validator. Rules run in a fixed order and the first failure is reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuralValidator {
    rules: ValidationRules,
}

impl StructuralValidator {
    pub fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    fn check(&self, graph: &QueryGraph) -> Result<(), String> {
        for (edge_id, edge) in graph.edges() {
            for node_id in [edge.subject(), edge.object()] {
                if !graph.nodes().contains_key(node_id) {
                    return Err(format!("Edge {edge_id} references a missing node {node_id}."));
                }
            }
        }

        let edge_count = graph.edges().len();
        if edge_count < self.rules.min_edges {
            let noun = if self.rules.min_edges == 1 { "edge" } else { "edges" };
            return Err(format!("A query needs at least {} {noun}.", self.rules.min_edges));
        }
        if let Some(max_edges) = self.rules.max_edges {
            if edge_count > max_edges {
                return Err(format!("A query can have at most {max_edges} edges."));
            }
        }

        if !self.rules.allow_self_loops {
            if let Some((edge_id, edge)) = graph.edges().iter().find(|(_, edge)| edge.is_self_loop())
            {
                return Err(format!("Edge {edge_id} connects node {} to itself.", edge.subject()));
            }
        }

        if self.rules.require_node_constraint {
            if let Some(node_id) = graph
                .nodes()
                .iter()
                .find(|(_, node)| node.is_unconstrained())
                .map(|(node_id, _)| node_id)
            {
                return Err(format!("Node {node_id} needs an identifier or a category."));
            }
        }

        if let Some(max_set_nodes) = self.rules.max_set_nodes {
            let set_nodes = graph.nodes().values().filter(|node| node.is_set()).count();
            if set_nodes > max_set_nodes {
                return Err(format!("A query can have at most {max_set_nodes} set nodes."));
            }
        }

        Ok(())
    }
}

impl GraphValidator for StructuralValidator {
    fn validate(&self, graph: &QueryGraph) -> Validation {
        match self.check(graph) {
            Ok(()) => Validation::valid(),
            Err(message) => Validation::invalid(message),
        }
    }
}
