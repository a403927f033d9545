// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of qgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! TRAPI-shaped exchange format for query graphs.
//!
//! Export always uses the plural list fields and omits empty ones; import also accepts the
//! legacy singular `id`/`category`/`predicate` fields (string or list) and folds them in.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{
    EdgeId, IdError, NodeId, Qualifier, QualifierSet, QueryGraph, QueryGraphEdge, QueryGraphNode,
};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct TrapiQueryGraph {
    #[serde(default)]
    pub nodes: IndexMap<String, TrapiNode>,
    #[serde(default)]
    pub edges: IndexMap<String, TrapiEdge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct TrapiNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_set: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub taxa: Vec<String>,
    #[serde(default, rename = "id", skip_serializing)]
    pub legacy_id: Option<OneOrMany>,
    #[serde(default, rename = "category", skip_serializing)]
    pub legacy_category: Option<OneOrMany>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TrapiEdge {
    pub subject: String,
    pub object: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub predicates: Vec<String>,
    #[serde(default, rename = "predicate", skip_serializing)]
    pub legacy_predicate: Option<OneOrMany>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub qualifier_constraints: Vec<TrapiQualifierSet>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct TrapiQualifierSet {
    #[serde(default)]
    pub qualifier_set: Vec<TrapiQualifier>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TrapiQualifier {
    pub qualifier_type_id: String,
    pub qualifier_value: String,
}

/// A field older payloads wrote either as a bare string or as a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("invalid query graph JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid node id '{id}': {source}")]
    InvalidNodeId { id: String, source: IdError },
    #[error("invalid edge id '{id}': {source}")]
    InvalidEdgeId { id: String, source: IdError },
}

/// Appends `extra` to `list`, skipping blanks and values already present.
fn merge_unique(list: &mut Vec<String>, extra: impl IntoIterator<Item = String>) {
    for value in extra {
        let value = value.trim().to_owned();
        if !value.is_empty() && !list.contains(&value) {
            list.push(value);
        }
    }
}

fn node_id(raw: &str) -> Result<NodeId, FormatError> {
    NodeId::new(raw).map_err(|source| FormatError::InvalidNodeId { id: raw.to_owned(), source })
}

pub fn import_query_graph(trapi: TrapiQueryGraph) -> Result<QueryGraph, FormatError> {
    let mut graph = QueryGraph::new();

    for (raw_id, wire) in trapi.nodes {
        let mut ids = Vec::new();
        merge_unique(&mut ids, wire.ids);
        merge_unique(&mut ids, wire.legacy_id.map(OneOrMany::into_vec).unwrap_or_default());
        let mut categories = Vec::new();
        merge_unique(&mut categories, wire.categories);
        merge_unique(
            &mut categories,
            wire.legacy_category.map(OneOrMany::into_vec).unwrap_or_default(),
        );

        let mut node = QueryGraphNode::new();
        node.set_name(wire.name.filter(|name| !name.trim().is_empty()));
        node.set_ids(ids);
        node.set_categories(categories);
        node.set_is_set(wire.is_set);
        node.set_taxa(wire.taxa);
        graph.insert_node(node_id(&raw_id)?, node);
    }

    for (raw_id, wire) in trapi.edges {
        let edge_id = EdgeId::new(raw_id.as_str())
            .map_err(|source| FormatError::InvalidEdgeId { id: raw_id.clone(), source })?;
        let mut predicates = Vec::new();
        merge_unique(&mut predicates, wire.predicates);
        merge_unique(
            &mut predicates,
            wire.legacy_predicate.map(OneOrMany::into_vec).unwrap_or_default(),
        );

        let mut edge =
            QueryGraphEdge::new_with(node_id(&wire.subject)?, node_id(&wire.object)?, predicates);
        if !wire.qualifier_constraints.is_empty() {
            let sets = wire
                .qualifier_constraints
                .into_iter()
                .map(|set| QualifierSet {
                    qualifier_set: set
                        .qualifier_set
                        .into_iter()
                        .map(|q| Qualifier::new(q.qualifier_type_id, q.qualifier_value))
                        .collect(),
                })
                .collect();
            edge.set_qualifier_constraints(Some(sets));
        }
        graph.insert_edge(edge_id, edge);
    }

    Ok(graph)
}

/// The pruned shape sent to a reasoner: no empty lists and no taxa filter.
pub fn export_query_graph(graph: &QueryGraph) -> TrapiQueryGraph {
    let nodes = graph
        .nodes()
        .iter()
        .map(|(node_id, node)| {
            let wire = TrapiNode {
                name: node.name().filter(|name| !name.trim().is_empty()).map(ToOwned::to_owned),
                ids: node.ids().to_vec(),
                categories: node.categories().to_vec(),
                is_set: node.is_set(),
                taxa: Vec::new(),
                legacy_id: None,
                legacy_category: None,
            };
            (node_id.to_string(), wire)
        })
        .collect();

    let edges = graph
        .edges()
        .iter()
        .map(|(edge_id, edge)| {
            let qualifier_constraints = edge
                .qualifier_constraints()
                .unwrap_or_default()
                .iter()
                .filter(|set| !set.qualifier_set.is_empty())
                .map(|set| TrapiQualifierSet {
                    qualifier_set: set
                        .qualifier_set
                        .iter()
                        .map(|q| TrapiQualifier {
                            qualifier_type_id: q.qualifier_type_id.clone(),
                            qualifier_value: q.qualifier_value.clone(),
                        })
                        .collect(),
                })
                .collect();
            let wire = TrapiEdge {
                subject: edge.subject().to_string(),
                object: edge.object().to_string(),
                predicates: edge.predicates().to_vec(),
                legacy_predicate: None,
                qualifier_constraints,
            };
            (edge_id.to_string(), wire)
        })
        .collect();

    TrapiQueryGraph { nodes, edges }
}

/// Parses a bare query graph, or pulls `message.query_graph` out of a full TRAPI message.
pub fn from_json(source: &str) -> Result<QueryGraph, FormatError> {
    let mut value: serde_json::Value = serde_json::from_str(source)?;
    let embedded = value
        .get_mut("message")
        .and_then(|message| message.get_mut("query_graph"))
        .map(serde_json::Value::take);
    let trapi: TrapiQueryGraph = serde_json::from_value(embedded.unwrap_or(value))?;
    import_query_graph(trapi)
}

pub fn to_json(graph: &QueryGraph) -> Result<String, FormatError> {
    Ok(serde_json::to_string_pretty(&export_query_graph(graph))?)
}

pub fn query_graph_schema() -> schemars::Schema {
    schemars::schema_for!(TrapiQueryGraph)
}

#[cfg(test)]
mod tests {
    use super::{export_query_graph, from_json, query_graph_schema, to_json, FormatError};
    use crate::model::fixtures::{eid, nid, treats_with_parallel_edges};
    use crate::model::{Qualifier, QualifierSet, QueryGraphNode};

    #[test]
    fn export_omits_empty_lists_and_taxa() {
        let mut graph = treats_with_parallel_edges();
        let mut gene = QueryGraphNode::with_categories(["biolink:Gene"]);
        gene.set_taxa(vec!["NCBITaxon:9606".to_owned()]);
        graph.insert_node(nid("n2"), gene);

        let json = serde_json::to_value(export_query_graph(&graph)).expect("serialize");
        assert_eq!(json["nodes"]["n0"]["categories"][0], "biolink:SmallMolecule");
        assert_eq!(json["nodes"]["n0"]["is_set"], true);
        assert!(json["nodes"]["n0"].get("ids").is_none());
        assert!(json["nodes"]["n1"].get("categories").is_none());
        assert!(json["nodes"]["n1"].get("is_set").is_none());
        assert!(json["nodes"]["n2"].get("taxa").is_none());
        assert!(json["edges"]["e0"].get("qualifier_constraints").is_none());
        assert_eq!(json["edges"]["e1"]["subject"], "n1");
    }

    #[test]
    fn import_folds_legacy_singular_fields_into_lists() {
        let graph = from_json(
            r#"{
  "nodes": {
    "a": { "id": "MONDO:0005148", "ids": ["MONDO:0005148", "MONDO:1"] },
    "b": { "category": ["biolink:Gene"], "name": "" }
  },
  "edges": {
    "x": { "subject": "a", "object": "b", "predicate": "biolink:affects" }
  }
}"#,
        )
        .expect("parse");

        let a = graph.node(&nid("a")).expect("node a");
        assert_eq!(a.ids(), ["MONDO:0005148".to_owned(), "MONDO:1".to_owned()]);
        let b = graph.node(&nid("b")).expect("node b");
        assert_eq!(b.categories(), ["biolink:Gene".to_owned()]);
        assert_eq!(b.name(), None);
        let x = graph.edge(&eid("x")).expect("edge x");
        assert_eq!(x.predicates(), ["biolink:affects".to_owned()]);
    }

    #[test]
    fn import_reads_query_graph_out_of_a_message() {
        let graph = from_json(
            r#"{ "message": { "query_graph": {
                "nodes": { "n0": {}, "n1": {} },
                "edges": { "e0": { "subject": "n0", "object": "n1" } }
            } } }"#,
        )
        .expect("parse");
        assert_eq!(graph.nodes().len(), 2);
        assert!(graph.edge(&eid("e0")).expect("edge").predicates().is_empty());
    }

    #[test]
    fn qualifiers_survive_a_round_trip() {
        let mut graph = treats_with_parallel_edges();
        graph
            .edges_mut()
            .get_mut(&eid("e0"))
            .expect("edge")
            .set_qualifier_constraints(Some(vec![QualifierSet {
                qualifier_set: vec![Qualifier::new("biolink:object_aspect_qualifier", "activity")],
            }]));

        let json = to_json(&graph).expect("to json");
        let back = from_json(&json).expect("from json");
        assert_eq!(back, graph);
    }

    #[test]
    fn invalid_ids_are_reported_with_context() {
        let err = from_json(r#"{ "nodes": { "": {} } }"#).unwrap_err();
        match err {
            FormatError::InvalidNodeId { id, .. } => assert_eq!(id, ""),
            other => panic!("expected InvalidNodeId, got: {other:?}"),
        }
        assert!(matches!(from_json("not json"), Err(FormatError::Json(_))));
    }

    #[test]
    fn schema_describes_nodes_and_edges() {
        let schema = serde_json::to_value(query_graph_schema()).expect("schema json");
        assert!(schema["properties"]["nodes"].is_object());
        assert!(schema["properties"]["edges"].is_object());
    }
}
