// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of qgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::NodeId;

/// The universal relationship; an edge without predicates means this.
pub const RELATED_TO: &str = "biolink:related_to";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Qualifier {
    pub qualifier_type_id: String,
    pub qualifier_value: String,
}

impl Qualifier {
    pub fn new(qualifier_type_id: impl Into<String>, qualifier_value: impl Into<String>) -> Self {
        Self {
            qualifier_type_id: qualifier_type_id.into(),
            qualifier_value: qualifier_value.into(),
        }
    }
}

/// One conjunctive group of qualifiers. The core never looks inside.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QualifierSet {
    pub qualifier_set: Vec<Qualifier>,
}

/// Which end of an edge a command or gesture addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Subject,
    Object,
}

impl Endpoint {
    pub fn opposite(self) -> Self {
        match self {
            Self::Subject => Self::Object,
            Self::Object => Self::Subject,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Subject => "subject",
            Self::Object => "object",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryGraphEdge {
    subject: NodeId,
    object: NodeId,
    predicates: Vec<String>,
    qualifier_constraints: Option<Vec<QualifierSet>>,
}

impl QueryGraphEdge {
    /// A "related to" edge, the shape every newly drawn edge starts with.
    pub fn new(subject: NodeId, object: NodeId) -> Self {
        Self {
            subject,
            object,
            predicates: vec![RELATED_TO.to_owned()],
            qualifier_constraints: None,
        }
    }

    pub fn new_with(subject: NodeId, object: NodeId, predicates: Vec<String>) -> Self {
        Self {
            subject,
            object,
            predicates,
            qualifier_constraints: None,
        }
    }

    pub fn subject(&self) -> &NodeId {
        &self.subject
    }

    pub fn object(&self) -> &NodeId {
        &self.object
    }

    pub fn endpoint(&self, endpoint: Endpoint) -> &NodeId {
        match endpoint {
            Endpoint::Subject => &self.subject,
            Endpoint::Object => &self.object,
        }
    }

    pub fn set_endpoint(&mut self, endpoint: Endpoint, node_id: NodeId) {
        match endpoint {
            Endpoint::Subject => self.subject = node_id,
            Endpoint::Object => self.object = node_id,
        }
    }

    pub fn touches(&self, node_id: &NodeId) -> bool {
        &self.subject == node_id || &self.object == node_id
    }

    pub fn is_self_loop(&self) -> bool {
        self.subject == self.object
    }

    pub fn predicates(&self) -> &[String] {
        &self.predicates
    }

    pub fn set_predicates(&mut self, predicates: Vec<String>) {
        self.predicates = predicates;
    }

    /// Predicates as shown to a reader: an empty list means "related to".
    pub fn effective_predicates(&self) -> Vec<&str> {
        if self.predicates.is_empty() {
            return vec![RELATED_TO];
        }
        self.predicates.iter().map(String::as_str).collect()
    }

    pub fn qualifier_constraints(&self) -> Option<&[QualifierSet]> {
        self.qualifier_constraints.as_deref()
    }

    pub fn set_qualifier_constraints(&mut self, constraints: Option<Vec<QualifierSet>>) {
        self.qualifier_constraints = constraints;
    }

    /// Drives the qualifier badge in the presentation layer.
    pub fn has_qualifiers(&self) -> bool {
        self.qualifier_constraints
            .as_deref()
            .is_some_and(|sets| sets.iter().any(|set| !set.qualifier_set.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::{Endpoint, Qualifier, QualifierSet, QueryGraphEdge, RELATED_TO};
    use crate::model::NodeId;

    fn nid(value: &str) -> NodeId {
        NodeId::new(value).expect("node id")
    }

    #[test]
    fn new_edge_defaults_to_related_to() {
        let edge = QueryGraphEdge::new(nid("n0"), nid("n1"));
        assert_eq!(edge.predicates(), [RELATED_TO.to_owned()]);
        assert!(!edge.has_qualifiers());
    }

    #[test]
    fn endpoints_can_be_addressed_symmetrically() {
        let mut edge = QueryGraphEdge::new(nid("n0"), nid("n1"));
        edge.set_endpoint(Endpoint::Object, nid("n2"));
        assert_eq!(edge.endpoint(Endpoint::Subject), &nid("n0"));
        assert_eq!(edge.endpoint(Endpoint::Subject.opposite()), &nid("n2"));
        assert!(edge.touches(&nid("n2")));
        assert!(!edge.touches(&nid("n1")));
    }

    #[test]
    fn empty_predicates_read_as_related_to() {
        let edge = QueryGraphEdge::new_with(nid("n0"), nid("n1"), Vec::new());
        assert_eq!(edge.effective_predicates(), vec![RELATED_TO]);
    }

    #[test]
    fn empty_qualifier_sets_do_not_raise_the_badge() {
        let mut edge = QueryGraphEdge::new(nid("n0"), nid("n1"));
        edge.set_qualifier_constraints(Some(vec![QualifierSet::default()]));
        assert!(!edge.has_qualifiers());

        edge.set_qualifier_constraints(Some(vec![QualifierSet {
            qualifier_set: vec![Qualifier::new("biolink:object_aspect_qualifier", "activity")],
        }]));
        assert!(edge.has_qualifiers());
    }
}
