// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of qgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Ontology and autocomplete collaborators.
//!
//! The editing core only consumes these through the `Ontology` and `SuggestionSource`
//! traits. The static implementations are in-memory tables, good enough for the CLI and tests.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::format::text::{is_curie, pretty_category};
use crate::model::QueryGraphNode;

pub const FALLBACK_COLOR: &str = "#ffffff";

pub trait Ontology {
    /// The first category with a known color, and that color (or the fallback).
    fn color_map(&self, categories: &[String]) -> (Option<String>, String);

    /// Ancestors, the category itself and its descendants, most general first.
    fn hierarchy(&self, category: &str) -> Option<&[String]>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticOntology {
    palette: IndexMap<String, String>,
    hierarchies: IndexMap<String, Vec<String>>,
}

impl StaticOntology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, category: impl Into<String>, color: impl Into<String>) -> Self {
        self.palette.insert(category.into(), color.into());
        self
    }

    pub fn with_hierarchy<I, S>(mut self, category: impl Into<String>, lineage: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hierarchies.insert(category.into(), lineage.into_iter().map(Into::into).collect());
        self
    }

    /// A small slice of the Biolink model, used by the demo graph.
    pub fn biolink() -> Self {
        let named_thing = "biolink:NamedThing";
        Self::new()
            .with_color("biolink:Disease", "#f4a582")
            .with_color("biolink:PhenotypicFeature", "#fddbc7")
            .with_color("biolink:DiseaseOrPhenotypicFeature", "#f7f7f7")
            .with_color("biolink:Gene", "#92c5de")
            .with_color("biolink:Protein", "#4393c3")
            .with_color("biolink:SmallMolecule", "#b8e186")
            .with_color("biolink:ChemicalEntity", "#d9f0d3")
            .with_hierarchy(
                "biolink:Disease",
                [named_thing, "biolink:DiseaseOrPhenotypicFeature", "biolink:Disease"],
            )
            .with_hierarchy(
                "biolink:DiseaseOrPhenotypicFeature",
                [
                    named_thing,
                    "biolink:DiseaseOrPhenotypicFeature",
                    "biolink:Disease",
                    "biolink:PhenotypicFeature",
                ],
            )
            .with_hierarchy("biolink:Gene", [named_thing, "biolink:Gene"])
            .with_hierarchy("biolink:Protein", [named_thing, "biolink:Protein"])
            .with_hierarchy(
                "biolink:SmallMolecule",
                [named_thing, "biolink:ChemicalEntity", "biolink:SmallMolecule"],
            )
            .with_hierarchy(
                "biolink:ChemicalEntity",
                [named_thing, "biolink:ChemicalEntity", "biolink:SmallMolecule"],
            )
    }
}

impl Ontology for StaticOntology {
    fn color_map(&self, categories: &[String]) -> (Option<String>, String) {
        categories
            .iter()
            .find_map(|category| {
                let color = self.palette.get(category)?;
                Some((Some(category.clone()), color.clone()))
            })
            .unwrap_or_else(|| (None, FALLBACK_COLOR.to_owned()))
    }

    fn hierarchy(&self, category: &str) -> Option<&[String]> {
        self.hierarchies.get(category).map(Vec::as_slice)
    }
}

/// How many ancestors `category` has; unknown categories count as most general.
fn depth(ontology: &dyn Ontology, category: &str) -> usize {
    ontology
        .hierarchy(category)
        .and_then(|lineage| lineage.iter().position(|entry| entry == category))
        .unwrap_or(0)
}

/// Most specific category first; ties keep input order.
pub fn rank_by_specificity(categories: &[String], ontology: &dyn Ontology) -> Vec<String> {
    let mut ranked: Vec<(usize, &String)> =
        categories.iter().map(|category| (depth(ontology, category), category)).collect();
    ranked.sort_by(|(depth_a, _), (depth_b, _)| depth_b.cmp(depth_a));
    ranked.into_iter().map(|(_, category)| category.clone()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    Curie,
    Category,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    /// The curie or category written into the node.
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
}

impl Suggestion {
    pub fn curie<I, S>(curie: impl Into<String>, label: impl Into<String>, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: SuggestionKind::Curie,
            value: curie.into(),
            label: label.into(),
            categories: categories.into_iter().map(Into::into).collect(),
        }
    }

    pub fn category(category: impl Into<String>) -> Self {
        let value = category.into();
        Self {
            kind: SuggestionKind::Category,
            label: pretty_category(&value),
            value,
            categories: Vec::new(),
        }
    }

    /// Writes this choice into `node`, replacing its identity fields. `is_set` is kept.
    pub fn apply_to(&self, node: &mut QueryGraphNode) {
        match self.kind {
            SuggestionKind::Curie => {
                node.set_ids(vec![self.value.clone()]);
                node.set_name(Some(self.label.clone()));
                node.set_categories(self.categories.clone());
            }
            SuggestionKind::Category => {
                node.set_ids(Vec::new());
                node.set_name(None::<String>);
                node.set_categories(vec![self.value.clone()]);
            }
        }
    }
}

pub trait SuggestionSource {
    fn suggest(&self, input: &str, limit: usize) -> Vec<Suggestion>;
}

/// Below this similarity a misspelled fragment suggests nothing.
const FUZZY_CUTOFF: f64 = 0.6;

/// How a typed fragment hit a candidate. Later variants rank higher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Hit {
    /// Similarity in thousandths, only used when nothing matched literally.
    Fuzzy(u16),
    Contains,
    WordStart,
    Prefix,
    Exact,
}

impl Hit {
    fn is_literal(self) -> bool {
        !matches!(self, Self::Fuzzy(_))
    }
}

#[derive(Debug, Clone)]
struct Candidate {
    suggestion: Suggestion,
    label: String,
    value: String,
}

impl Candidate {
    fn new(suggestion: Suggestion) -> Self {
        let label = suggestion.label.to_lowercase();
        let value = suggestion.value.to_lowercase();
        Self { suggestion, label, value }
    }

    /// The part after the curie prefix: `0005148` for `mondo:0005148`.
    fn local(&self) -> &str {
        self.value.split_once(':').map_or(self.value.as_str(), |(_, local)| local)
    }

    fn hit(&self, needle: &str) -> Option<Hit> {
        let (label, value, local) = (self.label.as_str(), self.value.as_str(), self.local());
        if label == needle || value == needle || local == needle {
            return Some(Hit::Exact);
        }
        if label.starts_with(needle) || local.starts_with(needle) {
            return Some(Hit::Prefix);
        }
        if label.split(is_word_break).any(|word| word.starts_with(needle)) {
            return Some(Hit::WordStart);
        }
        if label.contains(needle) || value.contains(needle) {
            return Some(Hit::Contains);
        }

        let similarity = [label, local]
            .into_iter()
            .map(|text| rapidfuzz::fuzz::ratio(needle.chars(), text.chars()))
            .fold(0.0_f64, f64::max);
        (similarity >= FUZZY_CUTOFF).then(|| Hit::Fuzzy((similarity * 1000.0).round() as u16))
    }
}

fn is_word_break(ch: char) -> bool {
    matches!(ch, ' ' | '-' | '_' | ',' | '(' | ')')
}

/// Ranks a fixed candidate list: literal hits first, fuzzy hits only if nothing hit literally.
#[derive(Debug, Clone, Default)]
pub struct StaticSuggestions {
    candidates: Vec<Candidate>,
}

impl StaticSuggestions {
    pub fn new(suggestions: impl IntoIterator<Item = Suggestion>) -> Self {
        Self { candidates: suggestions.into_iter().map(Candidate::new).collect() }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl SuggestionSource for StaticSuggestions {
    fn suggest(&self, input: &str, limit: usize) -> Vec<Suggestion> {
        let needle = input.trim().to_lowercase();
        if needle.is_empty() || limit == 0 {
            return Vec::new();
        }

        // A pasted curie only ever matches itself.
        if is_curie(&needle) {
            let exact = self.candidates.iter().find(|candidate| candidate.value == needle);
            if let Some(candidate) = exact {
                return vec![candidate.suggestion.clone()];
            }
        }

        let mut hits: Vec<(Hit, &Candidate)> = self
            .candidates
            .iter()
            .filter_map(|candidate| Some((candidate.hit(&needle)?, candidate)))
            .collect();
        if hits.iter().any(|(hit, _)| hit.is_literal()) {
            hits.retain(|(hit, _)| hit.is_literal());
        }
        hits.sort_by(|(hit_a, a), (hit_b, b)| {
            hit_b
                .cmp(hit_a)
                .then_with(|| a.label.len().cmp(&b.label.len()))
                .then_with(|| a.label.cmp(&b.label))
        });
        hits.into_iter().take(limit).map(|(_, candidate)| candidate.suggestion.clone()).collect()
    }
}
