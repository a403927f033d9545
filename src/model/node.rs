// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of qgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::format::text::pretty_category;

pub const FALLBACK_NODE_NAME: &str = "Something";

/// A query-graph node: a concrete entity (one or more curies), a category wildcard, or both.
///
/// Runtime layout (positions, pins) lives in the layout store, not here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryGraphNode {
    name: Option<String>,
    ids: Vec<String>,
    categories: Vec<String>,
    is_set: bool,
    taxa: Vec<String>,
}

impl QueryGraphNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name<T: Into<String>>(&mut self, name: Option<T>) {
        self.name = name.map(Into::into);
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn set_ids(&mut self, ids: Vec<String>) {
        self.ids = ids;
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn set_categories(&mut self, categories: Vec<String>) {
        self.categories = categories;
    }

    pub fn is_set(&self) -> bool {
        self.is_set
    }

    pub fn set_is_set(&mut self, is_set: bool) {
        self.is_set = is_set;
    }

    pub fn taxa(&self) -> &[String] {
        &self.taxa
    }

    pub fn set_taxa(&mut self, taxa: Vec<String>) {
        self.taxa = taxa;
    }

    /// A node with no identifiers matches anything of its categories.
    pub fn is_category_only(&self) -> bool {
        self.ids.is_empty()
    }

    /// Neither identifiers nor categories: matches any entity at all.
    pub fn is_unconstrained(&self) -> bool {
        self.ids.is_empty() && self.categories.is_empty()
    }

    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|name| !name.trim().is_empty()) {
            return name.to_owned();
        }
        if !self.ids.is_empty() {
            return self.ids.join(", ");
        }
        if let Some(category) = self.categories.first() {
            return pretty_category(category);
        }
        FALLBACK_NODE_NAME.to_owned()
    }
}
