// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of qgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! qgraph: the editing core of a visual query-graph builder.
//!
//! A query graph is a small directed multigraph of nodes (entity constraints) and edges
//! (predicates). `ops::apply` edits it while keeping a single root from which everything is
//! reachable; `query` turns it into sentence rows; `layout` places it on a canvas with a force
//! simulation and curves parallel edges apart; `interaction` turns clicks and drags into edit
//! commands. `session::QueryBuilder` ties them together.

pub mod config;
pub mod format;
pub mod interaction;
pub mod layout;
pub mod model;
pub mod ontology;
pub mod ops;
pub mod query;
pub mod render;
pub mod session;
pub mod ui;

pub use config::{ConfigError, EditorConfig};
pub use session::QueryBuilder;
