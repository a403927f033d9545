// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of qgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over editor state.
//!
//! Queries provide derived views (e.g. the sentence-style row sequence) that power the
//! presentation layer. They never mutate the graph.

pub mod rows;

pub use rows::{linearize, linearize_graph, Row};
