// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of qgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Exchange format and text helpers.
//!
//! `trapi` is the serialization boundary of the editor; `text` holds the pure formatting used
//! for labels and qualifier encoding.

pub mod text;
pub mod trapi;

pub use trapi::{
    export_query_graph, from_json, import_query_graph, query_graph_schema, to_json, FormatError,
    TrapiEdge, TrapiNode, TrapiQueryGraph,
};
