// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of qgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Query-graph data model and the invariants every committed graph satisfies.
//!
//! A query graph holds typed nodes and edges keyed by stable ids; `maintain` keeps it rooted and
//! fully reachable from that root.

pub mod edge;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod graph;
pub mod ids;
pub mod maintain;
pub mod node;

pub use edge::{Endpoint, Qualifier, QualifierSet, QueryGraphEdge, RELATED_TO};
pub use graph::QueryGraph;
pub use ids::{EdgeId, Id, IdError, IdKind, NodeId};
pub use maintain::{
    compute_root, next_edge_id, next_id, next_node_id, prune_unreachable, reachable_from,
};
pub use node::{QueryGraphNode, FALLBACK_NODE_NAME};
