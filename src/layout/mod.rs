// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of qgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Live layout for query graphs.
//!
//! This module owns node positions (force simulation) and derives edge curves for parallel
//! edge groups. It is kept outside the reducer: graph edits arrive via `LayoutStore::sync`.

pub mod curves;
pub mod geometry;
pub mod simulation;
pub mod store;

use serde::{Deserialize, Serialize};

pub use curves::{
    assign_curve_indices, compute_curve, compute_self_loop, fan_out, CurveStyle, EdgeCurve,
    ParallelEdgeIndex,
};
pub use geometry::{Bounds, Point, Vector};
pub use simulation::{Forces, SimLink, SimNode, Simulation};
pub use store::LayoutStore;

/// Which view the layout drives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    /// The editable builder canvas.
    #[default]
    QueryBuilder,
    /// Read-only result explorer; nodes keep twice the distance.
    Explorer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub width: f64,
    pub height: f64,
    pub node_radius: f64,
    pub mode: LayoutMode,
    pub link_distance: f64,
    pub velocity_decay: f64,
    pub alpha_min: f64,
    pub center_strength: f64,
    pub collide_strength: f64,
    pub arc_step: f64,
    pub curve_spacing: f64,
    pub first_offset_boost: f64,
    pub seed: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let curve = CurveStyle::default();
        Self {
            width: 400.0,
            height: 400.0,
            node_radius: 40.0,
            mode: LayoutMode::QueryBuilder,
            link_distance: 200.0,
            velocity_decay: 0.4,
            alpha_min: 0.001,
            center_strength: 1.0,
            collide_strength: 1.0,
            arc_step: curve.arc_step,
            curve_spacing: curve.spacing,
            first_offset_boost: curve.first_offset_boost,
            seed: 0x5eed,
        }
    }
}

impl LayoutConfig {
    pub fn bounds(&self) -> Bounds {
        Bounds { width: self.width, height: self.height }
    }

    pub fn collide_radius(&self) -> f64 {
        match self.mode {
            LayoutMode::QueryBuilder => self.node_radius,
            LayoutMode::Explorer => self.node_radius * 2.0,
        }
    }

    pub fn forces(&self) -> Forces {
        Forces {
            center: self.bounds().center(),
            center_strength: self.center_strength,
            link_distance: self.link_distance,
            collide_radius: self.collide_radius(),
            collide_strength: self.collide_strength,
            velocity_decay: self.velocity_decay,
            alpha_min: self.alpha_min,
        }
    }

    pub fn curve_style(&self) -> CurveStyle {
        CurveStyle {
            arc_step: self.arc_step,
            spacing: self.curve_spacing,
            first_offset_boost: self.first_offset_boost,
        }
    }
}
