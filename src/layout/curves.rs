// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of qgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Parallel-edge fan-out and per-edge quadratic curves.
//!
//! Edges sharing an unordered node pair form a group. Each edge gets a signed index from a
//! symmetric sequence; the curve geometry is re-derived from (source, target, index, radius)
//! on every tick, so no per-edge curve state survives between frames.

use std::collections::HashMap;
use std::f64::consts::{FRAC_PI_2, PI};

use indexmap::IndexMap;
use serde::Serialize;

use super::geometry::Point;
use crate::model::{EdgeId, NodeId, QueryGraph, QueryGraphEdge};

/// Where one edge sits inside its parallel group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParallelEdgeIndex {
    /// Signed fan-out slot; `0` is the straight edge of a group of one.
    pub index: i32,
    /// Number of edges in the group.
    pub count: usize,
    /// Position of the edge inside the group, in edge-map order.
    pub slot: usize,
    /// Whether this edge's own `subject -> object` runs against the canonical pair order.
    pub against_canonical: bool,
}

impl ParallelEdgeIndex {
    /// The index as seen from this edge's own source, used to pick the bending side.
    pub fn oriented_index(&self) -> i32 {
        if self.against_canonical {
            -self.index
        } else {
            self.index
        }
    }
}

/// Order-independent key for an unordered node pair, plus the orientation flag.
fn canonical_pair<'a>(edge: &'a QueryGraphEdge) -> ((&'a NodeId, &'a NodeId), bool) {
    let (subject, object) = (edge.subject(), edge.object());
    if subject <= object {
        ((subject, object), false)
    } else {
        ((object, subject), true)
    }
}

/// Symmetric slot sequence for a group of `count` edges.
///
/// `0, 1, -1, 2, -2, ...`; for an even count the leading zero moves to the outermost
/// negative slot, so `2 -> [-1, 1]` and `4 -> [-2, 1, -1, 2]`.
pub fn fan_out(count: usize) -> Vec<i32> {
    let mut slots: Vec<i32> = (0..count)
        .map(|k| {
            let step = ((k + 1) / 2) as i32;
            if k % 2 == 1 {
                step
            } else {
                -step
            }
        })
        .collect();
    if count > 1 && count % 2 == 0 {
        slots[0] = -((count / 2) as i32);
    }
    slots
}

struct Group<'a> {
    first_seen_reversed: bool,
    edges: Vec<(&'a EdgeId, bool)>,
}

/// Curve indices for every edge, keyed in edge-map order.
pub fn assign_curve_indices(graph: &QueryGraph) -> IndexMap<EdgeId, ParallelEdgeIndex> {
    let mut groups: IndexMap<(&NodeId, &NodeId), Group<'_>> = IndexMap::new();
    for (edge_id, edge) in graph.edges() {
        let (key, reversed) = canonical_pair(edge);
        groups
            .entry(key)
            .or_insert_with(|| Group { first_seen_reversed: reversed, edges: Vec::new() })
            .edges
            .push((edge_id, reversed));
    }

    let mut by_edge: HashMap<&EdgeId, ParallelEdgeIndex> = HashMap::new();
    for group in groups.values() {
        let count = group.edges.len();
        let flip = if group.first_seen_reversed { -1 } else { 1 };
        for (slot, (&(edge_id, reversed), index)) in
            group.edges.iter().zip(fan_out(count)).enumerate()
        {
            by_edge.insert(
                edge_id,
                ParallelEdgeIndex { index: index * flip, count, slot, against_canonical: reversed },
            );
        }
    }

    // Grouping visits edges group by group; hand them back in edge-map order.
    graph
        .edges()
        .keys()
        .filter_map(|edge_id| by_edge.remove(edge_id).map(|placement| (edge_id.clone(), placement)))
        .collect()
}

/// Tunables for the curve geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveStyle {
    /// Radians the endpoints rotate around their node per index step.
    pub arc_step: f64,
    /// Pixels the control point moves off the centerline per index step.
    pub spacing: f64,
    /// Extra factor for `|index| == 1`, keeps the first pair clear of the centerline.
    pub first_offset_boost: f64,
}

impl Default for CurveStyle {
    fn default() -> Self {
        Self { arc_step: 0.2, spacing: 30.0, first_offset_boost: 1.25 }
    }
}

/// A render-ready quadratic curve: `start`, one control point, `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeCurve {
    pub start: Point,
    pub control: Point,
    pub end: Point,
}

impl EdgeCurve {
    pub fn point_at(&self, t: f64) -> Point {
        let u = 1.0 - t;
        Point::new(
            u * u * self.start.x + 2.0 * u * t * self.control.x + t * t * self.end.x,
            u * u * self.start.y + 2.0 * u * t * self.control.y + t * t * self.end.y,
        )
    }

    /// Where the predicate label sits.
    pub fn label_anchor(&self) -> Point {
        self.point_at(0.5)
    }

    pub fn to_svg_path(&self) -> String {
        svg_quadratic(self.start, self.control, self.end)
    }

    /// Same curve, drawn left to right so text placed along it is never upside down.
    pub fn label_path(&self) -> String {
        if self.start.x > self.end.x {
            svg_quadratic(self.end, self.control, self.start)
        } else {
            self.to_svg_path()
        }
    }
}

fn svg_quadratic(start: Point, control: Point, end: Point) -> String {
    format!(
        "M {:.2} {:.2} Q {:.2} {:.2} {:.2} {:.2}",
        start.x, start.y, control.x, control.y, end.x, end.y
    )
}

/// Curve between two node centers for an edge at `placement` in its group.
pub fn compute_curve(
    source: Point,
    target: Point,
    placement: ParallelEdgeIndex,
    radius: f64,
    style: &CurveStyle,
) -> EdgeCurve {
    let index = placement.oriented_index();
    let angle = source.angle_to(target);
    let arc = f64::from(index) * style.arc_step;

    let start = source.polar(angle + arc, radius);
    let end = target.polar(angle + PI - arc, radius);
    if index == 0 || placement.count <= 1 {
        return EdgeCurve { start, control: start.midpoint(end), end };
    }

    let magnitude = match index.unsigned_abs() {
        1 => style.spacing * style.first_offset_boost,
        step => f64::from(step) * style.spacing,
    };
    let offset = magnitude * f64::from(index.signum());
    let control = start.midpoint(end) + (target - source).unit_normal() * offset;
    EdgeCurve { start, control, end }
}

/// A loop drawn above its node; later loops in the same group grow taller.
pub fn compute_self_loop(
    center: Point,
    placement: ParallelEdgeIndex,
    radius: f64,
    style: &CurveStyle,
) -> EdgeCurve {
    let up = -FRAC_PI_2;
    let spread = 0.5 + style.arc_step;
    let start = center.polar(up - spread, radius);
    let end = center.polar(up + spread, radius);
    let height = radius * 2.5 + placement.slot as f64 * style.spacing;
    EdgeCurve { start, control: center.polar(up, height), end }
}

/// Dispatches between a self-loop and a regular curve.
pub fn curve_for_edge(
    edge: &QueryGraphEdge,
    source: Point,
    target: Point,
    placement: ParallelEdgeIndex,
    radius: f64,
    style: &CurveStyle,
) -> EdgeCurve {
    if edge.is_self_loop() {
        compute_self_loop(source, placement, radius, style)
    } else {
        compute_curve(source, target, placement, radius, style)
    }
}
