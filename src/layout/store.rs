// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of qgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use super::curves::{
    assign_curve_indices, compute_curve, compute_self_loop, EdgeCurve, ParallelEdgeIndex,
};
use super::geometry::Point;
use super::simulation::{SimNode, Simulation};
use super::LayoutConfig;
use crate::model::{EdgeId, Endpoint, NodeId, QueryGraph};

pub const DEFAULT_RESIZE_DEBOUNCE: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, PartialEq)]
struct LayoutEdge {
    subject: NodeId,
    object: NodeId,
    placement: ParallelEdgeIndex,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingResize {
    width: f64,
    height: f64,
    due: Instant,
}

/// Owns live node positions and the curves derived from them.
///
/// The reducer never sees this; the session calls `sync` after every graph change and
/// `tick` once per frame. Gestures mutate positions directly (pin, unpin, stop, restart).
#[derive(Debug, Clone)]
pub struct LayoutStore {
    config: LayoutConfig,
    simulation: Simulation,
    slots: HashMap<NodeId, usize>,
    edges: IndexMap<EdgeId, LayoutEdge>,
    curves: IndexMap<EdgeId, EdgeCurve>,
    rng: StdRng,
    running: bool,
    resize_debounce: Duration,
    pending_resize: Option<PendingResize>,
}

impl LayoutStore {
    pub fn new(config: LayoutConfig) -> Self {
        let simulation = Simulation::new(config.forces(), config.seed);
        let rng = StdRng::seed_from_u64(config.seed.wrapping_add(1));
        Self {
            config,
            simulation,
            slots: HashMap::new(),
            edges: IndexMap::new(),
            curves: IndexMap::new(),
            rng,
            running: false,
            resize_debounce: DEFAULT_RESIZE_DEBOUNCE,
            pending_resize: None,
        }
    }

    pub fn with_resize_debounce(mut self, debounce: Duration) -> Self {
        self.resize_debounce = debounce;
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn alpha(&self) -> f64 {
        self.simulation.alpha()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn nodes(&self) -> &[SimNode] {
        self.simulation.nodes()
    }

    pub fn node(&self, node_id: &NodeId) -> Option<&SimNode> {
        let slot = *self.slots.get(node_id)?;
        self.simulation.nodes().get(slot)
    }

    fn node_mut(&mut self, node_id: &NodeId) -> Option<&mut SimNode> {
        let slot = *self.slots.get(node_id)?;
        self.simulation.nodes_mut().get_mut(slot)
    }

    pub fn position(&self, node_id: &NodeId) -> Option<Point> {
        self.node(node_id).map(SimNode::position)
    }

    pub fn curves(&self) -> &IndexMap<EdgeId, EdgeCurve> {
        &self.curves
    }

    pub fn curve(&self, edge_id: &EdgeId) -> Option<&EdgeCurve> {
        self.curves.get(edge_id)
    }

    pub fn placement(&self, edge_id: &EdgeId) -> Option<ParallelEdgeIndex> {
        self.edges.get(edge_id).map(|edge| edge.placement)
    }

    /// Whether the tracked nodes and the edge order, endpoints included, still match `graph`.
    ///
    /// Curve placements depend on edge-map order, so a reordered graph is out of sync.
    pub fn is_synced_with(&self, graph: &QueryGraph) -> bool {
        self.slots.len() == graph.nodes().len()
            && graph.nodes().keys().all(|node_id| self.slots.contains_key(node_id))
            && self.edges.len() == graph.edges().len()
            && self.edges.iter().zip(graph.edges()).all(|((tracked_id, tracked), (edge_id, edge))| {
                tracked_id == edge_id
                    && &tracked.subject == edge.subject()
                    && &tracked.object == edge.object()
            })
    }

    /// Rebuilds the node/edge lists from `graph`, keeping positions of surviving nodes.
    pub fn sync(&mut self, graph: &QueryGraph) {
        let mut previous: HashMap<NodeId, SimNode> = self
            .simulation
            .nodes()
            .iter()
            .map(|node| (node.id.clone(), node.clone()))
            .collect();

        let mut placed = 0usize;
        let nodes: Vec<SimNode> = graph
            .nodes()
            .keys()
            .map(|node_id| match previous.remove(node_id) {
                Some(node) => node,
                None => {
                    placed += 1;
                    let at = self.random_position();
                    SimNode::at(node_id.clone(), at)
                }
            })
            .collect();

        self.slots = nodes.iter().enumerate().map(|(slot, node)| (node.id.clone(), slot)).collect();

        let placements = assign_curve_indices(graph);
        self.edges = graph
            .edges()
            .iter()
            .filter(|(_, edge)| {
                self.slots.contains_key(edge.subject()) && self.slots.contains_key(edge.object())
            })
            .filter_map(|(edge_id, edge)| {
                let placement = *placements.get(edge_id)?;
                let layout_edge = LayoutEdge {
                    subject: edge.subject().clone(),
                    object: edge.object().clone(),
                    placement,
                };
                Some((edge_id.clone(), layout_edge))
            })
            .collect();

        let pairs: Vec<(usize, usize)> = self
            .edges
            .values()
            .filter_map(|edge| Some((*self.slots.get(&edge.subject)?, *self.slots.get(&edge.object)?)))
            .collect();

        self.simulation.set_graph(nodes, &pairs);
        self.simulation.set_alpha(1.0);
        self.running = true;
        self.clamp_positions();
        self.recompute_curves();

        debug!(
            nodes = self.slots.len(),
            edges = self.edges.len(),
            kept = self.slots.len() - placed,
            placed,
            "synced layout"
        );
    }

    fn random_position(&mut self) -> Point {
        let radius = self.config.node_radius;
        let bounds = self.config.bounds();
        let mut axis = |size: f64| {
            if size - radius > radius {
                self.rng.gen_range(radius..size - radius)
            } else {
                size / 2.0
            }
        };
        let x = axis(bounds.width);
        let y = axis(bounds.height);
        Point::new(x, y)
    }

    /// One simulation step followed by clamping and curve recomputation.
    ///
    /// Returns `false` when the simulation is stopped.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.simulation.tick();
        self.clamp_positions();
        self.recompute_curves();
        trace!(alpha = self.simulation.alpha(), "layout tick");

        if self.simulation.is_settled() && self.simulation.alpha_target() < self.config.alpha_min {
            self.running = false;
        }
        true
    }

    /// Ticks until cold or `max_ticks` is reached; returns the number of ticks run.
    pub fn settle(&mut self, max_ticks: usize) -> usize {
        let mut ticks = 0;
        while ticks < max_ticks && self.tick() {
            ticks += 1;
        }
        debug!(ticks, alpha = self.simulation.alpha(), settled = !self.running, "settled layout");
        ticks
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn restart(&mut self) {
        self.running = true;
    }

    pub fn set_alpha_target(&mut self, alpha_target: f64) {
        self.simulation.set_alpha_target(alpha_target);
    }

    /// Fixes a node at `at` until `unpin`. Returns `false` for unknown nodes.
    pub fn pin(&mut self, node_id: &NodeId, at: Point) -> bool {
        match self.node_mut(node_id) {
            Some(node) => {
                node.pin(at);
                true
            }
            None => false,
        }
    }

    pub fn unpin(&mut self, node_id: &NodeId) -> bool {
        match self.node_mut(node_id) {
            Some(node) => {
                node.unpin();
                true
            }
            None => false,
        }
    }

    /// Topmost node whose circle contains `point`.
    pub fn hit_test(&self, point: Point) -> Option<&NodeId> {
        let radius = self.config.node_radius;
        self.simulation
            .nodes()
            .iter()
            .rev()
            .find(|node| node.position().distance(point) <= radius)
            .map(|node| &node.id)
    }

    /// The curve of `edge_id` with `endpoint` following `pointer` and the other end anchored.
    pub fn preview_endpoint(
        &self,
        edge_id: &EdgeId,
        endpoint: Endpoint,
        pointer: Point,
    ) -> Option<EdgeCurve> {
        let edge = self.edges.get(edge_id)?;
        let (mut source, mut target) = (self.position(&edge.subject)?, self.position(&edge.object)?);
        match endpoint {
            Endpoint::Subject => source = pointer,
            Endpoint::Object => target = pointer,
        }
        let mut curve = compute_curve(
            source,
            target,
            edge.placement,
            self.config.node_radius,
            &self.config.curve_style(),
        );
        match endpoint {
            Endpoint::Subject => curve.start = pointer,
            Endpoint::Object => curve.end = pointer,
        }
        Some(curve)
    }

    /// Records a container resize; applied by `poll` once no newer request arrived for a while.
    pub fn request_resize(&mut self, width: f64, height: f64, now: Instant) {
        self.pending_resize = Some(PendingResize { width, height, due: now + self.resize_debounce });
    }

    /// Applies a due resize. Returns `true` when the canvas changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending_resize {
            Some(pending) if pending.due <= now => {
                self.pending_resize = None;
                self.config.width = pending.width;
                self.config.height = pending.height;
                self.simulation.set_center(self.config.bounds().center());
                self.simulation.set_alpha(1.0);
                self.running = true;
                self.clamp_positions();
                self.recompute_curves();
                debug!(width = pending.width, height = pending.height, "resized layout");
                true
            }
            _ => false,
        }
    }

    // Pinned nodes may overflow by half a radius while dragged.
    fn clamp_positions(&mut self) {
        let bounds = self.config.bounds();
        let radius = self.config.node_radius;
        for node in self.simulation.nodes_mut() {
            let margin = if node.is_pinned() { radius / 2.0 } else { radius };
            let clamped = bounds.clamp(node.position(), margin);
            node.x = clamped.x;
            node.y = clamped.y;
        }
    }

    fn recompute_curves(&mut self) {
        let radius = self.config.node_radius;
        let style = self.config.curve_style();
        let nodes = self.simulation.nodes();
        let slots = &self.slots;
        let position = |node_id: &NodeId| slots.get(node_id).map(|&slot| nodes[slot].position());

        self.curves = self
            .edges
            .iter()
            .filter_map(|(edge_id, edge)| {
                let source = position(&edge.subject)?;
                let curve = if edge.subject == edge.object {
                    compute_self_loop(source, edge.placement, radius, &style)
                } else {
                    compute_curve(source, position(&edge.object)?, edge.placement, radius, &style)
                };
                Some((edge_id.clone(), curve))
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use rstest::{fixture, rstest};

    use super::LayoutStore;
    use crate::layout::geometry::Point;
    use crate::layout::LayoutConfig;
    use crate::model::fixtures::{default_graph, eid, nid, treats_with_parallel_edges, two_hop_chain};
    use crate::model::{Endpoint, QueryGraph, QueryGraphEdge, QueryGraphNode};

    #[fixture]
    fn store() -> LayoutStore {
        let mut store = LayoutStore::new(LayoutConfig::default());
        store.sync(&default_graph());
        store
    }

    fn in_bounds(store: &LayoutStore) -> bool {
        let config = store.config();
        store.nodes().iter().all(|node| {
            let margin = if node.is_pinned() { config.node_radius / 2.0 } else { config.node_radius };
            node.x >= margin
                && node.x <= config.width - margin
                && node.y >= margin
                && node.y <= config.height - margin
        })
    }

    #[rstest]
    fn sync_places_new_nodes_inside_the_canvas(store: LayoutStore) {
        assert_eq!(store.nodes().len(), 2);
        assert!(in_bounds(&store));
        assert!(store.curve(&eid("e0")).is_some());
        assert!(store.is_running());
    }

    #[rstest]
    fn sync_keeps_positions_of_surviving_nodes(mut store: LayoutStore) {
        store.settle(50);
        let before = store.position(&nid("n1")).expect("n1");
        store.sync(&two_hop_chain());
        assert_eq!(store.position(&nid("n1")), Some(before));
        assert!(store.position(&nid("n2")).is_some());
        assert_eq!(store.alpha(), 1.0);
    }

    #[rstest]
    fn edge_reorder_is_out_of_sync(mut store: LayoutStore) {
        assert!(store.is_synced_with(&default_graph()));
        assert!(!store.is_synced_with(&two_hop_chain()));

        let mut forward = default_graph();
        forward.insert_edge(eid("e1"), QueryGraphEdge::new(nid("n0"), nid("n1")));
        let mut reordered = QueryGraph::new();
        reordered.insert_node(nid("n0"), QueryGraphNode::new());
        reordered.insert_node(nid("n1"), QueryGraphNode::new());
        reordered.insert_edge(eid("e1"), QueryGraphEdge::new(nid("n0"), nid("n1")));
        reordered.insert_edge(eid("e0"), QueryGraphEdge::new(nid("n0"), nid("n1")));

        store.sync(&forward);
        assert!(store.is_synced_with(&forward));
        assert!(!store.is_synced_with(&reordered));
    }

    #[rstest]
    fn sync_drops_removed_nodes_and_their_curves(mut store: LayoutStore) {
        store.sync(&two_hop_chain());
        store.sync(&default_graph());
        assert!(store.node(&nid("n2")).is_none());
        assert!(store.curve(&eid("e1")).is_none());
    }

    #[rstest]
    fn settle_stops_once_cold_and_stays_in_bounds(mut store: LayoutStore) {
        let ticks = store.settle(1_000);
        assert!(ticks > 250 && ticks < 1_000, "ticks {ticks}");
        assert!(!store.is_running());
        assert!(!store.tick());
        assert!(in_bounds(&store));

        let a = store.position(&nid("n0")).expect("n0");
        let b = store.position(&nid("n1")).expect("n1");
        assert!(a.distance(b) >= store.config().node_radius);
    }

    #[test]
    fn parallel_edges_curve_to_opposite_sides() {
        let mut store = LayoutStore::new(LayoutConfig::default());
        store.sync(&treats_with_parallel_edges());
        store.settle(400);

        let e0 = store.placement(&eid("e0")).expect("e0");
        let e1 = store.placement(&eid("e1")).expect("e1");
        assert_eq!(e0.index + e1.index, 0);
        assert_eq!(e0.index.abs(), 1);

        let a = store.position(&nid("n0")).expect("n0");
        let b = store.position(&nid("n1")).expect("n1");
        let side = |p: Point| (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
        let c0 = store.curve(&eid("e0")).expect("e0").control;
        let c1 = store.curve(&eid("e1")).expect("e1").control;
        assert!(side(c0) * side(c1) < 0.0);
    }

    #[rstest]
    fn pinned_nodes_follow_the_pin_and_may_overflow_by_half_a_radius(mut store: LayoutStore) {
        assert!(store.pin(&nid("n0"), Point::new(-100.0, 200.0)));
        store.tick();
        let node = store.node(&nid("n0")).expect("n0");
        assert_eq!(node.x, 20.0);
        assert_eq!(node.y, 200.0);

        assert!(store.unpin(&nid("n0")));
        assert!(!store.pin(&nid("missing"), Point::default()));
    }

    #[rstest]
    fn hit_test_uses_node_circles(store: LayoutStore) {
        let center = store.position(&nid("n1")).expect("n1");
        let radius = store.config().node_radius;
        assert_eq!(store.hit_test(center), Some(&nid("n1")));
        assert!(store.hit_test(Point::new(center.x + radius, center.y)).is_some());
        assert_eq!(store.hit_test(Point::new(-500.0, -500.0)), None);
    }

    #[rstest]
    fn endpoint_preview_anchors_the_other_end(store: LayoutStore) {
        let pointer = Point::new(10.0, 10.0);
        let anchor = store.position(&nid("n0")).expect("n0");
        let preview = store.preview_endpoint(&eid("e0"), Endpoint::Object, pointer).expect("preview");
        assert_eq!(preview.end, pointer);
        assert!((preview.start.distance(anchor) - store.config().node_radius).abs() < 1e-9);
        assert!(store.preview_endpoint(&eid("e9"), Endpoint::Object, pointer).is_none());
    }

    #[rstest]
    fn resize_is_debounced(mut store: LayoutStore) {
        let start = Instant::now();
        store.request_resize(600.0, 500.0, start);
        store.request_resize(800.0, 600.0, start + Duration::from_millis(100));
        assert!(!store.poll(start + Duration::from_millis(300)));
        assert!(store.poll(start + Duration::from_millis(350)));
        assert_eq!((store.config().width, store.config().height), (800.0, 600.0));
        assert!(!store.poll(start + Duration::from_millis(1_000)));
    }

    #[test]
    fn self_loops_get_a_curve_but_no_spring() {
        let mut graph = default_graph();
        graph.insert_edge(eid("e1"), QueryGraphEdge::new(nid("n1"), nid("n1")));
        let mut store = LayoutStore::new(LayoutConfig::default());
        store.sync(&graph);
        let center = store.position(&nid("n1")).expect("n1");
        let curve = store.curve(&eid("e1")).expect("loop");
        assert!(curve.control.y < center.y);
    }
}
