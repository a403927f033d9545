// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of qgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! A small velocity-Verlet force simulation in the style of d3-force.
//!
//! Each tick cools `alpha` toward `alpha_target`, lets the link, collision and center forces
//! adjust velocities (center shifts positions directly), then integrates with velocity decay.
//! Pinned nodes (`fx`/`fy`) are placed exactly and lose their velocity.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use super::geometry::Point;
use crate::model::NodeId;

/// Ticks it takes `alpha` to cool from 1 to `alpha_min` with no target.
pub const COOLING_TICKS: f64 = 300.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimNode {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub fx: Option<f64>,
    pub fy: Option<f64>,
}

impl SimNode {
    pub fn at(id: NodeId, position: Point) -> Self {
        Self { id, x: position.x, y: position.y, vx: 0.0, vy: 0.0, fx: None, fy: None }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn is_pinned(&self) -> bool {
        self.fx.is_some() || self.fy.is_some()
    }

    pub fn pin(&mut self, at: Point) {
        self.fx = Some(at.x);
        self.fy = Some(at.y);
    }

    pub fn unpin(&mut self) {
        self.fx = None;
        self.fy = None;
    }
}

/// A spring between two node slots. Self-loops never become links.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimLink {
    pub source: usize,
    pub target: usize,
    strength: f64,
    bias: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Forces {
    pub center: Point,
    pub center_strength: f64,
    pub link_distance: f64,
    pub collide_radius: f64,
    pub collide_strength: f64,
    pub velocity_decay: f64,
    pub alpha_min: f64,
}

impl Forces {
    pub fn alpha_decay(&self) -> f64 {
        1.0 - self.alpha_min.powf(1.0 / COOLING_TICKS)
    }
}

#[derive(Debug, Clone)]
pub struct Simulation {
    nodes: Vec<SimNode>,
    links: Vec<SimLink>,
    forces: Forces,
    alpha: f64,
    alpha_target: f64,
    rng: StdRng,
}

impl Simulation {
    pub fn new(forces: Forces, seed: u64) -> Self {
        Self {
            nodes: Vec::new(),
            links: Vec::new(),
            forces,
            alpha: 1.0,
            alpha_target: 0.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn nodes(&self) -> &[SimNode] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut [SimNode] {
        &mut self.nodes
    }

    pub fn links(&self) -> &[SimLink] {
        &self.links
    }

    pub fn forces(&self) -> &Forces {
        &self.forces
    }

    pub fn set_center(&mut self, center: Point) {
        self.forces.center = center;
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    pub fn alpha_target(&self) -> f64 {
        self.alpha_target
    }

    pub fn set_alpha_target(&mut self, alpha_target: f64) {
        self.alpha_target = alpha_target.clamp(0.0, 1.0);
    }

    /// Cold: the next tick would not move anything noticeably.
    pub fn is_settled(&self) -> bool {
        self.alpha < self.forces.alpha_min
    }

    /// Replaces the node set and rebuilds links from `(source, target)` slot pairs.
    pub fn set_graph(&mut self, nodes: Vec<SimNode>, pairs: &[(usize, usize)]) {
        self.nodes = nodes;

        let mut degree = vec![0usize; self.nodes.len()];
        let pairs: Vec<(usize, usize)> = pairs
            .iter()
            .copied()
            .filter(|&(source, target)| {
                source != target && source < self.nodes.len() && target < self.nodes.len()
            })
            .collect();
        for &(source, target) in &pairs {
            degree[source] += 1;
            degree[target] += 1;
        }

        self.links = pairs
            .into_iter()
            .map(|(source, target)| {
                let (ds, dt) = (degree[source] as f64, degree[target] as f64);
                SimLink { source, target, strength: 1.0 / ds.min(dt), bias: ds / (ds + dt) }
            })
            .collect();
    }

    pub fn tick(&mut self) {
        self.alpha += (self.alpha_target - self.alpha) * self.forces.alpha_decay();

        self.apply_links();
        self.apply_collisions();
        self.apply_center();

        let keep = 1.0 - self.forces.velocity_decay;
        for node in &mut self.nodes {
            match node.fx {
                Some(fx) => {
                    node.x = fx;
                    node.vx = 0.0;
                }
                None => {
                    node.vx *= keep;
                    node.x += node.vx;
                }
            }
            match node.fy {
                Some(fy) => {
                    node.y = fy;
                    node.vy = 0.0;
                }
                None => {
                    node.vy *= keep;
                    node.y += node.vy;
                }
            }
        }
    }

    // Tiny random nudge that separates exactly coincident nodes.
    fn jiggle(&mut self) -> f64 {
        (self.rng.gen::<f64>() - 0.5) * 1e-6
    }

    fn apply_links(&mut self) {
        let distance = self.forces.link_distance;
        for k in 0..self.links.len() {
            let SimLink { source, target, strength, bias } = self.links[k];
            let (s, t) = (&self.nodes[source], &self.nodes[target]);
            let mut x = t.x + t.vx - s.x - s.vx;
            let mut y = t.y + t.vy - s.y - s.vy;
            if x == 0.0 {
                x = self.jiggle();
            }
            if y == 0.0 {
                y = self.jiggle();
            }

            let length = x.hypot(y);
            let pull = (length - distance) / length * self.alpha * strength;
            x *= pull;
            y *= pull;

            let target_node = &mut self.nodes[target];
            target_node.vx -= x * bias;
            target_node.vy -= y * bias;
            let source_node = &mut self.nodes[source];
            source_node.vx += x * (1.0 - bias);
            source_node.vy += y * (1.0 - bias);
        }
    }

    fn apply_collisions(&mut self) {
        let radius = self.forces.collide_radius;
        let strength = self.forces.collide_strength;
        let reach = radius + radius;
        // Equal radii: each side takes half of the correction.
        let weight = 0.5;

        for i in 0..self.nodes.len() {
            for j in (i + 1)..self.nodes.len() {
                let (a, b) = (&self.nodes[i], &self.nodes[j]);
                let mut x = (a.x + a.vx) - (b.x + b.vx);
                let mut y = (a.y + a.vy) - (b.y + b.vy);
                let mut length_sq = x * x + y * y;
                if length_sq >= reach * reach {
                    continue;
                }
                if x == 0.0 {
                    x = self.jiggle();
                    length_sq += x * x;
                }
                if y == 0.0 {
                    y = self.jiggle();
                    length_sq += y * y;
                }

                let length = length_sq.sqrt();
                let push = (reach - length) / length * strength;
                x *= push;
                y *= push;

                let a = &mut self.nodes[i];
                a.vx += x * weight;
                a.vy += y * weight;
                let b = &mut self.nodes[j];
                b.vx -= x * (1.0 - weight);
                b.vy -= y * (1.0 - weight);
            }
        }
    }

    fn apply_center(&mut self) {
        if self.nodes.is_empty() {
            return;
        }
        let count = self.nodes.len() as f64;
        let (sum_x, sum_y) =
            self.nodes.iter().fold((0.0, 0.0), |(sx, sy), node| (sx + node.x, sy + node.y));
        let strength = self.forces.center_strength;
        let shift_x = (sum_x / count - self.forces.center.x) * strength;
        let shift_y = (sum_y / count - self.forces.center.y) * strength;
        for node in &mut self.nodes {
            node.x -= shift_x;
            node.y -= shift_y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Forces, SimNode, Simulation};
    use crate::layout::geometry::Point;
    use crate::model::fixtures::nid;

    fn forces() -> Forces {
        Forces {
            center: Point::new(200.0, 200.0),
            center_strength: 1.0,
            link_distance: 100.0,
            collide_radius: 20.0,
            collide_strength: 1.0,
            velocity_decay: 0.4,
            alpha_min: 0.001,
        }
    }

    fn run(sim: &mut Simulation, ticks: usize) {
        for _ in 0..ticks {
            sim.tick();
        }
    }

    #[test]
    fn alpha_cools_below_min_in_about_three_hundred_ticks() {
        let mut sim = Simulation::new(forces(), 7);
        run(&mut sim, 299);
        assert!(!sim.is_settled());
        run(&mut sim, 2);
        assert!(sim.is_settled());
    }

    #[test]
    fn alpha_target_keeps_the_simulation_warm() {
        let mut sim = Simulation::new(forces(), 7);
        sim.set_alpha_target(0.3);
        run(&mut sim, 1000);
        assert!((sim.alpha() - 0.3).abs() < 1e-3);
        assert!(!sim.is_settled());
    }

    #[test]
    fn link_pulls_toward_rest_distance() {
        let mut sim = Simulation::new(forces(), 7);
        sim.set_graph(
            vec![
                SimNode::at(nid("n0"), Point::new(0.0, 200.0)),
                SimNode::at(nid("n1"), Point::new(400.0, 200.0)),
            ],
            &[(0, 1)],
        );
        run(&mut sim, 300);
        let distance = sim.nodes()[0].position().distance(sim.nodes()[1].position());
        assert!((distance - 100.0).abs() < 5.0, "distance {distance}");
    }

    #[test]
    fn collision_separates_coincident_nodes() {
        let mut sim = Simulation::new(forces(), 7);
        sim.set_graph(
            vec![
                SimNode::at(nid("n0"), Point::new(200.0, 200.0)),
                SimNode::at(nid("n1"), Point::new(200.0, 200.0)),
            ],
            &[],
        );
        run(&mut sim, 300);
        let distance = sim.nodes()[0].position().distance(sim.nodes()[1].position());
        assert!(distance > 30.0, "distance {distance}");
    }

    #[test]
    fn center_force_moves_the_centroid() {
        let mut sim = Simulation::new(forces(), 7);
        sim.set_graph(vec![SimNode::at(nid("n0"), Point::new(10.0, 30.0))], &[]);
        sim.tick();
        assert_eq!(sim.nodes()[0].position(), Point::new(200.0, 200.0));
    }

    #[test]
    fn pinned_nodes_stay_put() {
        let mut sim = Simulation::new(forces(), 7);
        let mut pinned = SimNode::at(nid("n0"), Point::new(50.0, 50.0));
        pinned.pin(Point::new(50.0, 50.0));
        sim.set_graph(vec![pinned, SimNode::at(nid("n1"), Point::new(300.0, 300.0))], &[(0, 1)]);
        run(&mut sim, 50);
        let node = &sim.nodes()[0];
        assert_eq!((node.x, node.y), (50.0, 50.0));
        assert_eq!((node.vx, node.vy), (0.0, 0.0));
    }

    #[test]
    fn self_loops_and_out_of_range_pairs_are_not_links() {
        let mut sim = Simulation::new(forces(), 7);
        sim.set_graph(
            vec![
                SimNode::at(nid("n0"), Point::new(0.0, 0.0)),
                SimNode::at(nid("n1"), Point::new(1.0, 1.0)),
            ],
            &[(0, 0), (0, 5), (0, 1)],
        );
        assert_eq!(sim.links().len(), 1);
    }
}
