// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of qgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Click and drag gesture handling.
//!
//! The controller is a small state machine. Discrete intents come back as `Command`s for the
//! reducer; drags mutate the `LayoutStore` directly. Time is passed in explicitly so the
//! connect-mode timeout is deterministic.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::layout::{EdgeCurve, LayoutStore, Point};
use crate::model::{EdgeId, Endpoint, NodeId, QueryGraph};
use crate::ops::{Command, EndpointTarget};
use crate::ui::Selection;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InteractionConfig {
    pub connect_timeout_ms: u64,
    pub resize_debounce_ms: u64,
    /// Alpha the simulation is held at while a node is dragged.
    pub drag_alpha_target: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self { connect_timeout_ms: 5_000, resize_debounce_ms: 250, drag_alpha_target: 0.3 }
    }
}

impl InteractionConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Idle,
    Connecting {
        chosen: SmallVec<[NodeId; 2]>,
        deadline: Instant,
    },
    DraggingNode {
        node_id: NodeId,
    },
    DraggingEdgeEndpoint {
        edge_id: EdgeId,
        endpoint: Endpoint,
        pointer: Point,
    },
    Editing(Selection),
}

#[derive(Debug, Clone)]
pub struct InteractionController {
    config: InteractionConfig,
    mode: Mode,
}

impl InteractionController {
    pub fn new(config: InteractionConfig) -> Self {
        Self { config, mode: Mode::Idle }
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_idle(&self) -> bool {
        self.mode == Mode::Idle
    }

    /// The popover anchor, if a node or edge is being edited.
    pub fn selection(&self) -> Option<&Selection> {
        match &self.mode {
            Mode::Editing(selection) => Some(selection),
            _ => None,
        }
    }

    pub fn chosen_nodes(&self) -> &[NodeId] {
        match &self.mode {
            Mode::Connecting { chosen, .. } => chosen,
            _ => &[],
        }
    }

    fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            debug!(from = mode_name(&self.mode), to = mode_name(&mode), "interaction mode");
        }
        self.mode = mode;
    }

    pub fn cancel(&mut self) {
        self.set_mode(Mode::Idle);
    }

    /// Enters connect mode; an already running connect session starts over.
    pub fn begin_connect(&mut self, now: Instant) {
        self.set_mode(Mode::Connecting {
            chosen: SmallVec::new(),
            deadline: now + self.config.connect_timeout(),
        });
    }

    /// Expires connect mode once its deadline passed. Returns `true` if the mode changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match &self.mode {
            Mode::Connecting { deadline, .. } if now >= *deadline => {
                self.set_mode(Mode::Idle);
                true
            }
            _ => false,
        }
    }

    pub fn click_node(&mut self, node_id: &NodeId, now: Instant) -> Option<Command> {
        self.poll(now);
        match &mut self.mode {
            Mode::Connecting { chosen, .. } => {
                if !chosen.contains(node_id) {
                    chosen.push(node_id.clone());
                }
                if chosen.len() < 2 {
                    return None;
                }
                let (subject, object) = (chosen[0].clone(), chosen[1].clone());
                self.set_mode(Mode::Idle);
                Some(Command::AddEdge { subject, object })
            }
            Mode::Editing(Selection::Node(selected)) if selected == node_id => {
                self.set_mode(Mode::Idle);
                None
            }
            _ => {
                self.set_mode(Mode::Editing(Selection::Node(node_id.clone())));
                None
            }
        }
    }

    pub fn click_edge(&mut self, edge_id: &EdgeId, now: Instant) {
        self.poll(now);
        match &self.mode {
            Mode::Connecting { .. } => {}
            Mode::Editing(Selection::Edge(selected)) if selected == edge_id => {
                self.set_mode(Mode::Idle);
            }
            _ => self.set_mode(Mode::Editing(Selection::Edge(edge_id.clone()))),
        }
    }

    /// A click on empty canvas closes any popover and leaves connect mode.
    pub fn click_background(&mut self) {
        if matches!(self.mode, Mode::Editing(_) | Mode::Connecting { .. }) {
            self.set_mode(Mode::Idle);
        }
    }

    /// The delete button drawn above the selected node or edge.
    pub fn click_delete(&mut self) -> Option<Command> {
        let command = match self.selection()? {
            Selection::Node(node_id) => Command::DeleteNode { node_id: node_id.clone() },
            Selection::Edge(edge_id) => Command::DeleteEdge { edge_id: edge_id.clone() },
        };
        self.set_mode(Mode::Idle);
        Some(command)
    }

    /// Pins the node where it is and keeps the simulation warm while it moves.
    pub fn drag_node_start(&mut self, node_id: &NodeId, store: &mut LayoutStore) -> bool {
        let Some(at) = store.position(node_id) else {
            return false;
        };
        store.pin(node_id, at);
        store.set_alpha_target(self.config.drag_alpha_target);
        store.restart();
        self.set_mode(Mode::DraggingNode { node_id: node_id.clone() });
        true
    }

    pub fn drag_node_move(&mut self, pointer: Point, store: &mut LayoutStore) {
        if let Mode::DraggingNode { node_id } = &self.mode {
            store.pin(node_id, pointer);
        }
    }

    /// Lets the simulation cool again; the node stays pinned where it was dropped.
    pub fn drag_node_end(&mut self, store: &mut LayoutStore) {
        if matches!(self.mode, Mode::DraggingNode { .. }) {
            store.set_alpha_target(0.0);
            self.set_mode(Mode::Idle);
        }
    }

    pub fn drag_endpoint_start(
        &mut self,
        edge_id: &EdgeId,
        endpoint: Endpoint,
        pointer: Point,
        store: &mut LayoutStore,
    ) -> bool {
        if store.curve(edge_id).is_none() {
            return false;
        }
        store.stop();
        self.set_mode(Mode::DraggingEdgeEndpoint { edge_id: edge_id.clone(), endpoint, pointer });
        true
    }

    /// The dragged edge's path following the pointer.
    pub fn drag_endpoint_move(&mut self, pointer: Point, store: &LayoutStore) -> Option<EdgeCurve> {
        let Mode::DraggingEdgeEndpoint { edge_id, endpoint, pointer: current } = &mut self.mode
        else {
            return None;
        };
        *current = pointer;
        store.preview_endpoint(edge_id, *endpoint, pointer)
    }

    /// Reattaches the edge to the node under `pointer`; a miss snaps back without a command.
    pub fn drag_endpoint_end(
        &mut self,
        pointer: Point,
        store: &mut LayoutStore,
        graph: &QueryGraph,
    ) -> Option<Command> {
        let Mode::DraggingEdgeEndpoint { edge_id, endpoint, .. } = &self.mode else {
            return None;
        };
        let (edge_id, endpoint) = (edge_id.clone(), *endpoint);
        self.set_mode(Mode::Idle);
        store.restart();

        let hit = store.hit_test(pointer)?.clone();
        let current = graph.edge(&edge_id)?.endpoint(endpoint);
        if &hit == current {
            return None;
        }
        Some(Command::EditEdge { edge_id, endpoint, target: EndpointTarget::Node(hit) })
    }
}

fn mode_name(mode: &Mode) -> &'static str {
    match mode {
        Mode::Idle => "idle",
        Mode::Connecting { .. } => "connecting",
        Mode::DraggingNode { .. } => "dragging_node",
        Mode::DraggingEdgeEndpoint { .. } => "dragging_edge_endpoint",
        Mode::Editing(_) => "editing",
    }
}
