// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of qgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! One query-builder canvas.
//!
//! `QueryBuilder` wires the reducer, the layout store and the interaction controller together.
//! Every command goes through `dispatch`, so the layout and the highlights always follow the
//! latest graph.

use std::time::Instant;

use crate::config::EditorConfig;
use crate::format::{self, FormatError};
use crate::interaction::InteractionController;
use crate::layout::{EdgeCurve, LayoutStore, Point};
use crate::model::{EdgeId, Endpoint, NodeId, QueryGraph};
use crate::ontology::{Ontology, StaticOntology};
use crate::ops::{apply, Command, Delta, EditorState, GraphValidator, StructuralValidator};
use crate::query::{linearize, Row};
use crate::render::{build_frame, render_rows, RenderFrame};
use crate::ui::{Selection, UiState};

pub struct QueryBuilder {
    state: EditorState,
    validator: Box<dyn GraphValidator>,
    layout: LayoutStore,
    controller: InteractionController,
    ui: UiState,
    ontology: Box<dyn Ontology>,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl QueryBuilder {
    /// Starts from the default graph with the structural validator built from `config`.
    pub fn new(config: EditorConfig) -> Self {
        let validator = Box::new(StructuralValidator::new(config.validation.clone()));
        Self::with_validator(config, validator)
    }

    pub fn with_validator(config: EditorConfig, validator: Box<dyn GraphValidator>) -> Self {
        let EditorConfig { layout, interaction, .. } = config;
        let state = EditorState::new(validator.as_ref());
        let mut layout = LayoutStore::new(layout).with_resize_debounce(interaction.resize_debounce());
        layout.sync(state.graph());
        Self {
            state,
            validator,
            layout,
            controller: InteractionController::new(interaction),
            ui: UiState::default(),
            ontology: Box::new(StaticOntology::new()),
        }
    }

    pub fn with_ontology(mut self, ontology: Box<dyn Ontology>) -> Self {
        self.ontology = ontology;
        self
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn graph(&self) -> &QueryGraph {
        self.state.graph()
    }

    pub fn layout(&self) -> &LayoutStore {
        &self.layout
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    /// Applies `command`, re-syncs the layout and drops highlights of removed ids.
    pub fn dispatch(&mut self, command: Command) -> Delta {
        let result = apply(&self.state, &command, self.validator.as_ref());
        self.state = result.state;
        if !result.delta.is_empty() || !self.layout.is_synced_with(self.state.graph()) {
            self.layout.sync(self.state.graph());
        }

        let graph = self.state.graph();
        let stale = match self.controller.selection() {
            Some(Selection::Node(node_id)) => graph.node(node_id).is_none(),
            Some(Selection::Edge(edge_id)) => graph.edge(edge_id).is_none(),
            None => false,
        };
        if stale {
            self.controller.cancel();
        }
        self.sync_ui();
        let graph = self.state.graph();
        self.ui.retain(
            |node_id| graph.nodes().contains_key(node_id),
            |edge_id| graph.edges().contains_key(edge_id),
        );
        result.delta
    }

    /// Loads `graph` through `SaveGraph`, so unreachable parts are dropped.
    pub fn load(&mut self, graph: QueryGraph) -> Delta {
        self.dispatch(Command::SaveGraph { graph })
    }

    pub fn load_json(&mut self, source: &str) -> Result<Delta, FormatError> {
        let graph = format::from_json(source)?;
        Ok(self.load(graph))
    }

    pub fn to_json(&self) -> Result<String, FormatError> {
        format::to_json(self.state.graph())
    }

    fn sync_ui(&mut self) {
        self.ui.set_selection(self.controller.selection().cloned());
        self.ui.set_chosen_nodes(self.controller.chosen_nodes());
    }

    fn dispatch_emitted(&mut self, command: Option<Command>) -> Option<Delta> {
        let delta = command.map(|command| self.dispatch(command));
        self.sync_ui();
        delta
    }

    pub fn begin_connect(&mut self, now: Instant) {
        self.controller.begin_connect(now);
        self.sync_ui();
    }

    pub fn click_node(&mut self, node_id: &NodeId, now: Instant) -> Option<Delta> {
        let command = self.controller.click_node(node_id, now);
        self.dispatch_emitted(command)
    }

    pub fn click_edge(&mut self, edge_id: &EdgeId, now: Instant) {
        self.controller.click_edge(edge_id, now);
        self.sync_ui();
    }

    pub fn click_background(&mut self) {
        self.controller.click_background();
        self.sync_ui();
    }

    pub fn click_delete(&mut self) -> Option<Delta> {
        let command = self.controller.click_delete();
        self.dispatch_emitted(command)
    }

    pub fn drag_node_start(&mut self, node_id: &NodeId) -> bool {
        self.controller.drag_node_start(node_id, &mut self.layout)
    }

    pub fn drag_node_move(&mut self, pointer: Point) {
        self.controller.drag_node_move(pointer, &mut self.layout);
    }

    pub fn drag_node_end(&mut self) {
        self.controller.drag_node_end(&mut self.layout);
    }

    pub fn drag_endpoint_start(
        &mut self,
        edge_id: &EdgeId,
        endpoint: Endpoint,
        pointer: Point,
    ) -> bool {
        self.controller.drag_endpoint_start(edge_id, endpoint, pointer, &mut self.layout)
    }

    pub fn drag_endpoint_move(&mut self, pointer: Point) -> Option<EdgeCurve> {
        self.controller.drag_endpoint_move(pointer, &self.layout)
    }

    pub fn drag_endpoint_end(&mut self, pointer: Point) -> Option<Delta> {
        let command =
            self.controller.drag_endpoint_end(pointer, &mut self.layout, self.state.graph());
        self.dispatch_emitted(command)
    }

    pub fn request_resize(&mut self, width: f64, height: f64, now: Instant) {
        self.layout.request_resize(width, height, now);
    }

    /// Expires connect mode and applies a due resize. Returns `true` if anything changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let expired = self.controller.poll(now);
        if expired {
            self.sync_ui();
        }
        let resized = self.layout.poll(now);
        expired || resized
    }

    pub fn tick(&mut self) -> bool {
        self.layout.tick()
    }

    pub fn settle(&mut self, max_ticks: usize) -> usize {
        self.layout.settle(max_ticks)
    }

    pub fn rows(&self) -> Vec<Row> {
        linearize(&self.state)
    }

    pub fn sentence(&self) -> Vec<String> {
        render_rows(self.state.graph(), &self.rows())
    }

    pub fn frame(&self) -> RenderFrame {
        build_frame(&self.state, &self.layout, &self.ui, self.ontology.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use rstest::{fixture, rstest};

    use super::QueryBuilder;
    use crate::config::EditorConfig;
    use crate::layout::Point;
    use crate::model::fixtures::{eid, nid, treats_with_parallel_edges};
    use crate::model::{Endpoint, QueryGraph, QueryGraphEdge, QueryGraphNode};
    use crate::ontology::StaticOntology;
    use crate::ops::{Command, Validation};
    use crate::ui::Selection;

    #[fixture]
    fn builder() -> QueryBuilder {
        let mut builder = QueryBuilder::default().with_ontology(Box::new(StaticOntology::biolink()));
        builder.load(treats_with_parallel_edges());
        builder.settle(500);
        builder
    }

    #[test]
    fn default_builder_is_valid_and_laid_out() {
        let builder = QueryBuilder::default();
        assert!(builder.state().is_valid());
        assert_eq!(builder.rows().len(), 1);
        assert!(builder.layout().position(&nid("n0")).is_some());
        assert!(builder.layout().curve(&eid("e0")).is_some());
    }

    #[rstest]
    fn dispatch_keeps_layout_in_step(mut builder: QueryBuilder) {
        let delta = builder.dispatch(Command::AddHop { node_id: Some(nid("n2")) });
        assert_eq!(delta.added_nodes, [nid("n3")]);
        assert!(builder.layout().position(&nid("n3")).is_some());
        assert!(builder.layout().curve(&eid("e3")).is_some());

        builder.dispatch(Command::DeleteNode { node_id: nid("n2") });
        assert!(builder.layout().position(&nid("n2")).is_none());
        assert!(builder.layout().position(&nid("n3")).is_none());
    }

    #[test]
    fn reordered_parallel_edges_get_fresh_placements() {
        let pair = |order: [&str; 2]| {
            let mut graph = QueryGraph::new();
            graph.insert_node(nid("n0"), QueryGraphNode::new());
            graph.insert_node(nid("n1"), QueryGraphNode::new());
            for edge_id in order {
                graph.insert_edge(eid(edge_id), QueryGraphEdge::new(nid("n0"), nid("n1")));
            }
            graph
        };
        let index = |builder: &QueryBuilder, edge_id: &str| {
            builder.layout().placement(&eid(edge_id)).map(|placement| placement.index)
        };

        let mut builder = QueryBuilder::default();
        builder.load(pair(["e0", "e1"]));
        assert_eq!((index(&builder, "e0"), index(&builder, "e1")), (Some(-1), Some(1)));

        let delta = builder.dispatch(Command::RestoreGraph { graph: pair(["e1", "e0"]) });
        assert!(delta.is_empty());
        assert_eq!((index(&builder, "e0"), index(&builder, "e1")), (Some(1), Some(-1)));
    }

    #[rstest]
    fn connect_gesture_adds_an_edge(mut builder: QueryBuilder) {
        let now = Instant::now();
        builder.begin_connect(now);
        assert!(builder.click_node(&nid("n2"), now).is_none());
        assert_eq!(builder.ui().chosen_nodes(), [nid("n2")]);

        let delta = builder.click_node(&nid("n0"), now).expect("edge added");
        assert_eq!(delta.added_edges, [eid("e3")]);
        assert!(builder.ui().chosen_nodes().is_empty());
        assert_eq!(builder.graph().edge(&eid("e3")).map(|edge| edge.subject()), Some(&nid("n2")));
    }

    #[rstest]
    fn connect_mode_expires_on_poll(mut builder: QueryBuilder) {
        let now = Instant::now();
        builder.begin_connect(now);
        builder.click_node(&nid("n2"), now);
        assert!(builder.poll(now + Duration::from_secs(5)));
        assert!(builder.ui().chosen_nodes().is_empty());
        assert!(builder.controller().is_idle());
    }

    #[rstest]
    fn delete_button_removes_the_selection(mut builder: QueryBuilder) {
        let now = Instant::now();
        builder.click_node(&nid("n2"), now);
        assert_eq!(builder.ui().selection(), Some(&Selection::Node(nid("n2"))));

        let delta = builder.click_delete().expect("deleted");
        assert_eq!(delta.removed_nodes, [nid("n2")]);
        assert_eq!(delta.removed_edges, [eid("e2")]);
        assert_eq!(builder.ui().selection(), None);
    }

    #[rstest]
    fn selection_of_a_pruned_edge_is_dropped(mut builder: QueryBuilder) {
        let now = Instant::now();
        builder.click_edge(&eid("e2"), now);
        builder.dispatch(Command::DeleteNode { node_id: nid("n2") });
        assert_eq!(builder.ui().selection(), None);
        assert!(builder.controller().is_idle());
    }

    #[rstest]
    fn endpoint_drag_repoints_the_edge(mut builder: QueryBuilder) {
        let origin = builder.layout().position(&nid("n2")).expect("n2");
        let over_n0 = builder.layout().position(&nid("n0")).expect("n0");
        assert!(builder.drag_endpoint_start(&eid("e2"), Endpoint::Object, origin));
        assert!(builder.drag_endpoint_move(over_n0).is_some());

        let delta = builder.drag_endpoint_end(over_n0).expect("repointed");
        assert_eq!(delta.updated_edges, [eid("e2")]);
        assert_eq!(delta.removed_nodes, [nid("n2")]);
        assert_eq!(builder.graph().edge(&eid("e2")).map(|edge| edge.object()), Some(&nid("n0")));
    }

    #[rstest]
    fn resize_is_debounced(mut builder: QueryBuilder) {
        let now = Instant::now();
        builder.request_resize(800.0, 600.0, now);
        assert!(!builder.poll(now + Duration::from_millis(100)));
        assert!(builder.poll(now + Duration::from_millis(250)));
        assert_eq!(builder.layout().config().width, 800.0);
    }

    #[rstest]
    fn frame_and_sentence_follow_the_graph(builder: QueryBuilder) {
        let frame = builder.frame();
        assert_eq!(frame.nodes.len(), 3);
        assert_eq!(frame.edges.len(), 3);
        assert_eq!(frame.sentence, builder.sentence());
        assert_eq!(frame.nodes[2].fill, "#92c5de");
    }

    #[test]
    fn json_round_trips_through_the_session() {
        let mut builder = QueryBuilder::default();
        builder.load(treats_with_parallel_edges());
        let json = builder.to_json().expect("json");

        let mut other = QueryBuilder::default();
        other.load_json(&json).expect("load");
        assert_eq!(other.graph(), builder.graph());
    }

    #[test]
    fn custom_validator_drives_validity() {
        let validator = |_: &crate::model::QueryGraph| Validation::invalid("always wrong");
        let builder = QueryBuilder::with_validator(EditorConfig::default(), Box::new(validator));
        assert!(!builder.state().is_valid());
        assert_eq!(builder.state().error_message(), Some("always wrong"));
        assert!(builder.rows().is_empty());
    }

    #[rstest]
    fn dragging_a_node_pins_it(mut builder: QueryBuilder) {
        assert!(builder.drag_node_start(&nid("n1")));
        builder.drag_node_move(Point::new(120.0, 80.0));
        builder.drag_node_end();
        builder.settle(1_000);
        assert_eq!(builder.layout().position(&nid("n1")), Some(Point::new(120.0, 80.0)));
    }
}
