//! An editing session over one sequence.
//!
//! The session owns the graph and the canvas state and keeps the two apart:
//! while a node is being dragged, structural edits are refused so that layout
//! and adjacency never change under an active drag.

use crate::canvas::{CanvasState, DragUpdate, ZoomDirection, ZoomTrigger};
use crate::error::GraphError;
use crate::flat::{FlatStep, to_flat};
use crate::sequence::{
    ContentPatch, NodeId, ParentLink, Position, Schedule, SequenceGraph, SequenceNode, StepType,
};
use crate::template::TemplateField;

mod request;

pub use request::AddStepRequest;

#[derive(Debug, Clone, Default)]
pub struct EditSession {
    graph: SequenceGraph,
    canvas: CanvasState,
}

impl EditSession {
    pub fn new(graph: SequenceGraph) -> Self {
        Self {
            graph,
            canvas: CanvasState::default(),
        }
    }

    pub fn graph(&self) -> &SequenceGraph {
        &self.graph
    }

    pub fn canvas(&self) -> &CanvasState {
        &self.canvas
    }

    // --- View ---
    // Zoom changes never touch the graph, so they are allowed mid-drag.

    pub fn set_zoom(&mut self, zoom: f64) -> f64 {
        self.canvas.set_zoom(zoom)
    }

    pub fn zoom_by(&mut self, direction: ZoomDirection, trigger: ZoomTrigger) -> f64 {
        self.canvas.zoom_by(direction, trigger)
    }

    pub fn wheel(&mut self, delta_y: f64) -> f64 {
        self.canvas.wheel(delta_y)
    }

    /// Restores the default zoom and pan. An active node drag keeps going.
    pub fn reset_view(&mut self) {
        self.canvas.reset_view();
    }

    pub fn into_graph(self) -> SequenceGraph {
        self.graph
    }

    /// The persisted form of the current sequence.
    pub fn save(&self) -> Vec<FlatStep> {
        to_flat(&self.graph)
    }

    fn ensure_not_dragging(&self) -> Result<(), GraphError> {
        match self.canvas.drag().node_id() {
            Some(node_id) => Err(GraphError::DragInProgress(node_id.clone())),
            None => Ok(()),
        }
    }

    // --- Structural edits ---

    /// Starts an "add step" interaction for `parent` (or a new root).
    ///
    /// Fails early when the target branch cannot take a new step, so the
    /// chooser is never shown for a slot that would be rejected.
    pub fn open_add_step(&self, parent: Option<ParentLink>) -> Result<AddStepRequest, GraphError> {
        self.ensure_not_dragging()?;
        if let Some(link) = &parent {
            self.graph.check_link(None, link)?;
        }
        Ok(AddStepRequest::new(parent))
    }

    /// Finishes an "add step" interaction with the step type the user picked.
    pub fn complete_add_step(
        &mut self,
        request: AddStepRequest,
        step: impl Into<StepType>,
    ) -> Result<NodeId, GraphError> {
        self.ensure_not_dragging()?;
        self.graph.add_node(step, request.into_parent())
    }

    pub fn remove_node(&mut self, node_id: &str) -> Result<SequenceNode, GraphError> {
        self.ensure_not_dragging()?;
        self.graph.remove_node(node_id)
    }

    pub fn move_node(&mut self, node_id: &str, parent: Option<ParentLink>) -> Result<(), GraphError> {
        self.ensure_not_dragging()?;
        self.graph.move_node(node_id, parent)
    }

    pub fn relayout(&mut self) -> Result<(), GraphError> {
        self.ensure_not_dragging()?;
        self.graph.relayout();
        Ok(())
    }

    // --- Content edits ---

    pub fn update_content(&mut self, node_id: &str, patch: ContentPatch) -> Result<bool, GraphError> {
        self.graph.update_content(node_id, patch)
    }

    pub fn insert_variable(&mut self, node_id: &str, key: &str, field: TemplateField) -> bool {
        self.graph.insert_variable(node_id, key, field)
    }

    pub fn set_schedule(&mut self, node_id: &str, schedule: Schedule) -> Result<(), GraphError> {
        self.graph.set_schedule(node_id, schedule)
    }

    // --- Pointer gestures ---

    /// Pointer pressed on a node: begins dragging it.
    pub fn pointer_down_on_node(&mut self, node_id: &str, pointer: Position) -> Result<(), GraphError> {
        let node = self
            .graph
            .node(node_id)
            .ok_or_else(|| GraphError::NodeNotFound(node_id.into()))?;
        self.canvas
            .pointer_down_on_node(node.id().clone(), node.position(), pointer);
        Ok(())
    }

    /// Pointer pressed on the background; returns whether a pan started.
    pub fn pointer_down_on_canvas(&mut self, pointer: Position) -> bool {
        self.canvas.pointer_down_on_canvas(pointer)
    }

    pub fn pointer_move(&mut self, pointer: Position) -> Option<DragUpdate> {
        let update = self.canvas.pointer_move(pointer);
        self.commit(update)
    }

    pub fn pointer_up(&mut self, pointer: Position) -> Option<DragUpdate> {
        let update = self.canvas.pointer_up(pointer);
        self.commit(update)
    }

    /// Abandons a drag and puts the node back where it started.
    pub fn cancel_drag(&mut self) -> Option<DragUpdate> {
        let update = self.canvas.cancel_drag();
        self.commit(update)
    }

    fn commit(&mut self, update: Option<DragUpdate>) -> Option<DragUpdate> {
        let update = update?;
        if let Err(e) = self
            .graph
            .set_position(update.node_id.as_str(), update.position)
        {
            log::warn!("Dropping drag update: {}", e);
            return None;
        }
        Some(update)
    }
}
