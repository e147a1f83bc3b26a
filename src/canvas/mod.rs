//! View-only interaction state of the sequence canvas: zoom, pan and node
//! dragging. Nothing here touches graph content; a drag only reports the
//! positions its owner should commit.

use crate::sequence::{NodeId, Position};

mod drag;

pub use drag::{DragState, DragUpdate};

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 3.0;
pub const DEFAULT_ZOOM: f64 = 1.0;

/// What produced a zoom step. Buttons zoom in coarser steps than the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomTrigger {
    Wheel,
    Button,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomTrigger {
    pub fn factor(self, direction: ZoomDirection) -> f64 {
        match (self, direction) {
            (ZoomTrigger::Wheel, ZoomDirection::In) => 1.1,
            (ZoomTrigger::Wheel, ZoomDirection::Out) => 0.9,
            (ZoomTrigger::Button, ZoomDirection::In) => 1.2,
            (ZoomTrigger::Button, ZoomDirection::Out) => 0.8,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CanvasState {
    zoom: f64,
    pan: Position,
    drag: DragState,
    /// Last screen-space pointer position while a pan gesture is active.
    pan_anchor: Option<Position>,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            pan: Position::default(),
            drag: DragState::Idle,
            pan_anchor: None,
        }
    }
}

impl CanvasState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> Position {
        self.pan
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    pub fn is_dragging(&self) -> bool {
        !self.drag.is_idle()
    }

    pub fn is_panning(&self) -> bool {
        self.pan_anchor.is_some()
    }

    /// Sets the zoom, clamped to `[MIN_ZOOM, MAX_ZOOM]`. Returns the new zoom.
    pub fn set_zoom(&mut self, zoom: f64) -> f64 {
        self.zoom = if zoom.is_finite() {
            zoom.clamp(MIN_ZOOM, MAX_ZOOM)
        } else {
            DEFAULT_ZOOM
        };
        self.zoom
    }

    pub fn zoom_by(&mut self, direction: ZoomDirection, trigger: ZoomTrigger) -> f64 {
        self.set_zoom(self.zoom * trigger.factor(direction))
    }

    /// Applies a wheel event: scrolling up (negative delta) zooms in.
    pub fn wheel(&mut self, delta_y: f64) -> f64 {
        if delta_y < 0.0 {
            self.zoom_by(ZoomDirection::In, ZoomTrigger::Wheel)
        } else if delta_y > 0.0 {
            self.zoom_by(ZoomDirection::Out, ZoomTrigger::Wheel)
        } else {
            self.zoom
        }
    }

    pub fn reset_view(&mut self) {
        self.zoom = DEFAULT_ZOOM;
        self.pan = Position::default();
        self.pan_anchor = None;
    }

    /// Maps a screen-space point onto the canvas.
    pub fn screen_to_canvas(&self, point: Position) -> Position {
        (point - self.pan).scale(1.0 / self.zoom)
    }

    pub fn canvas_to_screen(&self, point: Position) -> Position {
        point.scale(self.zoom) + self.pan
    }

    /// Pointer pressed on a node: starts dragging it.
    ///
    /// Any pan that was already running is dropped, and the canvas-level
    /// press that follows for the same gesture will not start a new one.
    pub fn pointer_down_on_node(
        &mut self,
        node_id: NodeId,
        node_position: Position,
        pointer: Position,
    ) {
        self.pan_anchor = None;
        self.drag = DragState::Dragging {
            node_id,
            original_position: node_position,
            pointer_origin: pointer,
        };
    }

    /// Pointer pressed on the canvas background. Starts a pan unless a node
    /// drag owns this gesture; returns whether a pan started.
    pub fn pointer_down_on_canvas(&mut self, pointer: Position) -> bool {
        if self.is_dragging() {
            return false;
        }
        self.pan_anchor = Some(pointer);
        true
    }

    /// Pointer moved. While dragging, returns the dragged node's new position;
    /// while panning, shifts the view.
    pub fn pointer_move(&mut self, pointer: Position) -> Option<DragUpdate> {
        if let Some(position) = self.drag.position_for(pointer, self.zoom) {
            return self.drag.node_id().map(|node_id| DragUpdate {
                node_id: node_id.clone(),
                position,
            });
        }
        if let Some(anchor) = self.pan_anchor {
            self.pan = self.pan + (pointer - anchor);
            self.pan_anchor = Some(pointer);
        }
        None
    }

    /// Pointer released. Ends the gesture and returns the final drag position,
    /// if a node was being dragged.
    pub fn pointer_up(&mut self, pointer: Position) -> Option<DragUpdate> {
        let update = self.pointer_move(pointer);
        self.drag = DragState::Idle;
        self.pan_anchor = None;
        update
    }

    /// Abandons a drag. Returns the node and the position it should go back to.
    pub fn cancel_drag(&mut self) -> Option<DragUpdate> {
        match std::mem::take(&mut self.drag) {
            DragState::Idle => None,
            DragState::Dragging {
                node_id,
                original_position,
                ..
            } => Some(DragUpdate {
                node_id,
                position: original_position,
            }),
        }
    }
}
