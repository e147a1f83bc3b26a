use crate::sequence::{NodeId, Position};

/// Whether a node is currently being dragged.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        node_id: NodeId,
        /// Canvas-space position of the node when the drag started.
        original_position: Position,
        /// Screen-space pointer position when the drag started.
        pointer_origin: Position,
    },
}

impl DragState {
    pub fn is_idle(&self) -> bool {
        matches!(self, DragState::Idle)
    }

    pub fn node_id(&self) -> Option<&NodeId> {
        match self {
            DragState::Idle => None,
            DragState::Dragging { node_id, .. } => Some(node_id),
        }
    }

    /// Canvas-space position of the dragged node for a screen-space pointer.
    ///
    /// Pointer movement is divided by `zoom` so that a node follows the cursor
    /// at every zoom level.
    pub fn position_for(&self, pointer: Position, zoom: f64) -> Option<Position> {
        match self {
            DragState::Idle => None,
            DragState::Dragging {
                original_position,
                pointer_origin,
                ..
            } => Some(*original_position + (pointer - *pointer_origin).scale(1.0 / zoom)),
        }
    }
}

/// A position change produced by a drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragUpdate {
    pub node_id: NodeId,
    pub position: Position,
}
