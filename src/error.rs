use crate::sequence::{Branch, NodeId};
use thiserror::Error;

/// A mutation that would break the shape of the sequence graph.
///
/// Whenever one of these is returned the graph is left exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralViolation {
    #[error("Attaching node '{node_id}' under '{parent_id}' would make it its own ancestor")]
    CycleDetected { node_id: NodeId, parent_id: NodeId },

    #[error("Branch '{branch}' of node '{parent_id}' is already taken by node '{occupant}'")]
    BranchOccupied {
        parent_id: NodeId,
        branch: Branch,
        occupant: NodeId,
    },

    #[error("A '{step_type}' node ('{parent_id}') cannot emit a '{branch}' branch")]
    BranchNotAllowed {
        parent_id: NodeId,
        branch: Branch,
        step_type: String,
    },
}

/// Errors returned by graph and edit-session operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Node '{0}' not found in the sequence")]
    NodeNotFound(NodeId),

    #[error("A node with id '{0}' already exists")]
    DuplicateNodeId(NodeId),

    #[error(transparent)]
    Structural(#[from] StructuralViolation),

    #[error("Field '{field}' does not exist on a '{step_type}' step (node '{node_id}')")]
    ContentMismatch {
        node_id: NodeId,
        step_type: String,
        field: &'static str,
    },

    #[error("Structural edits are locked while node '{0}' is being dragged")]
    DragInProgress(NodeId),
}

/// Non-fatal problems found while importing a flat sequence.
///
/// Each warning names the step it was raised for. The offending step is
/// repaired (usually by turning it into a root) instead of being discarded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlatInputWarning {
    #[error("Step '{step_id}' references parent '{parent_id}', which is not part of the sequence")]
    MissingParent { step_id: String, parent_id: String },

    #[error("Step '{step_id}' has an unknown step type '{step_type}'; kept as a root step")]
    UnknownStepType { step_id: String, step_type: String },

    #[error("Step id '{step_id}' appears more than once; the later copy was dropped")]
    DuplicateStepId { step_id: String },

    #[error(
        "Step '{step_id}' hangs off the '{branch}' branch of '{parent_id}', which that node cannot emit"
    )]
    BranchNotAllowed {
        step_id: String,
        parent_id: String,
        branch: Branch,
    },

    #[error(
        "Step '{step_id}' competes with '{occupant}' for the '{branch}' branch of '{parent_id}'"
    )]
    BranchOccupied {
        step_id: String,
        parent_id: String,
        branch: Branch,
        occupant: String,
    },

    #[error("Parent links around step '{step_id}' form a cycle; the step was detached")]
    CycleBroken { step_id: String },

    #[error("Step '{step_id}' has a negative delay ({delay}); clamped to 0")]
    NegativeDelay { step_id: String, delay: i64 },

    #[error("Step '{step_id}' has a delay ({delay}) above the supported maximum; clamped to 4294967295")]
    DelayTooLarge { step_id: String, delay: i64 },

    #[error("Stored variables of step '{step_id}' did not match its text and were recomputed")]
    StaleVariables { step_id: String },
}

impl FlatInputWarning {
    /// The id of the step this warning was raised for.
    pub fn step_id(&self) -> &str {
        match self {
            FlatInputWarning::MissingParent { step_id, .. }
            | FlatInputWarning::UnknownStepType { step_id, .. }
            | FlatInputWarning::DuplicateStepId { step_id }
            | FlatInputWarning::BranchNotAllowed { step_id, .. }
            | FlatInputWarning::BranchOccupied { step_id, .. }
            | FlatInputWarning::CycleBroken { step_id }
            | FlatInputWarning::NegativeDelay { step_id, .. }
            | FlatInputWarning::DelayTooLarge { step_id, .. }
            | FlatInputWarning::StaleVariables { step_id } => step_id,
        }
    }
}

/// Errors that can occur when decoding a flat sequence or converting a custom
/// storage format into one.
#[derive(Error, Debug, Clone)]
pub enum ConversionError {
    #[error("Failed to parse sequence JSON: {0}")]
    JsonParseError(String),

    #[error("Failed to encode sequence JSON: {0}")]
    JsonEncodeError(String),

    #[error("Invalid custom data: {0}")]
    ValidationError(String),
}
