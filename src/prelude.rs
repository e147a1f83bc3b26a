//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from the
//! keiro crate.
//!
//! # Example
//!
//! ```rust
//! use keiro::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let json = std::fs::read_to_string("path/to/sequence.json")?;
//! let import = from_json(&json, &ImportOptions::default())?;
//! for warning in &import.warnings {
//!     eprintln!("repaired: {}", warning);
//! }
//! println!("{}", OutlineFormatter::format(&import.graph));
//! # Ok(())
//! # }
//! ```

// Graph model
pub use crate::sequence::{
    ActionType, Branch, ConditionType, ContentPatch, DelayUnit, NodeId, ParentLink, Position,
    Schedule, SequenceBuilder, SequenceGraph, SequenceNode, StepContent, StepType,
    ValidationIssue,
};

// Template variables
pub use crate::template::{TemplateField, VariableKey, extract_variables};

// Persistence
pub use crate::flat::{
    FlatImport, FlatStep, ImportOptions, IntoSequence, LayoutPolicy, from_flat, from_json,
    to_flat, to_json,
};

// Layout and interaction
pub use crate::canvas::CanvasState;
pub use crate::editor::{AddStepRequest, EditSession};
pub use crate::layout::{LayoutConfig, LayoutEngine};
pub use crate::outline::OutlineFormatter;

// Error types
pub use crate::error::{ConversionError, FlatInputWarning, GraphError, StructuralViolation};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
