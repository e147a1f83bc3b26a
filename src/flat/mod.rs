//! Conversion between a [`SequenceGraph`] and the flat, parent-pointer record
//! format used for storage and transport.
//!
//! Only the flat form is durable. Everything derived from it (adjacency,
//! variables, and positions when they are missing) is rebuilt on import.

use crate::error::ConversionError;
use crate::sequence::SequenceGraph;

mod conversion;
mod export;
mod import;
mod step;

pub use conversion::IntoSequence;
pub use export::to_flat;
pub use import::{FlatImport, ImportOptions, LayoutPolicy, from_flat};
pub use step::{FlatContent, FlatStep};

/// Converts any [`IntoSequence`] source and imports it.
pub fn import<T: IntoSequence>(
    source: T,
    options: &ImportOptions,
) -> Result<FlatImport, ConversionError> {
    Ok(from_flat(source.into_steps()?, options))
}

/// Decodes a JSON array of steps.
pub fn parse_steps(json: &str) -> Result<Vec<FlatStep>, ConversionError> {
    serde_json::from_str(json).map_err(|e| ConversionError::JsonParseError(e.to_string()))
}

/// Decodes a JSON array of steps and imports it.
pub fn from_json(json: &str, options: &ImportOptions) -> Result<FlatImport, ConversionError> {
    import(parse_steps(json)?, options)
}

/// Flattens `graph` and encodes it as pretty-printed JSON.
pub fn to_json(graph: &SequenceGraph) -> Result<String, ConversionError> {
    serde_json::to_string_pretty(&to_flat(graph))
        .map_err(|e| ConversionError::JsonEncodeError(e.to_string()))
}
