use super::step::FlatStep;
use crate::error::ConversionError;

/// A trait for storage records that can be turned into flat sequence steps.
///
/// This is the extension point for callers whose persistence layer does not
/// speak the flat step format directly. Implement it on your own records and
/// hand them to [`import`](crate::flat::import()).
///
/// # Example
///
/// ```rust
/// use keiro::error::ConversionError;
/// use keiro::flat::{FlatContent, FlatStep, IntoSequence};
///
/// struct Row { id: u64, kind: String, follows: Option<u64> }
/// struct Campaign { rows: Vec<Row> }
///
/// impl IntoSequence for Campaign {
///     fn into_steps(self) -> Result<Vec<FlatStep>, ConversionError> {
///         self.rows
///             .into_iter()
///             .map(|row| {
///                 if row.kind.is_empty() {
///                     return Err(ConversionError::ValidationError(format!(
///                         "row {} has no step type",
///                         row.id
///                     )));
///                 }
///                 Ok(FlatStep {
///                     id: row.id.to_string(),
///                     step_type: row.kind,
///                     parent_id: row.follows.map(|p| p.to_string()),
///                     parent_branch: None,
///                     x: None,
///                     y: None,
///                     content: FlatContent::default(),
///                 })
///             })
///             .collect()
///     }
/// }
/// ```
pub trait IntoSequence {
    /// Consumes the records and converts them into flat steps.
    fn into_steps(self) -> Result<Vec<FlatStep>, ConversionError>;
}

impl IntoSequence for Vec<FlatStep> {
    fn into_steps(self) -> Result<Vec<FlatStep>, ConversionError> {
        Ok(self)
    }
}
