use super::content::ContentPatch;
use super::graph::SequenceGraph;
use super::types::{Branch, ParentLink, Schedule, StepType};
use crate::error::GraphError;
use crate::layout::LayoutConfig;
use crate::template::TemplateField;

/// Fluent construction of a [`SequenceGraph`] with caller-chosen ids.
///
/// Steps are applied in order; the first failure is kept and returned by
/// [`build`](Self::build), and everything after it is skipped.
///
/// ```rust
/// use keiro::prelude::*;
///
/// let graph = SequenceBuilder::new()
///     .step("intro", ActionType::Email, None)
///     .text("intro", TemplateField::Subject, "Hi {{first_name}}")
///     .step("opened", ConditionType::EmailOpened, Some(("intro", Branch::Main)))
///     .step("call", ActionType::ManualTask, Some(("opened", Branch::Yes)))
///     .build()
///     .unwrap();
/// assert_eq!(graph.len(), 3);
/// ```
pub struct SequenceBuilder {
    graph: SequenceGraph,
    error: Option<GraphError>,
}

impl Default for SequenceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceBuilder {
    pub fn new() -> Self {
        Self::with_layout(LayoutConfig::default())
    }

    pub fn with_layout(layout: LayoutConfig) -> Self {
        Self {
            graph: SequenceGraph::with_layout(layout),
            error: None,
        }
    }

    fn record(&mut self, result: Result<(), GraphError>) {
        if let Err(e) = result {
            self.error = Some(e);
        }
    }

    pub fn step(
        mut self,
        id: &str,
        step: impl Into<StepType>,
        parent: Option<(&str, Branch)>,
    ) -> Self {
        if self.error.is_none() {
            let link = parent.map(|(parent_id, branch)| ParentLink::new(parent_id, branch));
            let result = self.graph.insert_node(id, step, link).map(|_| ());
            self.record(result);
        }
        self
    }

    pub fn content(mut self, id: &str, patch: ContentPatch) -> Self {
        if self.error.is_none() {
            let result = self.graph.update_content(id, patch).map(|_| ());
            self.record(result);
        }
        self
    }

    pub fn text(self, id: &str, field: TemplateField, value: &str) -> Self {
        self.content(id, ContentPatch::text(field, value))
    }

    pub fn schedule(mut self, id: &str, schedule: Schedule) -> Self {
        if self.error.is_none() {
            let result = self.graph.set_schedule(id, schedule);
            self.record(result);
        }
        self
    }

    pub fn build(self) -> Result<SequenceGraph, GraphError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.graph),
        }
    }

    /// Builds and runs a full layout pass.
    pub fn build_laid_out(self) -> Result<SequenceGraph, GraphError> {
        let mut graph = self.build()?;
        graph.relayout();
        Ok(graph)
    }
}
