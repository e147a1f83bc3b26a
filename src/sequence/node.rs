use super::content::StepContent;
use super::types::{NodeId, NodeKind, ParentLink, Position, Schedule, StepType};
use crate::template::{VariableKey, extract_variables};
use std::collections::BTreeSet;

/// One step or decision point of a campaign sequence.
///
/// Fields are only reachable through accessors so that the derived
/// `variables` set cannot drift from the node's text.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceNode {
    id: NodeId,
    step: StepType,
    schedule: Schedule,
    content: StepContent,
    variables: BTreeSet<VariableKey>,
    parent: Option<ParentLink>,
    position: Position,
}

impl SequenceNode {
    pub(crate) fn new(id: NodeId, step: StepType) -> Self {
        let content = StepContent::for_step(&step);
        Self {
            id,
            step,
            schedule: Schedule::default(),
            content,
            variables: BTreeSet::new(),
            parent: None,
            position: Position::default(),
        }
    }

    /// Builds a node from already-decoded parts and derives its variables.
    pub(crate) fn from_parts(
        id: NodeId,
        step: StepType,
        schedule: Schedule,
        content: StepContent,
        parent: Option<ParentLink>,
        position: Position,
    ) -> Self {
        let mut node = Self {
            id,
            step,
            schedule,
            content,
            variables: BTreeSet::new(),
            parent,
            position,
        };
        node.sync_variables();
        node
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn step(&self) -> &StepType {
        &self.step
    }

    pub fn kind(&self) -> NodeKind {
        self.step.kind()
    }

    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    pub fn content(&self) -> &StepContent {
        &self.content
    }

    /// Allowed placeholder keys referenced by this node's text.
    pub fn variables(&self) -> &BTreeSet<VariableKey> {
        &self.variables
    }

    pub fn parent(&self) -> Option<&ParentLink> {
        self.parent.as_ref()
    }

    pub fn parent_id(&self) -> Option<&NodeId> {
        self.parent.as_ref().map(|link| &link.parent_id)
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Recomputes `variables` from the template text.
    /// Writes only when the set differs; returns whether it wrote.
    pub(crate) fn sync_variables(&mut self) -> bool {
        let computed = extract_variables(&self.content.template_text());
        if computed == self.variables {
            return false;
        }
        self.variables = computed;
        true
    }

    pub(crate) fn content_mut(&mut self) -> &mut StepContent {
        &mut self.content
    }

    pub(crate) fn set_parent(&mut self, parent: Option<ParentLink>) {
        self.parent = parent;
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub(crate) fn set_schedule(&mut self, schedule: Schedule) {
        self.schedule = schedule;
    }
}
