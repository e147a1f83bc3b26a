//! Authoring checks for a sequence.
//!
//! None of these stop a sequence from being saved. They flag steps an editor
//! should highlight before the campaign is launched.

use super::content::StepContent;
use super::graph::SequenceGraph;
use super::types::{NodeId, NodeKind};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    #[error("Node '{node_id}' follows '{parent_id}', which no longer exists")]
    OrphanedNode { node_id: NodeId, parent_id: NodeId },

    #[error("Email '{0}' has no subject")]
    MissingSubject(NodeId),

    #[error("Step '{0}' has no message body")]
    MissingMessage(NodeId),

    #[error("Manual task '{0}' has no title")]
    MissingTaskTitle(NodeId),

    #[error("Condition '{0}' has neither a yes nor a no branch")]
    DeadEndCondition(NodeId),
}

impl ValidationIssue {
    pub fn node_id(&self) -> &NodeId {
        match self {
            ValidationIssue::OrphanedNode { node_id, .. } => node_id,
            ValidationIssue::MissingSubject(node_id)
            | ValidationIssue::MissingMessage(node_id)
            | ValidationIssue::MissingTaskTitle(node_id)
            | ValidationIssue::DeadEndCondition(node_id) => node_id,
        }
    }
}

impl SequenceGraph {
    /// Runs every authoring check, reporting issues in node insertion order.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        for node in self.nodes() {
            let id = node.id();

            if let Some(parent_id) = node.parent_id() {
                if !self.contains(parent_id.as_str()) {
                    issues.push(ValidationIssue::OrphanedNode {
                        node_id: id.clone(),
                        parent_id: parent_id.clone(),
                    });
                }
            }

            match node.content() {
                StepContent::Email(email) => {
                    if email.subject.trim().is_empty() {
                        issues.push(ValidationIssue::MissingSubject(id.clone()));
                    }
                    if email.message.trim().is_empty() {
                        issues.push(ValidationIssue::MissingMessage(id.clone()));
                    }
                }
                StepContent::LinkedinMessage(linkedin) if linkedin.message.trim().is_empty() => {
                    issues.push(ValidationIssue::MissingMessage(id.clone()));
                }
                StepContent::ManualTask(task) if task.title.trim().is_empty() => {
                    issues.push(ValidationIssue::MissingTaskTitle(id.clone()));
                }
                _ => {}
            }

            if node.kind() == NodeKind::Condition
                && self
                    .connections(id.as_str())
                    .is_none_or(|connections| connections.is_leaf())
            {
                issues.push(ValidationIssue::DeadEndCondition(id.clone()));
            }
        }
        issues
    }
}
