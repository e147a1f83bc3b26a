//! Common test utilities for building sequences and flat records.
use keiro::flat::FlatContent;
use keiro::prelude::*;

/// Email root, a connection check under it, and one step on each branch.
///
/// `intro` (email) -> `check` (linkedin-connection-check)
///   yes -> `message` (linkedin-message), no -> `task` (manual-task)
#[allow(dead_code)]
pub fn create_branching_graph() -> SequenceGraph {
    SequenceBuilder::new()
        .step("intro", ActionType::Email, None)
        .step(
            "check",
            ConditionType::LinkedinConnectionCheck,
            Some(("intro", Branch::Main)),
        )
        .step(
            "message",
            ActionType::LinkedinMessage,
            Some(("check", Branch::Yes)),
        )
        .step("task", ActionType::ManualTask, Some(("check", Branch::No)))
        .build()
        .expect("Failed to build branching graph")
}

/// The welcome scenario: an email, an open check, a call on yes and a follow
/// up email on no.
#[allow(dead_code)]
pub fn create_welcome_graph() -> SequenceGraph {
    SequenceBuilder::new()
        .step("a-welcome", ActionType::Email, None)
        .text("a-welcome", TemplateField::Subject, "Welcome")
        .text("a-welcome", TemplateField::Message, "Hi {{first_name}}")
        .step(
            "b-opened",
            ConditionType::EmailOpened,
            Some(("a-welcome", Branch::Main)),
        )
        .schedule("b-opened", Schedule::new(2, DelayUnit::Days))
        .step(
            "c-call",
            ActionType::ManualTask,
            Some(("b-opened", Branch::Yes)),
        )
        .text("c-call", TemplateField::TaskTitle, "Call {{name}}")
        .step("d-follow", ActionType::Email, Some(("b-opened", Branch::No)))
        .text("d-follow", TemplateField::Subject, "Follow up")
        .text("d-follow", TemplateField::Message, "Just checking in.")
        .build()
        .expect("Failed to build welcome graph")
}

/// A bare flat step with no content, position or schedule.
#[allow(dead_code)]
pub fn flat_step(id: &str, step_type: &str, parent: Option<(&str, Branch)>) -> FlatStep {
    FlatStep {
        id: id.to_string(),
        step_type: step_type.to_string(),
        parent_id: parent.map(|(parent_id, _)| parent_id.to_string()),
        parent_branch: parent.map(|(_, branch)| branch),
        x: None,
        y: None,
        content: FlatContent::default(),
    }
}

/// Ids of the graph's roots, as plain strings.
#[allow(dead_code)]
pub fn root_ids(graph: &SequenceGraph) -> Vec<String> {
    graph.roots().iter().map(|id| id.to_string()).collect()
}

/// The variables of a node, as wire strings.
#[allow(dead_code)]
pub fn variable_names(graph: &SequenceGraph, node_id: &str) -> Vec<&'static str> {
    graph
        .node(node_id)
        .expect("node should exist")
        .variables()
        .iter()
        .map(|key| key.as_str())
        .collect()
}
