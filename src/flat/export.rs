use super::step::{FlatContent, FlatStep};
use crate::sequence::{SequenceGraph, SequenceNode, StepContent, TaskDue};

/// Flattens `graph` into persisted steps, one per node, in insertion order.
///
/// Only durable data is written: adjacency and other derived structures are
/// rebuilt on import.
pub fn to_flat(graph: &SequenceGraph) -> Vec<FlatStep> {
    graph.nodes().iter().map(flatten_node).collect()
}

fn flatten_node(node: &SequenceNode) -> FlatStep {
    let position = node.position();
    let parent = node.parent().or(match node.content() {
        StepContent::Opaque(opaque) => opaque.held_parent.as_ref(),
        _ => None,
    });
    FlatStep {
        id: node.id().to_string(),
        step_type: node.step().to_string(),
        parent_id: parent.map(|link| link.parent_id.to_string()),
        parent_branch: parent.map(|link| link.branch),
        x: Some(position.x),
        y: Some(position.y),
        content: flatten_content(node),
    }
}

/// `None` for an empty list, so optional arrays are omitted from the record.
fn non_empty<T>(items: &[T]) -> Option<Vec<T>>
where
    T: Clone,
{
    (!items.is_empty()).then(|| items.to_vec())
}

fn flatten_content(node: &SequenceNode) -> FlatContent {
    let schedule = node.schedule();
    let mut flat = match node.content() {
        StepContent::Opaque(opaque) => {
            return FlatContent {
                delay: i64::from(schedule.delay),
                delay_unit: schedule.unit,
                ..opaque.fields.clone()
            };
        }
        StepContent::Email(email) => FlatContent {
            subject: Some(email.subject.clone()),
            message: Some(email.message.clone()),
            email_addresses: non_empty(&email.email_addresses),
            attachments: non_empty(&email.attachments),
            ..FlatContent::default()
        },
        StepContent::LinkedinMessage(linkedin) => FlatContent {
            message: Some(linkedin.message.clone()),
            linkedin_account: linkedin.linkedin_account.clone(),
            attachments: non_empty(&linkedin.attachments),
            ..FlatContent::default()
        },
        StepContent::LinkedinInvitation(invitation) => FlatContent {
            message: Some(invitation.message.clone()),
            linkedin_account: invitation.linkedin_account.clone(),
            ..FlatContent::default()
        },
        StepContent::LinkedinVisit(visit) => FlatContent {
            linkedin_account: visit.linkedin_account.clone(),
            ..FlatContent::default()
        },
        StepContent::ManualTask(task) => {
            let (due_days, due_date) = match &task.due {
                TaskDue::None => (None, None),
                TaskDue::Days(days) => (Some(*days), None),
                TaskDue::Date(date) => (None, Some(date.clone())),
            };
            FlatContent {
                task_title: Some(task.title.clone()),
                task_description: Some(task.description.clone()),
                priority: Some(task.priority),
                due_days,
                due_date,
                ..FlatContent::default()
            }
        }
        StepContent::Condition => FlatContent::default(),
    };

    flat.delay = i64::from(schedule.delay);
    flat.delay_unit = schedule.unit;
    flat.variables = Some(
        node.variables()
            .iter()
            .map(|key| key.as_str().to_string())
            .collect(),
    );
    flat
}
