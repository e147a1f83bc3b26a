use super::step::{FlatContent, FlatStep};
use crate::error::FlatInputWarning;
use crate::layout::LayoutConfig;
use crate::sequence::{
    ActionType, Attachment, Branch, DelayUnit, EmailContent, LinkedinInvitationContent,
    LinkedinMessageContent, LinkedinVisitContent, ManualTaskContent, NodeId, OpaqueContent, ParentLink,
    Position, Schedule, SequenceGraph, SequenceNode, StepContent, StepType, TaskDue,
};
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// When an import recomputes node positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutPolicy {
    /// Lay out everything if any step lacks `x`/`y`; otherwise keep them.
    #[default]
    WhenIncomplete,
    /// Always lay out from topology.
    Always,
    /// Keep persisted positions; steps without one go to the origin.
    Never,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImportOptions {
    pub layout_policy: LayoutPolicy,
    pub layout: LayoutConfig,
}

/// The result of importing a flat sequence: the graph plus everything that
/// had to be repaired along the way.
#[derive(Debug, Clone)]
pub struct FlatImport {
    pub graph: SequenceGraph,
    pub warnings: Vec<FlatInputWarning>,
}

impl FlatImport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// A decoded step whose parent link has not been checked yet.
struct Staged {
    node: SequenceNode,
    requested: Option<ParentLink>,
    positioned: bool,
}

/// Rebuilds a graph from persisted steps.
///
/// Never fails: malformed steps are kept as roots and reported in
/// [`FlatImport::warnings`].
pub fn from_flat(steps: Vec<FlatStep>, options: &ImportOptions) -> FlatImport {
    let mut warnings = Vec::new();
    let origin = Position::new(options.layout.origin_x, options.layout.origin_y);
    let staged = decode_steps(steps, origin, &mut warnings);

    let accepted = resolve_parents(&staged, &mut warnings);
    let accepted = break_cycles(accepted, &mut warnings);

    let complete = staged.iter().all(|s| s.positioned);
    let relayout = match options.layout_policy {
        LayoutPolicy::Always => true,
        LayoutPolicy::WhenIncomplete => !complete,
        LayoutPolicy::Never => false,
    };

    let nodes = staged
        .into_iter()
        .map(|Staged { mut node, .. }| {
            let link = accepted.get(node.id()).cloned();
            node.set_parent(link);
            node
        })
        .collect();
    let mut graph = SequenceGraph::from_nodes(nodes, options.layout.clone());
    if relayout {
        graph.relayout();
    }

    for warning in &warnings {
        log::warn!("{}", warning);
    }
    log::debug!(
        "Imported {} step(s) with {} warning(s){}",
        graph.len(),
        warnings.len(),
        if relayout { ", laid out from topology" } else { "" }
    );

    FlatImport { graph, warnings }
}

/// Decodes each step into a node, dropping duplicate ids.
fn decode_steps(
    steps: Vec<FlatStep>,
    origin: Position,
    warnings: &mut Vec<FlatInputWarning>,
) -> Vec<Staged> {
    let mut seen: AHashSet<String> = AHashSet::with_capacity(steps.len());
    let mut staged = Vec::with_capacity(steps.len());

    for step in steps {
        if !seen.insert(step.id.clone()) {
            warnings.push(FlatInputWarning::DuplicateStepId { step_id: step.id });
            continue;
        }

        let step_type = StepType::parse(&step.step_type);
        let link = step
            .parent_id
            .map(|parent_id| ParentLink::new(parent_id, step.parent_branch.unwrap_or_default()));
        let (requested, held_parent) = match &step_type {
            StepType::Unrecognized(raw) => {
                warnings.push(FlatInputWarning::UnknownStepType {
                    step_id: step.id.clone(),
                    step_type: raw.clone(),
                });
                (None, link)
            }
            _ => (link, None),
        };

        let delay = match u32::try_from(step.content.delay) {
            Ok(delay) => delay,
            Err(_) if step.content.delay < 0 => {
                warnings.push(FlatInputWarning::NegativeDelay {
                    step_id: step.id.clone(),
                    delay: step.content.delay,
                });
                0
            }
            Err(_) => {
                warnings.push(FlatInputWarning::DelayTooLarge {
                    step_id: step.id.clone(),
                    delay: step.content.delay,
                });
                u32::MAX
            }
        };
        let schedule = Schedule::new(delay, step.content.delay_unit);

        let (position, positioned) = match (step.x, step.y) {
            (Some(x), Some(y)) => (Position::new(x, y), true),
            _ => (origin, false),
        };

        let content = decode_content(&step_type, &step.content, held_parent);
        let node = SequenceNode::from_parts(
            NodeId::from(step.id.clone()),
            step_type,
            schedule,
            content,
            None,
            position,
        );

        let opaque = matches!(node.content(), StepContent::Opaque(_));
        if let Some(stored) = step.content.variables.as_ref().filter(|_| !opaque) {
            let stored: AHashSet<&str> = stored.iter().map(String::as_str).collect();
            let derived: AHashSet<&str> = node.variables().iter().map(|key| key.as_str()).collect();
            if stored != derived {
                warnings.push(FlatInputWarning::StaleVariables { step_id: step.id });
            }
        }

        staged.push(Staged {
            node,
            requested,
            positioned,
        });
    }
    staged
}

fn decode_content(
    step_type: &StepType,
    flat: &FlatContent,
    held_parent: Option<ParentLink>,
) -> StepContent {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    let list = |value: &Option<Vec<Attachment>>| value.clone().unwrap_or_default();

    match step_type {
        StepType::Action(ActionType::Email) => StepContent::Email(EmailContent {
            subject: text(&flat.subject),
            message: text(&flat.message),
            email_addresses: flat.email_addresses.clone().unwrap_or_default(),
            attachments: list(&flat.attachments),
        }),
        StepType::Action(ActionType::LinkedinMessage) => {
            StepContent::LinkedinMessage(LinkedinMessageContent {
                message: text(&flat.message),
                linkedin_account: flat.linkedin_account.clone(),
                attachments: list(&flat.attachments),
            })
        }
        StepType::Action(ActionType::LinkedinInvitation) => {
            StepContent::LinkedinInvitation(LinkedinInvitationContent {
                message: text(&flat.message),
                linkedin_account: flat.linkedin_account.clone(),
            })
        }
        StepType::Action(ActionType::LinkedinVisit) => {
            StepContent::LinkedinVisit(LinkedinVisitContent {
                linkedin_account: flat.linkedin_account.clone(),
            })
        }
        StepType::Action(ActionType::ManualTask) => {
            // A fixed date wins over a day count.
            let due = match (&flat.due_date, flat.due_days) {
                (Some(date), _) => TaskDue::Date(date.clone()),
                (None, Some(days)) => TaskDue::Days(days),
                (None, None) => TaskDue::None,
            };
            StepContent::ManualTask(ManualTaskContent {
                title: text(&flat.task_title),
                description: text(&flat.task_description),
                priority: flat.priority.unwrap_or_default(),
                due,
            })
        }
        StepType::Condition(_) => StepContent::Condition,
        StepType::Unrecognized(_) => StepContent::Opaque(OpaqueContent {
            fields: FlatContent {
                delay: 0,
                delay_unit: DelayUnit::default(),
                ..flat.clone()
            },
            held_parent,
        }),
    }
}

/// Accepts each requested parent link that points at an existing node, uses a
/// branch the parent can emit, and finds that branch free. Steps are examined
/// in id order so the outcome does not depend on array order.
fn resolve_parents(
    staged: &[Staged],
    warnings: &mut Vec<FlatInputWarning>,
) -> AHashMap<NodeId, ParentLink> {
    let steps: AHashMap<&NodeId, &StepType> = staged
        .iter()
        .map(|s| (s.node.id(), s.node.step()))
        .collect();
    let mut taken: AHashMap<(&NodeId, Branch), &NodeId> = AHashMap::new();
    let mut accepted = AHashMap::with_capacity(staged.len());

    for s in staged.iter().sorted_by(|a, b| a.node.id().cmp(b.node.id())) {
        let Some(link) = &s.requested else {
            continue;
        };
        let step_id = s.node.id();

        let Some(parent_step) = steps.get(&link.parent_id) else {
            warnings.push(FlatInputWarning::MissingParent {
                step_id: step_id.to_string(),
                parent_id: link.parent_id.to_string(),
            });
            continue;
        };
        if !parent_step.allows_branch(link.branch) {
            warnings.push(FlatInputWarning::BranchNotAllowed {
                step_id: step_id.to_string(),
                parent_id: link.parent_id.to_string(),
                branch: link.branch,
            });
            continue;
        }
        if let Some(occupant) = taken.get(&(&link.parent_id, link.branch)) {
            warnings.push(FlatInputWarning::BranchOccupied {
                step_id: step_id.to_string(),
                parent_id: link.parent_id.to_string(),
                branch: link.branch,
                occupant: occupant.to_string(),
            });
            continue;
        }

        taken.insert((&link.parent_id, link.branch), step_id);
        accepted.insert(step_id.clone(), link.clone());
    }
    accepted
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    OnPath,
    Done,
}

/// Detaches one step per parent-link cycle: the smallest id on the loop.
fn break_cycles(
    mut accepted: AHashMap<NodeId, ParentLink>,
    warnings: &mut Vec<FlatInputWarning>,
) -> AHashMap<NodeId, ParentLink> {
    let starts: Vec<NodeId> = accepted.keys().cloned().sorted().collect();
    let mut state: AHashMap<NodeId, Visit> = AHashMap::with_capacity(starts.len());

    for start in starts {
        let mut path: Vec<NodeId> = Vec::new();
        let mut current = start;
        loop {
            match state.get(&current) {
                Some(Visit::Done) => break,
                Some(Visit::OnPath) => {
                    let entry = path.iter().position(|id| *id == current).unwrap_or(0);
                    if let Some(victim) = path[entry..].iter().min().cloned() {
                        accepted.remove(&victim);
                        warnings.push(FlatInputWarning::CycleBroken {
                            step_id: victim.to_string(),
                        });
                    }
                    break;
                }
                None => {
                    state.insert(current.clone(), Visit::OnPath);
                    path.push(current.clone());
                    match accepted.get(&current) {
                        Some(link) => current = link.parent_id.clone(),
                        None => break,
                    }
                }
            }
        }
        for id in path {
            state.insert(id, Visit::Done);
        }
    }
    accepted
}
