//! The canonical sequence graph: typed nodes, parent-pointer edges labelled by
//! branch, and the adjacency derived from them.

mod adjacency;
mod builder;
mod content;
mod graph;
mod node;
mod types;
mod validation;

pub use adjacency::{Adjacency, Connections, derive_adjacency};
pub use builder::SequenceBuilder;
pub use content::{
    Attachment, AttachmentCategory, ContentPatch, EmailContent, LinkedinInvitationContent,
    LinkedinMessageContent, LinkedinVisitContent, ManualTaskContent, OpaqueContent, StepContent,
    TaskDue, TaskPriority,
};
pub use graph::SequenceGraph;
pub use node::SequenceNode;
pub use types::{
    ActionType, Branch, ConditionType, DelayUnit, NodeId, NodeKind, ParentLink, Position,
    Schedule, StepType,
};
pub use validation::ValidationIssue;
