use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::ops::{Add, Sub};

/// Opaque, stable identifier of a sequence node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        NodeId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        NodeId(value)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        NodeId(value.to_string())
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Label of the edge from a parent to a child.
///
/// The declaration order is the visiting order used by layout and adjacency.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Branch {
    #[default]
    Main,
    Yes,
    No,
}

impl Branch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Branch::Main => "main",
            Branch::Yes => "yes",
            Branch::No => "no",
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which edge a node hangs off: its parent and the parent's branch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParentLink {
    pub parent_id: NodeId,
    pub branch: Branch,
}

impl ParentLink {
    pub fn new(parent_id: impl Into<NodeId>, branch: Branch) -> Self {
        Self {
            parent_id: parent_id.into(),
            branch,
        }
    }

    pub fn main(parent_id: impl Into<NodeId>) -> Self {
        Self::new(parent_id, Branch::Main)
    }

    pub fn yes(parent_id: impl Into<NodeId>) -> Self {
        Self::new(parent_id, Branch::Yes)
    }

    pub fn no(parent_id: impl Into<NodeId>) -> Self {
        Self::new(parent_id, Branch::No)
    }
}

/// A point on the canvas. Also used for screen-space pointer coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Whether a node performs an action or branches on a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Action,
    Condition,
}

/// Defines a wire-string enum with its lookup table.
macro_rules! define_step_types {
    ( $(#[$meta:meta])* $name:ident { $( $variant:ident => $wire:expr ),* $(,)? } ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $( $variant ),*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),* ];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire ),*
                }
            }

            pub fn parse(value: &str) -> Option<Self> {
                match value {
                    $( $wire => Some($name::$variant), )*
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

define_step_types! {
    /// Something the campaign does for a lead.
    ActionType {
        Email => "email",
        LinkedinMessage => "linkedin-message",
        LinkedinInvitation => "linkedin-invitation",
        LinkedinVisit => "linkedin-visit",
        ManualTask => "manual-task",
    }
}

define_step_types! {
    /// A yes/no check the campaign branches on.
    ConditionType {
        EmailOpened => "email-opened",
        EmailReply => "email-reply",
        LinkedinConnectionCheck => "linkedin-connection-check",
        OpenedLinkedinMessage => "opened-linkedin-message",
        LinkedinReplyCheck => "linkedin-reply-check",
        ClickedLink => "clicked-link",
        HasLinkedin => "has-linkedin",
        HasEmail => "has-email",
        HasPhone => "has-phone",
    }
}

/// The concrete type of a step, as carried by the wire `stepType` string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StepType {
    Action(ActionType),
    Condition(ConditionType),
    /// A wire value in neither list. Kept verbatim and treated as an action.
    Unrecognized(String),
}

impl StepType {
    /// Classifies a wire string. Condition strings are checked first.
    pub fn parse(value: &str) -> Self {
        if let Some(condition) = ConditionType::parse(value) {
            StepType::Condition(condition)
        } else if let Some(action) = ActionType::parse(value) {
            StepType::Action(action)
        } else {
            StepType::Unrecognized(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            StepType::Action(action) => action.as_str(),
            StepType::Condition(condition) => condition.as_str(),
            StepType::Unrecognized(raw) => raw,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            StepType::Condition(_) => NodeKind::Condition,
            StepType::Action(_) | StepType::Unrecognized(_) => NodeKind::Action,
        }
    }

    pub fn is_condition(&self) -> bool {
        self.kind() == NodeKind::Condition
    }

    /// Conditions branch on `yes`/`no`; everything else continues on `main`.
    pub fn allows_branch(&self, branch: Branch) -> bool {
        match self.kind() {
            NodeKind::Condition => matches!(branch, Branch::Yes | Branch::No),
            NodeKind::Action => branch == Branch::Main,
        }
    }

    /// The branches a node of this type can emit, in visiting order.
    pub fn branches(&self) -> &'static [Branch] {
        match self.kind() {
            NodeKind::Condition => &[Branch::Yes, Branch::No],
            NodeKind::Action => &[Branch::Main],
        }
    }
}

impl fmt::Display for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ActionType> for StepType {
    fn from(value: ActionType) -> Self {
        StepType::Action(value)
    }
}

impl From<ConditionType> for StepType {
    fn from(value: ConditionType) -> Self {
        StepType::Condition(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DelayUnit {
    Minutes,
    Hours,
    #[default]
    Days,
}

impl DelayUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            DelayUnit::Minutes => "minutes",
            DelayUnit::Hours => "hours",
            DelayUnit::Days => "days",
        }
    }
}

/// How long the campaign waits before running a step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Schedule {
    pub delay: u32,
    pub unit: DelayUnit,
}

impl Schedule {
    pub fn new(delay: u32, unit: DelayUnit) -> Self {
        Self { delay, unit }
    }

    pub fn is_immediate(&self) -> bool {
        self.delay == 0
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.delay, self.unit.as_str())
    }
}
