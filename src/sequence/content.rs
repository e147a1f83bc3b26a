use super::types::{ActionType, ParentLink, StepType};
use crate::flat::FlatContent;
use crate::template::TemplateField;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

/// When a manual task falls due. A fixed date takes precedence over a day count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum TaskDue {
    #[default]
    None,
    Days(u32),
    /// ISO-8601 date or timestamp, stored as given.
    Date(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentCategory {
    Image,
    Document,
}

/// A file attached to an outgoing message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: String,
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub category: AttachmentCategory,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailContent {
    pub subject: String,
    pub message: String,
    pub email_addresses: Vec<String>,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkedinMessageContent {
    pub message: String,
    pub linkedin_account: Option<String>,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkedinInvitationContent {
    /// Optional note sent with the invitation.
    pub message: String,
    pub linkedin_account: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkedinVisitContent {
    pub linkedin_account: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualTaskContent {
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub due: TaskDue,
}

/// The type-specific payload of a step. Each variant only carries the fields
/// its step type uses.
#[derive(Debug, Clone, PartialEq)]
pub enum StepContent {
    Email(EmailContent),
    LinkedinMessage(LinkedinMessageContent),
    LinkedinInvitation(LinkedinInvitationContent),
    LinkedinVisit(LinkedinVisitContent),
    ManualTask(ManualTaskContent),
    Condition,
    /// Content of an unrecognized step, kept exactly as imported.
    Opaque(OpaqueContent),
}

/// A step of a type this crate does not know. It is kept so that exporting
/// loses nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpaqueContent {
    pub fields: FlatContent,
    /// The parent link the step was stored with. The step itself is a root,
    /// since nothing can say which branches it fits, but the link is written
    /// back on export until the node is moved.
    pub held_parent: Option<ParentLink>,
}

/// A partial update for [`StepContent`]. Only the `Some` fields are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentPatch {
    pub subject: Option<String>,
    pub message: Option<String>,
    pub task_title: Option<String>,
    pub task_description: Option<String>,
    pub priority: Option<TaskPriority>,
    pub due: Option<TaskDue>,
    pub email_addresses: Option<Vec<String>>,
    pub linkedin_account: Option<String>,
    pub attachments: Option<Vec<Attachment>>,
}

impl ContentPatch {
    /// A patch that sets a single text field.
    pub fn text(field: TemplateField, value: impl Into<String>) -> Self {
        let value = Some(value.into());
        match field {
            TemplateField::Subject => Self {
                subject: value,
                ..Default::default()
            },
            TemplateField::Message => Self {
                message: value,
                ..Default::default()
            },
            TemplateField::TaskTitle => Self {
                task_title: value,
                ..Default::default()
            },
            TemplateField::TaskDescription => Self {
                task_description: value,
                ..Default::default()
            },
        }
    }

    /// Wire names of the fields this patch sets.
    fn present_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        let checks: [(bool, &'static str); 9] = [
            (self.subject.is_some(), "subject"),
            (self.message.is_some(), "message"),
            (self.task_title.is_some(), "taskTitle"),
            (self.task_description.is_some(), "taskDescription"),
            (self.priority.is_some(), "priority"),
            (self.due.is_some(), "due"),
            (self.email_addresses.is_some(), "emailAddresses"),
            (self.linkedin_account.is_some(), "linkedinAccount"),
            (self.attachments.is_some(), "attachments"),
        ];
        for (present, name) in checks {
            if present {
                fields.push(name);
            }
        }
        fields
    }
}

/// Replaces `slot` with `value` and reports whether the text changed.
fn replace_text(slot: &mut String, value: Option<String>) -> bool {
    match value {
        Some(value) if *slot != value => {
            *slot = value;
            true
        }
        _ => false,
    }
}

impl StepContent {
    /// Empty content of the right shape for a freshly created step.
    pub fn for_step(step: &StepType) -> Self {
        match step {
            StepType::Action(ActionType::Email) => StepContent::Email(EmailContent::default()),
            StepType::Action(ActionType::LinkedinMessage) => {
                StepContent::LinkedinMessage(LinkedinMessageContent::default())
            }
            StepType::Action(ActionType::LinkedinInvitation) => {
                StepContent::LinkedinInvitation(LinkedinInvitationContent::default())
            }
            StepType::Action(ActionType::LinkedinVisit) => {
                StepContent::LinkedinVisit(LinkedinVisitContent::default())
            }
            StepType::Action(ActionType::ManualTask) => {
                StepContent::ManualTask(ManualTaskContent::default())
            }
            StepType::Condition(_) => StepContent::Condition,
            StepType::Unrecognized(_) => StepContent::Opaque(OpaqueContent::default()),
        }
    }

    /// Whether a patch field (by wire name) exists on this variant.
    fn accepts(&self, field: &str) -> bool {
        match self {
            StepContent::Email(_) => matches!(
                field,
                "subject" | "message" | "emailAddresses" | "attachments"
            ),
            StepContent::LinkedinMessage(_) => {
                matches!(field, "message" | "linkedinAccount" | "attachments")
            }
            StepContent::LinkedinInvitation(_) => matches!(field, "message" | "linkedinAccount"),
            StepContent::LinkedinVisit(_) => field == "linkedinAccount",
            StepContent::ManualTask(_) => matches!(
                field,
                "taskTitle" | "taskDescription" | "priority" | "due"
            ),
            StepContent::Condition | StepContent::Opaque(_) => false,
        }
    }

    /// Merges `patch` into this content.
    ///
    /// Either every field is applied or none is: the first field that does not
    /// exist on this variant is returned as the error. On success, returns
    /// whether any placeholder-bearing text changed.
    pub fn apply(&mut self, patch: ContentPatch) -> Result<bool, &'static str> {
        if let Some(field) = patch
            .present_fields()
            .into_iter()
            .find(|field| !self.accepts(field))
        {
            return Err(field);
        }

        let ContentPatch {
            subject,
            message,
            task_title,
            task_description,
            priority,
            due,
            email_addresses,
            linkedin_account,
            attachments,
        } = patch;

        let text_changed = match self {
            StepContent::Email(email) => {
                if let Some(addresses) = email_addresses {
                    email.email_addresses = addresses;
                }
                if let Some(files) = attachments {
                    email.attachments = files;
                }
                let subject_changed = replace_text(&mut email.subject, subject);
                replace_text(&mut email.message, message) || subject_changed
            }
            StepContent::LinkedinMessage(linkedin) => {
                if linkedin_account.is_some() {
                    linkedin.linkedin_account = linkedin_account;
                }
                if let Some(files) = attachments {
                    linkedin.attachments = files;
                }
                replace_text(&mut linkedin.message, message)
            }
            StepContent::LinkedinInvitation(invitation) => {
                if linkedin_account.is_some() {
                    invitation.linkedin_account = linkedin_account;
                }
                replace_text(&mut invitation.message, message)
            }
            StepContent::LinkedinVisit(visit) => {
                if linkedin_account.is_some() {
                    visit.linkedin_account = linkedin_account;
                }
                false
            }
            StepContent::ManualTask(task) => {
                if let Some(priority) = priority {
                    task.priority = priority;
                }
                if let Some(due) = due {
                    task.due = due;
                }
                let title_changed = replace_text(&mut task.title, task_title);
                replace_text(&mut task.description, task_description) || title_changed
            }
            StepContent::Condition | StepContent::Opaque(_) => false,
        };
        Ok(text_changed)
    }

    /// The text scanned for placeholders.
    pub fn template_text(&self) -> String {
        match self {
            StepContent::Email(email) => format!("{} {}", email.subject, email.message),
            StepContent::LinkedinMessage(linkedin) => linkedin.message.clone(),
            StepContent::LinkedinInvitation(invitation) => invitation.message.clone(),
            StepContent::ManualTask(task) => format!("{} {}", task.title, task.description),
            StepContent::LinkedinVisit(_) | StepContent::Condition | StepContent::Opaque(_) => {
                String::new()
            }
        }
    }

    pub fn template_field(&self, field: TemplateField) -> Option<&str> {
        match (self, field) {
            (StepContent::Email(email), TemplateField::Subject) => Some(email.subject.as_str()),
            (StepContent::Email(email), TemplateField::Message) => Some(email.message.as_str()),
            (StepContent::LinkedinMessage(linkedin), TemplateField::Message) => {
                Some(linkedin.message.as_str())
            }
            (StepContent::LinkedinInvitation(invitation), TemplateField::Message) => {
                Some(invitation.message.as_str())
            }
            (StepContent::ManualTask(task), TemplateField::TaskTitle) => Some(task.title.as_str()),
            (StepContent::ManualTask(task), TemplateField::TaskDescription) => {
                Some(task.description.as_str())
            }
            _ => None,
        }
    }

    pub(crate) fn template_field_mut(&mut self, field: TemplateField) -> Option<&mut String> {
        match (self, field) {
            (StepContent::Email(email), TemplateField::Subject) => Some(&mut email.subject),
            (StepContent::Email(email), TemplateField::Message) => Some(&mut email.message),
            (StepContent::LinkedinMessage(linkedin), TemplateField::Message) => {
                Some(&mut linkedin.message)
            }
            (StepContent::LinkedinInvitation(invitation), TemplateField::Message) => {
                Some(&mut invitation.message)
            }
            (StepContent::ManualTask(task), TemplateField::TaskTitle) => Some(&mut task.title),
            (StepContent::ManualTask(task), TemplateField::TaskDescription) => {
                Some(&mut task.description)
            }
            _ => None,
        }
    }

    /// A short human-readable line describing the step.
    pub fn summary(&self) -> Option<&str> {
        let text = match self {
            StepContent::Email(email) if !email.subject.is_empty() => &email.subject,
            StepContent::Email(email) => &email.message,
            StepContent::LinkedinMessage(linkedin) => &linkedin.message,
            StepContent::LinkedinInvitation(invitation) => &invitation.message,
            StepContent::ManualTask(task) => &task.title,
            StepContent::LinkedinVisit(_) | StepContent::Condition | StepContent::Opaque(_) => {
                return None;
            }
        };
        (!text.is_empty()).then_some(text.as_str())
    }
}
