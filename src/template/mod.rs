//! Template placeholder handling for step text.
//!
//! Step texts may reference recipient data with `{{key}}` placeholders. Only
//! the keys in [`VariableKey::ALL`] are understood by the sending backend, so
//! every node keeps a derived set of the allowed keys its text references.

use serde::{Deserialize, Serialize};
use std::fmt;

mod variables;

pub use variables::{VariableKey, extract_variables};

/// A free-text field that may carry placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TemplateField {
    Subject,
    Message,
    TaskTitle,
    TaskDescription,
}

impl TemplateField {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateField::Subject => "subject",
            TemplateField::Message => "message",
            TemplateField::TaskTitle => "taskTitle",
            TemplateField::TaskDescription => "taskDescription",
        }
    }
}

impl fmt::Display for TemplateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
