use crate::sequence::ParentLink;

/// A pending "add step" interaction.
///
/// Opening the step chooser yields one of these; the chooser hands it back
/// together with the picked step type. It records where the new step goes, so
/// nothing about the pending attachment lives outside the value itself.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "an add-step request does nothing until it is completed"]
pub struct AddStepRequest {
    parent: Option<ParentLink>,
}

impl AddStepRequest {
    pub(super) fn new(parent: Option<ParentLink>) -> Self {
        Self { parent }
    }

    /// Where the new step will be attached; `None` for a new root.
    pub fn parent(&self) -> Option<&ParentLink> {
        self.parent.as_ref()
    }

    pub(super) fn into_parent(self) -> Option<ParentLink> {
        self.parent
    }
}
