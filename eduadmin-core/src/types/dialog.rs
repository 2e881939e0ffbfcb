//! Dialog and confirmation state records

use serde::Serialize;

use eduadmin_resource::ItemId;

use crate::messages;

/// Which form the create/edit dialog shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum DialogMode<T> {
    /// Empty form for a new record
    Create,
    /// Form pre-filled from `selected`
    Edit { selected: T },
}

impl<T> DialogMode<T> {
    /// Mode without the payload.
    #[must_use]
    pub fn kind(&self) -> DialogKind {
        match self {
            Self::Create => DialogKind::Create,
            Self::Edit { .. } => DialogKind::Edit,
        }
    }
}

/// Payload-free dialog mode, as shown to pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogKind {
    #[default]
    Create,
    Edit,
}

impl DialogKind {
    /// `"create"` or `"edit"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Edit => "edit",
        }
    }

    /// Toast text after a successful submit in this mode.
    #[must_use]
    pub fn success_message(self) -> &'static str {
        match self {
            Self::Create => messages::CREATE_SUCCESS,
            Self::Edit => messages::UPDATE_SUCCESS,
        }
    }
}

/// Create/edit dialog.
///
/// The edited item only exists while the dialog is open in edit mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DialogState<T> {
    #[default]
    Closed,
    Open(DialogMode<T>),
}

impl<T> DialogState<T> {
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    /// Current mode; `Create` while closed.
    #[must_use]
    pub fn kind(&self) -> DialogKind {
        match self {
            Self::Closed => DialogKind::default(),
            Self::Open(mode) => mode.kind(),
        }
    }

    /// Item being edited, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&T> {
        match self {
            Self::Open(DialogMode::Edit { selected }) => Some(selected),
            _ => None,
        }
    }
}

/// Destructive action waiting for confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PendingAction {
    /// Delete the record `id`, shown to the user as `name`
    Delete { id: ItemId, name: String },
}

/// "Are you sure?" prompt, independent of the create/edit dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ConfirmDialogState {
    #[default]
    Idle,
    Pending {
        title: String,
        description: String,
        action: PendingAction,
    },
}

impl ConfirmDialogState {
    /// Prompt for deleting the record `id` named `name`.
    #[must_use]
    pub fn delete(id: ItemId, name: impl Into<String>) -> Self {
        let name = name.into();
        Self::Pending {
            title: messages::CONFIRM_DELETE_TITLE.to_string(),
            description: messages::confirm_delete_description(&name),
            action: PendingAction::Delete { id, name },
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Pending { title, .. } => Some(title),
        }
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Pending { description, .. } => Some(description),
        }
    }

    #[must_use]
    pub fn action(&self) -> Option<&PendingAction> {
        match self {
            Self::Idle => None,
            Self::Pending { action, .. } => Some(action),
        }
    }
}
