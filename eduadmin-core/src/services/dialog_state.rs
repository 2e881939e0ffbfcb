//! 创建/编辑对话框与确认对话框状态机

use crate::types::{ConfirmDialogState, DialogKind, DialogMode, DialogState, PendingAction};

/// Create/edit dialog state machine: `Closed <-> Open(Create | Edit)`.
#[derive(Debug, Clone)]
pub struct DialogController<T> {
    state: DialogState<T>,
    submitting: bool,
}

impl<T> Default for DialogController<T> {
    fn default() -> Self {
        Self {
            state: DialogState::Closed,
            submitting: false,
        }
    }
}

impl<T> DialogController<T> {
    pub fn state(&self) -> &DialogState<T> {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn kind(&self) -> DialogKind {
        self.state.kind()
    }

    pub fn selected(&self) -> Option<&T> {
        self.state.selected()
    }

    pub fn mode(&self) -> Option<&DialogMode<T>> {
        match &self.state {
            DialogState::Closed => None,
            DialogState::Open(mode) => Some(mode),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn open_create(&mut self) {
        self.state = DialogState::Open(DialogMode::Create);
    }

    pub fn open_edit(&mut self, item: T) {
        self.state = DialogState::Open(DialogMode::Edit { selected: item });
    }

    pub fn close(&mut self) {
        self.state = DialogState::Closed;
    }

    pub fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
    }
}

/// Confirmation prompt state machine: `Idle <-> Pending`.
#[derive(Debug, Clone, Default)]
pub struct ConfirmationController {
    state: ConfirmDialogState,
}

impl ConfirmationController {
    pub fn state(&self) -> &ConfirmDialogState {
        &self.state
    }

    /// Show `prompt`, replacing any prompt still pending.
    pub fn request(&mut self, prompt: ConfirmDialogState) {
        self.state = prompt;
    }

    /// Close the prompt and hand out its action, if one was pending.
    pub fn take(&mut self) -> Option<PendingAction> {
        match std::mem::take(&mut self.state) {
            ConfirmDialogState::Idle => None,
            ConfirmDialogState::Pending { action, .. } => Some(action),
        }
    }

    /// Close the prompt, discarding its action. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.take().is_some()
    }
}
