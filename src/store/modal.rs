//! Modal UI state, decoupled from any presentation internals.

use crate::models::Vocabulary;

/// Open/closed state plus an optional payload for one modal.
#[derive(Debug)]
pub struct ModalState<T> {
    open: bool,
    payload: Option<T>,
}

impl<T> Default for ModalState<T> {
    fn default() -> Self {
        Self {
            open: false,
            payload: None,
        }
    }
}

impl<T> ModalState<T> {
    pub fn open(&mut self, payload: Option<T>) {
        self.payload = payload;
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.payload = None;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }
}

/// Which form the vocabulary modal shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VocabModalMode {
    #[default]
    Single,
    Bulk,
    Edit,
}

/// State for the add/edit vocabulary modal. Edit mode carries the word being
/// edited as the payload.
#[derive(Debug, Default)]
pub struct VocabModal {
    mode: VocabModalMode,
    state: ModalState<Vocabulary>,
}

impl VocabModal {
    pub fn open_single(&mut self) {
        self.mode = VocabModalMode::Single;
        self.state.open(None);
    }

    pub fn open_bulk(&mut self) {
        self.mode = VocabModalMode::Bulk;
        self.state.open(None);
    }

    pub fn open_edit(&mut self, word: Vocabulary) {
        self.mode = VocabModalMode::Edit;
        self.state.open(Some(word));
    }

    pub fn close(&mut self) {
        self.mode = VocabModalMode::Single;
        self.state.close();
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn mode(&self) -> VocabModalMode {
        self.mode
    }

    pub fn editing_word(&self) -> Option<&Vocabulary> {
        self.state.payload()
    }
}

/// Prompt text shown by the shared confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub message: String,
}

/// State for the confirmation dialog. Instead of a callback it carries the
/// action being guarded; the caller takes it back with [`ConfirmModal::confirm`].
#[derive(Debug)]
pub struct ConfirmModal<A> {
    state: ModalState<(ConfirmPrompt, A)>,
}

impl<A> Default for ConfirmModal<A> {
    fn default() -> Self {
        Self {
            state: ModalState::default(),
        }
    }
}

impl<A> ConfirmModal<A> {
    pub fn open(&mut self, title: impl Into<String>, message: impl Into<String>, action: A) {
        let prompt = ConfirmPrompt {
            title: title.into(),
            message: message.into(),
        };
        self.state.open(Some((prompt, action)));
    }

    /// Dismiss the dialog, discarding the pending action.
    pub fn close(&mut self) {
        self.state.close();
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn prompt(&self) -> Option<&ConfirmPrompt> {
        self.state.payload().map(|(prompt, _)| prompt)
    }

    /// Accept the dialog: closes it and hands back the pending action.
    pub fn confirm(&mut self) -> Option<A> {
        let action = self.state.payload.take().map(|(_, action)| action);
        self.state.close();
        action
    }
}
