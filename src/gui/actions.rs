use super::poem_tree::{
    DeleteTarget,
    EditTarget,
};

// Panels push actions here instead of mutating the store mid-frame
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    BeginEdit(EditTarget),
    BeginDelete(DeleteTarget),
    AddSentence(String),
    BeginAddPoem,
    Reload,
    OpenDataFolder,
}

pub struct ActionQueue {
    actions: Vec<UiAction>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self { actions: Vec::new() }
    }

    pub fn push(&mut self, action: UiAction) {
        self.actions.push(action);
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, UiAction> {
        self.actions.drain(..)
    }
}

impl Default for ActionQueue {
    fn default() -> Self {
        Self::new()
    }
}
