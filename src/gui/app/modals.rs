use crate::gui::{
    error_modal::ErrorModal,
    modal::FormModal,
    poem_tree::{
        DeleteTarget,
        EditTarget,
    },
};

#[derive(Debug, Clone, Default)]
pub struct EditData {
    pub target: Option<EditTarget>,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct NewPoemData {
    pub id: String,
    pub title: String,
    pub author: String,
}

pub struct Modals {
    pub error: ErrorModal,
    pub edit: FormModal<EditData>,
    pub confirm_delete: FormModal<Option<DeleteTarget>>,
    pub add_poem: FormModal<NewPoemData>,
}

impl Modals {
    pub fn any_open(&self) -> bool {
        self.error.is_open()
            || self.edit.is_open()
            || self.confirm_delete.is_open()
            || self.add_poem.is_open()
    }
}

impl Default for Modals {
    fn default() -> Self {
        Self {
            error: ErrorModal::new(),
            edit: FormModal::new("edit_modal", "Save"),
            confirm_delete: FormModal::new("delete_modal", "Delete"),
            add_poem: FormModal::new("add_poem_modal", "Add"),
        }
    }
}
