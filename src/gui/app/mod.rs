mod modals;

use std::{
    path::Path,
    sync::Arc,
};

use eframe::egui;
use egui_ltreeview::TreeViewState;
use modals::{
    EditData,
    Modals,
    NewPoemData,
};

use super::{
    actions::{
        ActionQueue,
        UiAction,
    },
    modal::ModalResult,
    parallel_view::parallel_table,
    poem_tree::{
        DeleteTarget,
        EditTarget,
        NodeActions,
        PoemTree,
        TreeNodeId,
    },
    top_bar::TopBar,
};
use crate::core::{
    MutationReport,
    PoemField,
    PoemStore,
    PoemkitError,
    ToolConfig,
};

pub struct PoemEditorApp {
    // Data
    config: ToolConfig,
    store: PoemStore,
    tree: PoemTree,

    // UI State
    tree_state: TreeViewState<TreeNodeId>,
    filter: String,
    status: String,
    actions: ActionQueue,

    // Modals
    modals: Modals,
}

impl PoemEditorApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: ToolConfig, store: PoemStore) -> Self {
        if let Some(font) = &config.ui_font {
            setup_fonts(&cc.egui_ctx, font);
        }

        let tree = PoemTree::build(&store);
        let mut app = Self {
            config,
            store,
            tree,
            tree_state: TreeViewState::default(),
            filter: String::new(),
            status: String::new(),
            actions: ActionQueue::new(),
            modals: Modals::default(),
        };

        app.report_load_errors();
        app
    }

    fn selected_node(&self) -> Option<TreeNodeId> {
        // Selection can outlive its poem after a delete or reload
        self.tree_state
            .selected()
            .first()
            .filter(|node| self.tree.find(node.poem_id()).is_some())
            .cloned()
    }

    fn report_load_errors(&mut self) {
        if self.store.load_errors().is_empty() {
            return;
        }

        let details =
            self.store.load_errors().iter().map(|(lang, error)| format!("{}: {}", lang, error)).collect();
        self.modals.error.show_error(
            "Some Languages Not Loaded",
            format!(
                "Loaded {} of {} languages. Navigating by {}.",
                self.store.loaded_languages().len(),
                self.store.languages().len(),
                self.store.canonical_language()
            ),
            details,
        );
    }

    fn handle_report(&mut self, report: MutationReport) {
        if report.any_applied() {
            self.tree = PoemTree::build(&self.store);
        }
        self.status = report.summary();

        let warnings = report.warnings();
        if !warnings.is_empty() {
            self.modals.error.show_error(
                "Not Applied Everywhere",
                format!("{} skipped or failed in {} language(s).", report.description, warnings.len()),
                warnings,
            );
        }
    }
}

fn setup_fonts(ctx: &egui::Context, path: &Path) {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Could not read UI font {}: {}", path.display(), e);
            return;
        }
    };

    let mut fonts = egui::FontDefinitions::default();
    fonts.font_data.insert("ui_font".to_owned(), Arc::new(egui::FontData::from_owned(bytes)));

    // Fallback after the default fonts, which lack CJK glyphs
    fonts.families.entry(egui::FontFamily::Proportional).or_default().push("ui_font".to_owned());
    fonts.families.entry(egui::FontFamily::Monospace).or_default().push("ui_font".to_owned());

    ctx.set_fonts(fonts);
    tracing::info!("Loaded UI font {}", path.display());
}

impl eframe::App for PoemEditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let selected = self.selected_node();
        let node_actions = if self.modals.any_open() {
            NodeActions::default()
        } else {
            selected.as_ref().map(TreeNodeId::actions).unwrap_or_default()
        };

        TopBar::show(
            ctx,
            &node_actions,
            &mut self.actions,
            self.store.canonical_language(),
            self.store.loaded_languages().len(),
            self.store.languages().len(),
            &self.status,
        );

        egui::SidePanel::right("parallel_view").resizable(true).default_width(520.0).show(ctx, |ui| {
            match selected.as_ref().and_then(|node| self.tree.find(node.poem_id())) {
                Some(poem) => parallel_table(ui, poem),
                None => {
                    ui.weak("Select a poem to compare its languages.");
                }
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Filter:");
                ui.text_edit_singleline(&mut self.filter);
                if !self.filter.is_empty() && ui.small_button("✖").clicked() {
                    self.filter.clear();
                }
            });
            ui.separator();

            egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                self.tree.show(ui, &mut self.tree_state, &self.filter);
            });
        });

        self.show_modals(ctx);
        self.process_actions();
    }
}

impl PoemEditorApp {
    fn show_modals(&mut self, ctx: &egui::Context) {
        self.modals.error.show(ctx);

        let edit = self.modals.edit.show(ctx, |ui, data| {
            let single_language = match &data.target {
                Some(EditTarget::Content { language, .. }) => {
                    ui.label(format!("Only the {} file is changed.", language));
                    true
                }
                _ => {
                    ui.label("Applies to every loaded language.");
                    false
                }
            };
            ui.add_space(4.0);

            let rows = if single_language { 3 } else { 1 };
            ui.add(
                egui::TextEdit::multiline(&mut data.text).desired_rows(rows).desired_width(f32::INFINITY),
            );
        });
        if let Some(ModalResult::Confirmed(data)) = edit {
            self.apply_edit(data);
        }

        let delete = self.modals.confirm_delete.show(ctx, |ui, target| {
            let message = match target {
                Some(DeleteTarget::Poem(poem_id)) => {
                    format!("Delete poem {} from every loaded language?", poem_id)
                }
                Some(DeleteTarget::Sentence { poem_id, senid }) => {
                    format!("Delete sentence {} of poem {} from every loaded language?", senid, poem_id)
                }
                None => String::new(),
            };
            ui.label(message);
        });
        if let Some(ModalResult::Confirmed(Some(target))) = delete {
            let report = match target {
                DeleteTarget::Poem(poem_id) => self.store.delete_poem(&poem_id),
                DeleteTarget::Sentence { poem_id, senid } => self.store.delete_sentence(&poem_id, senid),
            };
            self.handle_report(report);
        }

        let add_poem = self.modals.add_poem.show(ctx, |ui, data| {
            egui::Grid::new("add_poem_grid").num_columns(2).spacing([8.0, 6.0]).show(ui, |ui| {
                ui.label("id");
                ui.text_edit_singleline(&mut data.id);
                ui.end_row();
                ui.label("title");
                ui.text_edit_singleline(&mut data.title);
                ui.end_row();
                ui.label("author");
                ui.text_edit_singleline(&mut data.author);
                ui.end_row();
            });
        });
        if let Some(ModalResult::Confirmed(data)) = add_poem {
            match self.store.add_poem(&data.id, &data.title, &data.author) {
                Ok(report) => self.handle_report(report),
                Err(e) => self.modals.error.show_error("Cannot Add Poem", e.to_string(), Vec::new()),
            }
        }
    }

    fn process_actions(&mut self) {
        let actions: Vec<UiAction> = self.actions.drain().collect();

        for action in actions {
            match action {
                UiAction::BeginEdit(target) => self.begin_edit(target),
                UiAction::BeginDelete(target) => {
                    self.modals.confirm_delete.open_with("Confirm Delete", Some(target));
                }
                UiAction::AddSentence(poem_id) => {
                    let (senid, report) = self.store.add_sentence(&poem_id);
                    tracing::debug!("New sentence {} in poem {}", senid, poem_id);
                    self.handle_report(report);
                }
                UiAction::BeginAddPoem => {
                    self.modals.add_poem.open_with("Add Poem", NewPoemData::default());
                }
                UiAction::Reload => self.reload(),
                UiAction::OpenDataFolder => self.open_data_folder(),
            }
        }
    }

    fn begin_edit(&mut self, target: EditTarget) {
        let current = match &target {
            EditTarget::Field { poem_id, field } => self
                .store
                .poem(self.store.canonical_language(), poem_id)
                .map(|poem| (format!("Edit {}", field.label()), poem.field(*field).to_string()))
                .ok_or_else(|| PoemkitError::UnknownPoem(poem_id.clone())),
            EditTarget::Content { poem_id, senid, language } => self
                .store
                .poem(language, poem_id)
                .and_then(|poem| poem.sentence(*senid))
                .map(|sentence| {
                    (format!("Edit sentence {} ({})", senid, language), sentence.content.clone())
                })
                .ok_or_else(|| PoemkitError::UnknownSentence { poem_id: poem_id.clone(), senid: *senid }),
        };

        match current {
            Ok((title, text)) => {
                self.modals.edit.open_with(title, EditData { target: Some(target), text });
            }
            Err(e) => self.modals.error.show_error("Nothing To Edit", e.to_string(), Vec::new()),
        }
    }

    fn apply_edit(&mut self, data: EditData) {
        let Some(target) = data.target else {
            return;
        };

        match target {
            EditTarget::Field { poem_id, field } => {
                match self.store.edit_poem_field(&poem_id, field, &data.text) {
                    Ok(report) => {
                        if field == PoemField::Id && report.any_applied() {
                            self.tree_state = TreeViewState::default();
                        }
                        self.handle_report(report);
                    }
                    Err(e) => {
                        self.modals.error.show_error("Invalid Edit", e.to_string(), Vec::new());
                    }
                }
            }
            EditTarget::Content { poem_id, senid, language } => {
                match self.store.edit_sentence_content(&language, &poem_id, senid, &data.text) {
                    Ok(report) => self.handle_report(report),
                    Err(e) => {
                        self.modals.error.show_error("Invalid Edit", e.to_string(), Vec::new());
                    }
                }
            }
        }
    }

    fn reload(&mut self) {
        match self.store.reload() {
            Ok(()) => {
                self.tree = PoemTree::build(&self.store);
                self.status = format!("Reloaded {} languages", self.store.loaded_languages().len());
                tracing::info!("{}", self.status);
                self.report_load_errors();
            }
            Err(e) => self.modals.error.show_error("Reload Failed", e.to_string(), Vec::new()),
        }
    }

    fn open_data_folder(&mut self) {
        let Some(folder) = rfd::FileDialog::new().set_directory(self.store.data_dir()).pick_folder()
        else {
            return;
        };

        let mut config = self.config.clone();
        config.data_dir = folder;

        match PoemStore::load(&config) {
            Ok(store) => {
                self.store = store;
                self.config = config;
                self.tree = PoemTree::build(&self.store);
                self.tree_state = TreeViewState::default();
                self.filter.clear();

                if let Err(e) = self.config.save() {
                    self.modals.error.show_error("Settings Not Saved", e.to_string(), Vec::new());
                    return;
                }
                self.report_load_errors();
            }
            Err(e) => {
                self.modals.error.show_error(
                    "Cannot Open Folder",
                    e.to_string(),
                    vec![config.data_dir.display().to_string()],
                );
            }
        }
    }
}
