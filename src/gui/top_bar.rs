use eframe::egui;

use super::{
    actions::{
        ActionQueue,
        UiAction,
    },
    poem_tree::NodeActions,
};

pub struct TopBar;

impl TopBar {
    pub fn show(
        ctx: &egui::Context,
        node_actions: &NodeActions,
        actions: &mut ActionQueue,
        canonical_language: &str,
        loaded: usize,
        configured: usize,
        status: &str,
    ) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                egui::widgets::global_theme_preference_switch(ui);
                ui.menu_button("File", |ui| {
                    if ui.button("Open Data Folder…").clicked() {
                        actions.push(UiAction::OpenDataFolder);
                    }
                    if ui.button("Reload").clicked() {
                        actions.push(UiAction::Reload);
                    }
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.separator();

                if ui.add_enabled(node_actions.edit.is_some(), egui::Button::new("Edit")).clicked() {
                    if let Some(target) = &node_actions.edit {
                        actions.push(UiAction::BeginEdit(target.clone()));
                    }
                }
                if ui.add_enabled(node_actions.delete.is_some(), egui::Button::new("Delete")).clicked() {
                    if let Some(target) = &node_actions.delete {
                        actions.push(UiAction::BeginDelete(target.clone()));
                    }
                }
                if ui
                    .add_enabled(node_actions.add_sentence.is_some(), egui::Button::new("Add Sentence"))
                    .clicked()
                {
                    if let Some(poem_id) = &node_actions.add_sentence {
                        actions.push(UiAction::AddSentence(poem_id.clone()));
                    }
                }
                if ui.button("Add Poem").clicked() {
                    actions.push(UiAction::BeginAddPoem);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let color = if loaded == configured {
                        egui::Color32::from_rgb(0, 200, 0)
                    } else {
                        egui::Color32::from_rgb(255, 165, 0)
                    };
                    ui.small(egui::RichText::new("●").color(color))
                        .on_hover_text(format!("{}/{} language files loaded", loaded, configured));
                    ui.small(format!("navigating by {}", canonical_language));
                    if !status.is_empty() {
                        ui.separator();
                        ui.small(status);
                    }
                });
            });
        });
    }
}
