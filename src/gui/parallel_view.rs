use eframe::egui;
use egui_extras::{
    Column,
    TableBuilder,
};

use super::poem_tree::PoemNode;

/// Side-by-side table of one poem: a row per senid, a column per language.
pub fn parallel_table(ui: &mut egui::Ui, poem: &PoemNode) {
    ui.heading(&poem.title);
    if !poem.author.is_empty() {
        ui.label(&poem.author);
    }
    ui.small(format!("id: {}", poem.id));
    ui.add_space(6.0);

    let Some(first) = poem.sentences.first() else {
        ui.label("No sentences.");
        return;
    };
    let languages: Vec<&str> = first.contents.iter().map(|(lang, _)| lang.as_str()).collect();

    egui::ScrollArea::horizontal().show(ui, |ui| {
        let mut table = TableBuilder::new(ui)
            .striped(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto().at_least(40.0));
        for _ in &languages {
            table = table.column(Column::initial(180.0).at_least(80.0).clip(true).resizable(true));
        }

        table
            .header(22.0, |mut header| {
                header.col(|ui| {
                    ui.strong("senid");
                });
                for language in &languages {
                    header.col(|ui| {
                        ui.strong(*language);
                    });
                }
            })
            .body(|mut body| {
                for sentence in &poem.sentences {
                    body.row(24.0, |mut row| {
                        row.col(|ui| {
                            ui.label(sentence.senid.to_string());
                        });
                        for (_, content) in &sentence.contents {
                            row.col(|ui| match content {
                                Some(text) => {
                                    ui.label(text).on_hover_text(text);
                                }
                                None => {
                                    ui.weak("(missing)");
                                }
                            });
                        }
                    });
                }
            });
    });
}
