pub mod actions;
pub mod app;
pub mod error_modal;
pub mod modal;
pub mod parallel_view;
pub mod poem_tree;
pub mod top_bar;

use eframe::egui;

pub use app::PoemEditorApp;

use crate::core::{
    PoemStore,
    PoemkitError,
    ToolConfig,
};

/// Loads the store and blocks on the editor window until it is closed.
pub fn run_editor(config: ToolConfig) -> Result<(), PoemkitError> {
    let store = PoemStore::load(&config)?;
    tracing::info!(
        "Opening editor on {} ({} languages, navigating by {})",
        store.data_dir().display(),
        store.loaded_languages().len(),
        store.canonical_language()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("poemkit")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "poemkit",
        options,
        Box::new(|cc| Ok(Box::new(PoemEditorApp::new(cc, config, store)))),
    )?;

    Ok(())
}
