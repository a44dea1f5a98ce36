use eframe::egui;

#[derive(Debug, Clone)]
pub enum ModalResult<T> {
    Confirmed(T),
    Cancelled,
}

/// A blocking dialog holding some editable form data.
pub struct FormModal<T> {
    id: &'static str,
    open: bool,
    title: String,
    confirm_text: &'static str,
    data: T,
}

impl<T: Default + Clone> FormModal<T> {
    pub fn new(id: &'static str, confirm_text: &'static str) -> Self {
        Self { id, open: false, title: String::new(), confirm_text, data: T::default() }
    }

    pub fn open_with(&mut self, title: impl Into<String>, data: T) {
        self.title = title.into();
        self.data = data;
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn show<F>(&mut self, ctx: &egui::Context, content: F) -> Option<ModalResult<T>>
    where
        F: FnOnce(&mut egui::Ui, &mut T),
    {
        if !self.open {
            return None;
        }

        let mut result = None;

        let modal = egui::Modal::new(egui::Id::new(self.id)).show(ctx, |ui| {
            ui.set_width(460.0);
            ui.heading(&self.title);
            ui.add_space(8.0);

            content(ui, &mut self.data);

            ui.add_space(12.0);
            ui.horizontal(|ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Cancel").clicked() {
                        result = Some(ModalResult::Cancelled);
                        ui.close();
                    }
                    if ui.button(self.confirm_text).clicked() {
                        result = Some(ModalResult::Confirmed(self.data.clone()));
                        ui.close();
                    }
                });
            });
        });

        if modal.should_close() {
            self.open = false;
            // Escape or a click outside counts as cancel
            return Some(result.unwrap_or(ModalResult::Cancelled));
        }

        result
    }
}
