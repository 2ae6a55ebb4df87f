//! Paste-to-import and copy-to-export for resources with a column contract.

use egui::{Id, Ui};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportRequest {
    /// Import the pasted text.
    Import(String),
    /// Copy the current rows as tab-separated text.
    Export,
}

pub fn import_panel(ui: &mut Ui, id: Id, columns: &[&str], busy: bool) -> Option<ImportRequest> {
    let text_id = id.with("paste");
    let mut text = ui
        .data(|d| d.get_temp::<String>(text_id))
        .unwrap_or_default();
    let mut request = None;

    egui::CollapsingHeader::new("Import / Export")
        .id_salt(id.with("section"))
        .show(ui, |ui| {
            ui.label(format!("Columns: {}", columns.join(", ")));
            ui.add(
                egui::TextEdit::multiline(&mut text)
                    .hint_text("Paste rows from a spreadsheet, header first")
                    .desired_rows(4)
                    .desired_width(f32::INFINITY),
            );
            ui.horizontal(|ui| {
                let can_import = !busy && !text.trim().is_empty();
                if ui
                    .add_enabled(can_import, egui::Button::new("Import"))
                    .clicked()
                {
                    request = Some(ImportRequest::Import(std::mem::take(&mut text)));
                }
                if busy {
                    ui.spinner();
                }
                if ui.button("Copy export").clicked() {
                    request = Some(ImportRequest::Export);
                }
            });
        });

    ui.data_mut(|d| d.insert_temp(text_id, text));
    request
}
