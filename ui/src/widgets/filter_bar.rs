//! Search box, category selector, date range and "Clear Filters".
//!
//! Date fields are edited as drafts and applied on Enter or when focus leaves, so a
//! half-typed date is never validated.

use egui::{Id, Ui};
use estate_business::DataTable;
use estate_business::table::{FilterError, Searchable};

#[derive(Debug, Clone, Default)]
struct DateDrafts {
    start: String,
    end: String,
}

fn date_field(ui: &mut Ui, label: &str, draft: &mut String) -> bool {
    ui.label(label);
    let response = ui.add(
        egui::TextEdit::singleline(draft)
            .hint_text("YYYY-MM-DD")
            .desired_width(90.0),
    );
    response.lost_focus() || (response.changed() && draft.is_empty())
}

/// Returns the error of a rejected date, for the caller to report.
pub fn filter_bar<T: Searchable>(
    ui: &mut Ui,
    id: Id,
    table: &mut DataTable<T>,
    category_title: Option<&str>,
    categories: &[String],
) -> Option<FilterError> {
    let drafts_id = id.with("date-drafts");
    let mut drafts = ui
        .data(|d| d.get_temp::<DateDrafts>(drafts_id))
        .unwrap_or_else(|| DateDrafts {
            start: table.filter().start_date().unwrap_or_default().to_owned(),
            end: table.filter().end_date().unwrap_or_default().to_owned(),
        });
    let mut error = None;

    ui.horizontal_wrapped(|ui| {
        let mut query = table.filter().query().to_owned();
        ui.add(
            egui::TextEdit::singleline(&mut query)
                .hint_text("Search…")
                .desired_width(200.0),
        );
        table.set_query(query);

        if let Some(title) = category_title {
            let selected = table.filter().category().map(str::to_owned);
            let mut choice = selected.clone();
            egui::ComboBox::from_id_salt(id.with("category"))
                .selected_text(selected.as_deref().unwrap_or(title))
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut choice, None, format!("All ({title})"));
                    for category in categories {
                        ui.selectable_value(&mut choice, Some(category.clone()), category.as_str());
                    }
                });
            table.set_category(choice);
        }

        if date_field(ui, "From", &mut drafts.start) {
            if let Err(err) = table.set_start_date(&drafts.start) {
                drafts.start = table.filter().start_date().unwrap_or_default().to_owned();
                error = Some(err);
            }
        }
        if date_field(ui, "To", &mut drafts.end) {
            if let Err(err) = table.set_end_date(&drafts.end) {
                drafts.end = table.filter().end_date().unwrap_or_default().to_owned();
                error = Some(err);
            }
        }

        if ui
            .add_enabled(!table.filter().is_empty(), egui::Button::new("Clear Filters"))
            .clicked()
        {
            table.clear_filters();
            drafts = DateDrafts::default();
        }
    });

    ui.data_mut(|d| d.insert_temp(drafts_id, drafts));
    error
}
