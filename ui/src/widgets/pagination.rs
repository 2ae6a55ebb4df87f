use egui::Ui;
use estate_business::table::PageItem;

/// Prev, page numbers with ellipses, next. Returns the page the user asked for.
pub fn pagination(
    ui: &mut Ui,
    items: &[PageItem],
    current: usize,
    total_pages: usize,
) -> Option<usize> {
    let mut requested = None;
    ui.horizontal(|ui| {
        if ui
            .add_enabled(current > 1, egui::Button::new("‹ Prev"))
            .clicked()
        {
            requested = Some(current - 1);
        }
        for item in items {
            match item {
                PageItem::Page(page) => {
                    if ui
                        .selectable_label(*page == current, page.to_string())
                        .clicked()
                        && *page != current
                    {
                        requested = Some(*page);
                    }
                }
                PageItem::Ellipsis => {
                    ui.label("…");
                }
            }
        }
        if ui
            .add_enabled(current < total_pages, egui::Button::new("Next ›"))
            .clicked()
        {
            requested = Some(current + 1);
        }
        ui.label(format!("Page {current} of {total_pages}"));
    });
    requested
}
