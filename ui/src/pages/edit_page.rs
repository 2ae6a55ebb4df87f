//! Add/edit form for a single record.

use egui::{RichText, Ui};
use estate_business::form::humanize;
use estate_business::{EditForm, Notifications, Resource, ResourceScreen, Route};
use estate_states::{StateCtx, Time};

pub fn edit_page<R: Resource>(ctx: &mut StateCtx, ui: &mut Ui) {
    let mut form = ctx.state::<EditForm>().clone();
    let title = if form.is_insert() {
        format!("Add {}", R::KIND.singular())
    } else {
        format!("Edit {}", R::KIND.singular())
    };
    ui.heading(title);
    ui.add_space(8.0);

    let errors = form.errors().clone();
    let mut edited = false;
    egui::ScrollArea::vertical()
        .max_height((ui.available_height() - 48.0).max(120.0))
        .show(ui, |ui| {
            egui::Grid::new(("edit-form", R::KIND.title()))
                .num_columns(2)
                .spacing([16.0, 6.0])
                .show(ui, |ui| {
                    for field in form.fields_mut() {
                        let required = R::REQUIRED_FIELDS.contains(&field.key.as_str());
                        let label = if required {
                            format!("{} *", humanize(&field.key))
                        } else {
                            humanize(&field.key)
                        };
                        ui.label(label);
                        ui.vertical(|ui| {
                            edited |= ui
                                .add(
                                    egui::TextEdit::singleline(&mut field.value)
                                        .desired_width(320.0),
                                )
                                .changed();
                            if let Some(message) = errors.get(&field.key) {
                                ui.label(
                                    RichText::new(message)
                                        .small()
                                        .color(ui.visuals().error_fg_color),
                                );
                            }
                        });
                        ui.end_row();
                    }
                });
        });
    if edited {
        *ctx.state_mut::<EditForm>() = form;
    }

    ui.separator();
    ui.horizontal(|ui| {
        if ui.button("Save").clicked() && !ResourceScreen::<R>::submit_form(ctx) {
            let now = ctx.state::<Time>().now();
            ctx.update::<Notifications>(|notes| {
                notes.error("Fill in the required fields", now);
            });
        }
        if ui.button("Cancel").clicked() {
            let back = ctx.state::<Route>().back();
            *ctx.state_mut::<Route>() = back;
        }
    });
}
