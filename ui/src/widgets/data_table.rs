//! The generic table: serial number, the resource's columns, and the action menu.

use egui::{Align, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use estate_business::table::{ActionMenu, TableView};
use estate_business::{Resource, RowAction};
use ustr::Ustr;

use super::action_menu::{MenuEvent, action_menu};
use crate::pages::columns::Columns;

#[derive(Debug, Clone, PartialEq)]
pub enum TableEvent<R> {
    ToggleMenu(Ustr),
    CloseMenu,
    Action(R, RowAction),
}

pub fn data_table<R: Columns>(
    ui: &mut Ui,
    view: &TableView<'_, R>,
    menu: &ActionMenu,
) -> Vec<TableEvent<R>> {
    let mut events = Vec::new();
    if view.rows.is_empty() {
        ui.add_space(12.0);
        ui.label(RichText::new("No records found").weak());
        return events;
    }

    TableBuilder::new(ui)
        .id_salt(R::KIND.title())
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::exact(40.0))
        .columns(
            Column::auto().at_least(80.0).clip(true),
            R::HEADERS.len(),
        )
        .column(Column::remainder().at_least(60.0))
        .header(22.0, |mut header| {
            header.col(|ui| {
                ui.strong("#");
            });
            for title in R::HEADERS {
                header.col(|ui| {
                    ui.strong(*title);
                });
            }
            header.col(|ui| {
                ui.strong("Actions");
            });
        })
        .body(|mut body| {
            for (offset, record) in view.rows.iter().enumerate() {
                let id = record.row_id();
                body.row(26.0, |mut row| {
                    row.col(|ui| {
                        ui.label((view.first_row_number + offset).to_string());
                    });
                    for cell in record.cells() {
                        row.col(|ui| {
                            ui.label(cell);
                        });
                    }
                    row.col(|ui| match action_menu(ui, id, menu.is_open(id), R::ACTIONS) {
                        MenuEvent::None => {}
                        MenuEvent::Toggle => events.push(TableEvent::ToggleMenu(id)),
                        MenuEvent::OutsideClick => events.push(TableEvent::CloseMenu),
                        MenuEvent::Pick(action) => {
                            events.push(TableEvent::Action((*record).clone(), action));
                        }
                    });
                });
            }
        });
    events
}
