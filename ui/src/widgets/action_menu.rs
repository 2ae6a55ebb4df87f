//! The "⋮" button and popup listing a row's actions.

use egui::{Area, Color32, Frame, Id, Order, RichText, Ui};
use estate_business::RowAction;
use ustr::Ustr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    None,
    Toggle,
    Pick(RowAction),
    /// The menu was open and the pointer went down somewhere else.
    OutsideClick,
}

pub fn action_menu(ui: &mut Ui, row: Ustr, open: bool, actions: &[RowAction]) -> MenuEvent {
    let button = ui
        .button("⋮")
        .on_hover_text("Actions");
    if button.clicked() {
        return MenuEvent::Toggle;
    }
    if !open {
        return MenuEvent::None;
    }

    let mut event = MenuEvent::None;
    let area = Area::new(Id::new(("row-actions", row.as_str())))
        .order(Order::Foreground)
        .fixed_pos(button.rect.left_bottom())
        .show(ui.ctx(), |ui| {
            Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_min_width(120.0);
                for action in actions {
                    let text = if action.is_destructive() {
                        RichText::new(action.label()).color(Color32::from_rgb(200, 60, 60))
                    } else {
                        RichText::new(action.label())
                    };
                    if ui.button(text).clicked() {
                        event = MenuEvent::Pick(*action);
                    }
                }
            });
        });

    let pressed = ui.input(|i| i.pointer.any_pressed());
    if event == MenuEvent::None
        && pressed
        && !area.response.contains_pointer()
        && !button.contains_pointer()
    {
        event = MenuEvent::OutsideClick;
    }
    event
}
