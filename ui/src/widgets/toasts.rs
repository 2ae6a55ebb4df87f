use egui::{Align2, Area, Color32, Context, Frame, Id, Order, RichText, vec2};
use estate_business::{Notifications, ToastKind};

fn colors(kind: ToastKind) -> (Color32, Color32) {
    match kind {
        ToastKind::Success => (Color32::from_rgb(30, 110, 60), Color32::WHITE),
        ToastKind::Error => (Color32::from_rgb(170, 40, 40), Color32::WHITE),
        ToastKind::Info => (Color32::from_rgb(40, 70, 130), Color32::WHITE),
    }
}

/// Stacked in the bottom-right corner. Returns the index of a toast the user closed.
pub fn toasts(ctx: &Context, notes: &Notifications) -> Option<usize> {
    if notes.is_empty() {
        return None;
    }
    let mut dismissed = None;
    Area::new(Id::new("toasts"))
        .order(Order::Tooltip)
        .anchor(Align2::RIGHT_BOTTOM, vec2(-12.0, -12.0))
        .show(ctx, |ui| {
            for (index, toast) in notes.toasts().iter().enumerate() {
                let (fill, text) = colors(toast.kind);
                Frame::NONE
                    .fill(fill)
                    .corner_radius(6.0)
                    .inner_margin(egui::Margin::symmetric(12, 8))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(&toast.message).color(text));
                            if ui.small_button("✕").clicked() {
                                dismissed = Some(index);
                            }
                        });
                    });
                ui.add_space(6.0);
            }
        });
    dismissed
}
