//! Printable tax invoice for a subscription.

use egui::{RichText, Ui};
use estate_business::invoice::NO_SUBSCRIPTION_MESSAGE;
use estate_business::{Invoice, Notifications, Route};
use estate_states::{StateCtx, Time};

/// Label/value pairs in print order.
fn lines(invoice: &Invoice) -> [(&'static str, &str); 12] {
    [
        ("Invoice number", invoice.invoice_number.as_str()),
        ("Invoice date", invoice.invoice_date.as_str()),
        ("Customer", invoice.customer_name.as_str()),
        ("Mobile", invoice.customer_mobile.as_str()),
        ("Email", invoice.customer_email.as_str()),
        ("Package", invoice.package_name.as_str()),
        ("Valid from", invoice.start_date.as_str()),
        ("Valid until", invoice.expiry_date.as_str()),
        ("Transaction", invoice.transaction_id.as_str()),
        ("Amount", invoice.subtotal.as_str()),
        ("GST", invoice.gst.as_str()),
        ("Total", invoice.total.as_str()),
    ]
}

/// The invoice as plain text, for pasting into mail or chat.
pub fn invoice_text(invoice: &Invoice) -> String {
    let mut text = String::from("TAX INVOICE\n");
    for (label, value) in lines(invoice) {
        text.push_str(&format!("{label}: {value}\n"));
    }
    text.push_str(&format!("Amount in words: {}", invoice.total_in_words));
    text
}

pub fn invoice_page(ctx: &mut StateCtx, ui: &mut Ui) {
    let Route::Invoice { invoice, .. } = ctx.state::<Route>().clone() else {
        return;
    };

    let back = ui.button("‹ Back").clicked();
    ui.add_space(8.0);

    match invoice {
        None => {
            ui.label(RichText::new(NO_SUBSCRIPTION_MESSAGE).weak());
        }
        Some(invoice) => {
            ui.heading("Tax Invoice");
            ui.add_space(8.0);
            egui::Grid::new("invoice")
                .num_columns(2)
                .striped(true)
                .spacing([24.0, 6.0])
                .show(ui, |ui| {
                    for (label, value) in lines(&invoice) {
                        ui.strong(label);
                        ui.label(value);
                        ui.end_row();
                    }
                });
            ui.add_space(8.0);
            ui.label(RichText::new(&invoice.total_in_words).italics());
            ui.add_space(12.0);
            if ui.button("Copy as text").clicked() {
                ui.ctx().copy_text(invoice_text(&invoice));
                let now = ctx.state::<Time>().now();
                ctx.update::<Notifications>(|notes| notes.info("Invoice copied", now));
            }
        }
    }

    if back {
        let route = ctx.state::<Route>().back();
        *ctx.state_mut::<Route>() = route;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoice() -> Invoice {
        Invoice {
            invoice_number: "INV-7".into(),
            invoice_date: "2024-03-01".into(),
            customer_name: "Ravi".into(),
            customer_mobile: "9000000000".into(),
            customer_email: "ravi@example.com".into(),
            package_name: "Gold".into(),
            start_date: "2024-03-01".into(),
            expiry_date: "2025-03-01".into(),
            transaction_id: "TXN1".into(),
            subtotal: "₹1,000.00".into(),
            gst: "₹180.00".into(),
            total: "₹1,180.00".into(),
            total_in_words: "One Thousand One Hundred Eighty Rupees Only".into(),
        }
    }

    #[test]
    fn text_lists_every_line_then_words() {
        let text = invoice_text(&invoice());
        assert!(text.starts_with("TAX INVOICE\nInvoice number: INV-7\n"));
        assert!(text.contains("Total: ₹1,180.00\n"));
        assert!(text.ends_with("Amount in words: One Thousand One Hundred Eighty Rupees Only"));
    }
}
