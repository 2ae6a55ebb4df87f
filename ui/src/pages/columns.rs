//! What each resource shows in its table, and the server-side query controls above it.

use egui::{Id, Ui};
use estate_business::Resource;
use estate_business::models::{
    Lead, Listing, ListingQuery, Media, MediaQuery, PaymentStatus, Place, PropertyLink,
    ReviewStatus, Subscription, SubscriptionQuery,
};
use estate_business::table::date_part;

pub trait Columns: Resource {
    const HEADERS: &'static [&'static str];

    /// One string per header, in order.
    fn cells(&self) -> Vec<String>;

    /// Controls for the server-side query. Returns whether the query changed.
    fn query_bar(_ui: &mut Ui, _query: &mut Self::Query) -> bool {
        false
    }
}

fn opt_date(raw: Option<&str>) -> String {
    raw.map(date_part).unwrap_or_default().to_owned()
}

/// A combo box over `options` plus "All". Returns whether the selection changed.
fn choice<T: Clone + PartialEq>(
    ui: &mut Ui,
    id: &str,
    title: &str,
    value: &mut Option<T>,
    options: &[(T, &str)],
) -> bool {
    let before = value.clone();
    let selected = value
        .as_ref()
        .and_then(|v| options.iter().find(|(o, _)| o == v))
        .map_or_else(|| format!("{title}: All"), |(_, label)| format!("{title}: {label}"));
    egui::ComboBox::from_id_salt(id)
        .selected_text(selected)
        .show_ui(ui, |ui| {
            ui.selectable_value(value, None, "All");
            for (option, label) in options {
                ui.selectable_value(value, Some(option.clone()), *label);
            }
        });
    *value != before
}

impl Columns for Listing {
    const HEADERS: &'static [&'static str] = &[
        "Property ID",
        "Name",
        "For",
        "Type",
        "Posted by",
        "Owner",
        "Mobile",
        "Status",
        "Posted on",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.unique_property_id.clone(),
            self.property_name.clone(),
            self.property_for.clone(),
            format!("{} {}", self.property_in, self.sub_type).trim().to_owned(),
            self.user_type.label().to_owned(),
            self.owner_name.clone(),
            self.owner_mobile.clone(),
            self.property_status.label().to_owned(),
            opt_date(self.created_date.as_deref()),
        ]
    }

    fn query_bar(ui: &mut Ui, query: &mut ListingQuery) -> bool {
        let statuses: Vec<(ReviewStatus, &str)> = ReviewStatus::ALL
            .into_iter()
            .map(|status| (status, status.label()))
            .collect();
        let mut changed = choice(
            ui,
            "listing-status",
            "Status",
            &mut query.property_status,
            &statuses,
        );
        changed |= choice(
            ui,
            "listing-for",
            "For",
            &mut query.property_for,
            &[("Sell".to_owned(), "Sell"), ("Rent".to_owned(), "Rent")],
        );
        changed |= choice(
            ui,
            "listing-in",
            "In",
            &mut query.property_in,
            &[
                ("Residential".to_owned(), "Residential"),
                ("Commercial".to_owned(), "Commercial"),
            ],
        );
        changed
    }
}

impl Columns for Lead {
    const HEADERS: &'static [&'static str] = &[
        "Name",
        "Mobile",
        "Email",
        "User type",
        "Property ID",
        "Property",
        "Date",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.mobile.clone(),
            self.email.clone(),
            self.user_type.label().to_owned(),
            self.unique_property_id.clone(),
            self.property_name.clone(),
            opt_date(self.created_date.as_deref()),
        ]
    }
}

impl Columns for Subscription {
    const HEADERS: &'static [&'static str] = &[
        "Name",
        "Mobile",
        "User type",
        "Package",
        "Amount",
        "GST",
        "Total",
        "Payment",
        "Transaction",
        "Date",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.mobile.clone(),
            self.user_type.label().to_owned(),
            self.package_name.clone(),
            self.actual_amount.clone(),
            self.gst.clone(),
            self.total_amount.clone(),
            self.payment_status.label().to_owned(),
            self.transaction_id.clone(),
            opt_date(self.created_at.as_deref()),
        ]
    }

    fn query_bar(ui: &mut Ui, query: &mut SubscriptionQuery) -> bool {
        let known = PaymentStatus::KNOWN;
        let statuses: Vec<(PaymentStatus, &str)> = known
            .iter()
            .map(|status| (status.clone(), status.label()))
            .collect();
        choice(
            ui,
            "subscription-status",
            "Payment",
            &mut query.payment_status,
            &statuses,
        )
    }
}

impl Columns for PropertyLink {
    const HEADERS: &'static [&'static str] = &[
        "State",
        "City",
        "Location",
        "Link title",
        "For",
        "In",
        "Sub type",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.state.clone(),
            self.city.clone(),
            self.location.clone(),
            self.link_title.clone(),
            self.property_for.clone(),
            self.property_in.clone(),
            self.sub_type.clone(),
        ]
    }
}

impl Columns for Place {
    const HEADERS: &'static [&'static str] = &["Locality", "City", "State", "Status"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.locality.clone(),
            self.city.clone(),
            self.state.clone(),
            self.status.label().to_owned(),
        ]
    }
}

impl Columns for Media {
    const HEADERS: &'static [&'static str] = &["ID", "Type", "URL", "Uploaded"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.media_type.clone(),
            self.url.clone(),
            opt_date(self.created_at.as_deref()),
        ]
    }

    /// The property id is applied on Enter so each keystroke does not fetch.
    fn query_bar(ui: &mut Ui, query: &mut MediaQuery) -> bool {
        let draft_id = Id::new("media-property-draft");
        let mut draft = ui
            .data(|d| d.get_temp::<String>(draft_id))
            .unwrap_or_else(|| query.unique_property_id.clone());
        ui.label("Property ID");
        let response = ui.add(
            egui::TextEdit::singleline(&mut draft)
                .hint_text("e.g. PROP-1024")
                .desired_width(160.0),
        );
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let changed = submitted && draft.trim() != query.unique_property_id;
        if changed {
            query.unique_property_id = draft.trim().to_owned();
        }
        ui.data_mut(|d| d.insert_temp(draft_id, draft));
        changed
    }
}
