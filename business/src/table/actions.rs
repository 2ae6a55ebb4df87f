use ustr::Ustr;

use crate::invoice::Invoice;
use crate::mutation::{Decision, Mutation};
use crate::resource::Resource;

/// Which row, if any, has its action menu open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionMenu {
    open: Option<Ustr>,
}

impl ActionMenu {
    pub fn open_row(&self) -> Option<Ustr> {
        self.open
    }

    pub fn is_open(&self, row: Ustr) -> bool {
        self.open == Some(row)
    }

    /// Opening a row closes whichever row was open before.
    pub fn open(&mut self, row: Ustr) {
        self.open = Some(row);
    }

    pub fn toggle(&mut self, row: Ustr) {
        if self.is_open(row) {
            self.open = None;
        } else {
            self.open = Some(row);
        }
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    /// Pointer went down somewhere; `inside_menu` says whether it hit the open menu or
    /// its trigger.
    pub fn close_on_outside_click(&mut self, inside_menu: bool) {
        if !inside_menu {
            self.close();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowAction {
    Approve,
    Reject,
    Delete,
    Edit,
    GenerateInvoice,
    ViewInvoice,
    ViewProperty,
}

impl RowAction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Approve => "Approve",
            Self::Reject => "Reject",
            Self::Delete => "Delete",
            Self::Edit => "Edit",
            Self::GenerateInvoice => "Invoice",
            Self::ViewInvoice => "View Invoice",
            Self::ViewProperty => "View Property",
        }
    }

    pub const fn is_destructive(self) -> bool {
        matches!(self, Self::Delete | Self::Reject)
    }

    /// What selecting this action on `record` does.
    pub fn resolve<R: Resource>(self, record: &R, site_url: &str) -> Dispatch<R> {
        match self {
            Self::Approve => Dispatch::Mutate(Mutation::SetStatus(Decision::Approve)),
            Self::Reject => Dispatch::Mutate(Mutation::SetStatus(Decision::Reject)),
            Self::Delete => Dispatch::Mutate(Mutation::Delete),
            Self::Edit => Dispatch::Navigate(record.clone()),
            Self::GenerateInvoice => match record.invoice() {
                Some(Ok(invoice)) => Dispatch::ShowInvoice(Box::new(invoice)),
                Some(Err(err)) => Dispatch::Unavailable(format!("Cannot build invoice: {err}")),
                None => Dispatch::Unavailable("No invoice for this row".to_owned()),
            },
            Self::ViewInvoice | Self::ViewProperty => match record.external_url(self, site_url) {
                Some(url) => Dispatch::OpenUrl(url),
                None => Dispatch::Unavailable(format!("{} is not available", self.label())),
            },
        }
    }
}

/// Outcome of resolving a row action.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch<R> {
    /// Send a mutation; refresh on success.
    Mutate(Mutation),
    /// Open the edit screen with this record.
    Navigate(R),
    ShowInvoice(Box<Invoice>),
    /// Open in a new browser tab. No state change.
    OpenUrl(String),
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Lead, Listing};

    #[test]
    fn opening_one_row_closes_the_other() {
        let (a, b) = (Ustr::from("a"), Ustr::from("b"));
        let mut menu = ActionMenu::default();
        menu.toggle(a);
        assert!(menu.is_open(a));
        menu.open(b);
        assert!(menu.is_open(b));
        assert!(!menu.is_open(a));
    }

    #[test]
    fn toggle_closes_the_same_row() {
        let a = Ustr::from("a");
        let mut menu = ActionMenu::default();
        menu.toggle(a);
        menu.toggle(a);
        assert_eq!(menu.open_row(), None);
    }

    #[test]
    fn outside_click_closes() {
        let a = Ustr::from("a");
        let mut menu = ActionMenu::default();
        menu.open(a);
        menu.close_on_outside_click(true);
        assert!(menu.is_open(a));
        menu.close_on_outside_click(false);
        assert_eq!(menu.open_row(), None);
    }

    #[test]
    fn status_actions_resolve_to_mutations() {
        let listing = Listing::sample("P-1");
        assert_eq!(
            RowAction::Approve.resolve(&listing, ""),
            Dispatch::Mutate(Mutation::SetStatus(Decision::Approve))
        );
        assert_eq!(
            RowAction::Delete.resolve(&listing, ""),
            Dispatch::Mutate(Mutation::Delete)
        );
    }

    #[test]
    fn edit_carries_the_full_record() {
        let listing = Listing::sample("P-1");
        assert_eq!(
            RowAction::Edit.resolve(&listing, ""),
            Dispatch::Navigate(listing.clone())
        );
    }

    #[test]
    fn view_property_opens_the_public_page() {
        let lead = Lead::sample("L-1", "P-42");
        assert_eq!(
            RowAction::ViewProperty.resolve(&lead, "https://site.example"),
            Dispatch::OpenUrl("https://site.example/property/P-42".to_owned())
        );
    }

    #[test]
    fn invoice_on_a_listing_is_unavailable() {
        let listing = Listing::sample("P-1");
        assert!(matches!(
            RowAction::GenerateInvoice.resolve(&listing, ""),
            Dispatch::Unavailable(_)
        ));
    }
}
