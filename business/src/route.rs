//! Route state for page navigation.

use estate_states::State;

use crate::invoice::Invoice;
use crate::resource::ResourceKind;

/// Which page the central panel shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Screen(ResourceKind),
    /// Edit form for a record of this kind; the form itself lives in `EditForm`.
    Edit(ResourceKind),
    /// `invoice` is `None` when the page was reached without a record.
    Invoice {
        back: ResourceKind,
        invoice: Option<Box<Invoice>>,
    },
}

impl Default for Route {
    fn default() -> Self {
        Self::Screen(ResourceKind::Listings)
    }
}

impl State for Route {}

impl Route {
    /// The resource this page belongs to, for highlighting the side panel.
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Screen(kind) | Self::Edit(kind) => *kind,
            Self::Invoice { back, .. } => *back,
        }
    }

    /// Where "Back" leads.
    pub fn back(&self) -> Self {
        Self::Screen(self.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_default_is_listings() {
        assert_eq!(Route::default(), Route::Screen(ResourceKind::Listings));
    }

    #[test]
    fn test_back_returns_to_the_owning_screen() {
        let route = Route::Invoice {
            back: ResourceKind::Subscriptions,
            invoice: None,
        };
        assert_eq!(route.back(), Route::Screen(ResourceKind::Subscriptions));
        assert_eq!(
            Route::Edit(ResourceKind::Places).back(),
            Route::Screen(ResourceKind::Places)
        );
    }
}
