use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use ustr::Ustr;

use super::de;
use super::status::{PaymentStatus, UserType};
use crate::invoice::{Invoice, InvoiceError};
use crate::mutation::{Decision, Mutation, MutationRequest};
use crate::resource::{Resource, ResourceKind};
use crate::table::{RowAction, Searchable, TableConfig};

/// A paid package purchased by a platform user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(deserialize_with = "de::string")]
    pub id: String,
    #[serde(default, deserialize_with = "de::string")]
    pub user_id: String,
    #[serde(default, deserialize_with = "de::string")]
    pub name: String,
    #[serde(default, deserialize_with = "de::string")]
    pub mobile: String,
    #[serde(default, deserialize_with = "de::string")]
    pub email: String,
    #[serde(default)]
    pub user_type: UserType,
    #[serde(default, deserialize_with = "de::string")]
    pub package_name: String,
    /// Price before tax, as sent by the API ("4999", "4,999.00").
    #[serde(default, deserialize_with = "de::string")]
    pub actual_amount: String,
    #[serde(default, deserialize_with = "de::string")]
    pub gst: String,
    #[serde(default, deserialize_with = "de::string")]
    pub total_amount: String,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default, deserialize_with = "de::string")]
    pub transaction_id: String,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub invoice_number: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub invoice_url: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub subscription_start_date: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub subscription_expiry_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubscriptionQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
}

impl Searchable for Subscription {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.name.as_str()),
            Cow::Borrowed(self.mobile.as_str()),
            Cow::Borrowed(self.email.as_str()),
            Cow::Borrowed(self.package_name.as_str()),
            Cow::Borrowed(self.transaction_id.as_str()),
            Cow::Borrowed(self.payment_status.label()),
        ]
    }

    fn category_label(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.payment_status.label()))
    }

    fn filter_date(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
}

impl Resource for Subscription {
    type Query = SubscriptionQuery;

    const KIND: ResourceKind = ResourceKind::Subscriptions;
    const LIST_PATH: &'static str = "packages/v1/getSubscriptions";
    const TABLE: TableConfig = TableConfig::COMPACT;
    const ACTIONS: &'static [RowAction] = &[
        RowAction::Approve,
        RowAction::Reject,
        RowAction::GenerateInvoice,
        RowAction::ViewInvoice,
    ];
    const CATEGORY_TITLE: Option<&'static str> = Some("Payment status");

    fn row_id(&self) -> Ustr {
        Ustr::from(&self.id)
    }

    fn mutation_request(&self, mutation: &Mutation) -> Option<MutationRequest> {
        let Mutation::SetStatus(decision) = mutation else {
            return None;
        };
        let status = match decision {
            Decision::Approve => PaymentStatus::Success,
            Decision::Reject => PaymentStatus::Rejected,
        };
        Some(MutationRequest::new(
            "packages/v1/updateStatus",
            json!({ "id": self.id, "payment_status": status.wire() }),
        ))
    }

    fn external_url(&self, action: RowAction, _site_url: &str) -> Option<String> {
        match action {
            RowAction::ViewInvoice => self.invoice_url.clone(),
            _ => None,
        }
    }

    fn invoice(&self) -> Option<Result<Invoice, InvoiceError>> {
        Some(Invoice::from_subscription(self))
    }

    fn categories() -> Vec<String> {
        PaymentStatus::KNOWN
            .iter()
            .map(|status| status.label().to_owned())
            .collect()
    }
}
