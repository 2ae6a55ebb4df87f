use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ustr::Ustr;

use super::de;
use super::status::UserType;
use crate::mutation::{Mutation, MutationRequest};
use crate::resource::{Resource, ResourceKind};
use crate::table::{RowAction, Searchable, TableConfig};

/// An enquiry a visitor left on a property. Read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    #[serde(deserialize_with = "de::string")]
    pub id: String,
    #[serde(default, deserialize_with = "de::string")]
    pub name: String,
    #[serde(default, deserialize_with = "de::string")]
    pub mobile: String,
    #[serde(default, deserialize_with = "de::string")]
    pub email: String,
    #[serde(default)]
    pub user_type: UserType,
    #[serde(default, deserialize_with = "de::string")]
    pub unique_property_id: String,
    #[serde(default, deserialize_with = "de::string")]
    pub property_name: String,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub created_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Searchable for Lead {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.name.as_str()),
            Cow::Borrowed(self.mobile.as_str()),
            Cow::Borrowed(self.email.as_str()),
            Cow::Borrowed(self.unique_property_id.as_str()),
            Cow::Borrowed(self.property_name.as_str()),
        ]
    }

    fn category_label(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.user_type.label()))
    }

    fn filter_date(&self) -> Option<&str> {
        self.created_date.as_deref()
    }
}

impl Resource for Lead {
    type Query = ();

    const KIND: ResourceKind = ResourceKind::Leads;
    const LIST_PATH: &'static str = "enquiry/v1/getAllLeads";
    const TABLE: TableConfig = TableConfig::COMPACT;
    const ACTIONS: &'static [RowAction] = &[RowAction::ViewProperty];
    const CATEGORY_TITLE: Option<&'static str> = Some("User type");

    fn row_id(&self) -> Ustr {
        Ustr::from(&self.id)
    }

    fn mutation_request(&self, _mutation: &Mutation) -> Option<MutationRequest> {
        None
    }

    fn external_url(&self, action: RowAction, site_url: &str) -> Option<String> {
        (action == RowAction::ViewProperty && !self.unique_property_id.is_empty())
            .then(|| format!("{site_url}/property/{}", self.unique_property_id))
    }

    fn categories() -> Vec<String> {
        UserType::labels().map(str::to_owned).collect()
    }
}

#[cfg(test)]
impl Lead {
    pub(crate) fn sample(id: &str, property: &str) -> Self {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": "Nisha",
            "unique_property_id": property,
        }))
        .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leads_have_no_mutations() {
        assert_eq!(Lead::sample("1", "P").mutation_request(&Mutation::Delete), None);
    }

    #[test]
    fn no_property_means_no_link() {
        assert_eq!(
            Lead::sample("1", "").external_url(RowAction::ViewProperty, "https://s"),
            None
        );
    }
}
