use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use ustr::Ustr;

use super::de;
use crate::import::Importable;
use crate::mutation::{Mutation, MutationRequest};
use crate::resource::{Resource, ResourceKind};
use crate::table::{RowAction, Searchable, TableConfig};

/// An SEO landing-page link such as "2 BHK flats for rent in Madhapur".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyLink {
    #[serde(default, deserialize_with = "de::string")]
    pub id: String,
    #[serde(default, deserialize_with = "de::string")]
    pub state: String,
    #[serde(default, deserialize_with = "de::string")]
    pub city: String,
    #[serde(default, deserialize_with = "de::string")]
    pub location: String,
    #[serde(default, deserialize_with = "de::string")]
    pub link_title: String,
    #[serde(default, deserialize_with = "de::string")]
    pub property_for: String,
    #[serde(default, deserialize_with = "de::string")]
    pub property_in: String,
    #[serde(default, deserialize_with = "de::string")]
    pub sub_type: String,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

const COLUMNS: &[&str] = &[
    "state",
    "city",
    "location",
    "link_title",
    "property_for",
    "property_in",
    "sub_type",
];

impl Searchable for PropertyLink {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.state.as_str()),
            Cow::Borrowed(self.city.as_str()),
            Cow::Borrowed(self.location.as_str()),
            Cow::Borrowed(self.link_title.as_str()),
            Cow::Borrowed(self.property_in.as_str()),
            Cow::Borrowed(self.sub_type.as_str()),
        ]
    }

    fn category_label(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.property_for.as_str()))
    }

    fn filter_date(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
}

impl Resource for PropertyLink {
    type Query = ();

    const KIND: ResourceKind = ResourceKind::PropertyLinks;
    const LIST_PATH: &'static str = "propertyLinks/v1/getAll";
    const TABLE: TableConfig = TableConfig::WIDE;
    const ACTIONS: &'static [RowAction] = &[RowAction::Edit, RowAction::Delete];
    const REQUIRED_FIELDS: &'static [&'static str] = COLUMNS;
    const INSERT_PATH: Option<&'static str> = Some("propertyLinks/v1/insert");
    const CATEGORY_TITLE: Option<&'static str> = Some("Property for");

    fn row_id(&self) -> Ustr {
        Ustr::from(&self.id)
    }

    fn mutation_request(&self, mutation: &Mutation) -> Option<MutationRequest> {
        match mutation {
            Mutation::Delete => Some(MutationRequest::new(
                "propertyLinks/v1/delete",
                json!({ "id": self.id }),
            )),
            Mutation::Update(body) => Some(MutationRequest::new(
                "propertyLinks/v1/update",
                body.clone(),
            )),
            Mutation::SetStatus(_) | Mutation::Insert(_) => None,
        }
    }

    fn categories() -> Vec<String> {
        vec!["Sell".to_owned(), "Rent".to_owned()]
    }
}

impl Importable for PropertyLink {
    const COLUMNS: &'static [&'static str] = COLUMNS;

    fn export_row(&self) -> Vec<String> {
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
