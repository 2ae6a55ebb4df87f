use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use ustr::Ustr;

use super::de;
use crate::mutation::{Mutation, MutationRequest};
use crate::resource::{Resource, ResourceKind};
use crate::table::{RowAction, Searchable, TableConfig};

/// A photo or video attached to a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    #[serde(deserialize_with = "de::string")]
    pub id: String,
    #[serde(default, deserialize_with = "de::string")]
    pub unique_property_id: String,
    /// "image" or "video".
    #[serde(default, deserialize_with = "de::string")]
    pub media_type: String,
    #[serde(default, deserialize_with = "de::string")]
    pub url: String,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MediaQuery {
    pub unique_property_id: String,
}

impl Searchable for Media {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.id.as_str()),
            Cow::Borrowed(self.media_type.as_str()),
            Cow::Borrowed(self.url.as_str()),
        ]
    }

    fn category_label(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.media_type.as_str()))
    }

    fn filter_date(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
}

impl Resource for Media {
    type Query = MediaQuery;

    const KIND: ResourceKind = ResourceKind::Media;
    const LIST_PATH: &'static str = "listings/v1/getMedia";
    const TABLE: TableConfig = TableConfig::COMPACT;
    const ACTIONS: &'static [RowAction] = &[RowAction::ViewProperty, RowAction::Delete];
    const CATEGORY_TITLE: Option<&'static str> = Some("Type");

    fn row_id(&self) -> Ustr {
        Ustr::from(&self.id)
    }

    fn mutation_request(&self, mutation: &Mutation) -> Option<MutationRequest> {
        matches!(mutation, Mutation::Delete).then(|| {
            MutationRequest::new(
                "listings/v1/deleteMedia",
                json!({ "id": self.id, "unique_property_id": self.unique_property_id }),
            )
        })
    }

    fn external_url(&self, action: RowAction, site_url: &str) -> Option<String> {
        (action == RowAction::ViewProperty && !self.unique_property_id.is_empty())
            .then(|| format!("{site_url}/property/{}", self.unique_property_id))
    }

    fn categories() -> Vec<String> {
        vec!["image".to_owned(), "video".to_owned()]
    }

    fn query_ready(query: &MediaQuery) -> bool {
        !query.unique_property_id.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_property_id_is_not_fetched() {
        assert!(!Media::query_ready(&MediaQuery::default()));
        assert!(Media::query_ready(&MediaQuery {
            unique_property_id: "P-1".to_owned()
        }));
    }

    #[test]
    fn delete_names_both_ids() {
        let media: Media =
            serde_json::from_value(json!({ "id": 5, "unique_property_id": "P-1" })).unwrap();
        let request = media.mutation_request(&Mutation::Delete).unwrap();
        assert_eq!(request.path, "listings/v1/deleteMedia");
        assert_eq!(
            request.body,
            json!({ "id": "5", "unique_property_id": "P-1" })
        );
    }
}
