use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use ustr::Ustr;

use super::de;
use super::status::{ReviewStatus, UserType};
use crate::mutation::{Decision, Mutation, MutationRequest};
use crate::resource::{Resource, ResourceKind};
use crate::table::{RowAction, Searchable, TableConfig};

/// A property posted for sale or rent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    #[serde(deserialize_with = "de::string")]
    pub unique_property_id: String,
    #[serde(default, deserialize_with = "de::string")]
    pub property_name: String,
    /// "Sell" or "Rent".
    #[serde(default, deserialize_with = "de::string")]
    pub property_for: String,
    /// "Residential" or "Commercial".
    #[serde(default, deserialize_with = "de::string")]
    pub property_in: String,
    #[serde(default, deserialize_with = "de::string")]
    pub sub_type: String,
    #[serde(default, deserialize_with = "de::string")]
    pub city_id: String,
    #[serde(default, deserialize_with = "de::string")]
    pub location_id: String,
    #[serde(default, deserialize_with = "de::string")]
    pub user_id: String,
    #[serde(default)]
    pub user_type: UserType,
    #[serde(default, deserialize_with = "de::string")]
    pub owner_name: String,
    #[serde(default, deserialize_with = "de::string")]
    pub owner_mobile: String,
    #[serde(default, deserialize_with = "de::string")]
    pub property_cost: String,
    #[serde(default)]
    pub property_status: ReviewStatus,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub created_date: Option<String>,
    /// Fields this client does not model, carried through to updates unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Coarse filters the listings endpoint understands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListingQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_status: Option<ReviewStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_for: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_in: Option<String>,
}

impl Searchable for Listing {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.unique_property_id.as_str()),
            Cow::Borrowed(self.property_name.as_str()),
            Cow::Borrowed(self.owner_name.as_str()),
            Cow::Borrowed(self.owner_mobile.as_str()),
            Cow::Borrowed(self.sub_type.as_str()),
            Cow::Borrowed(self.property_status.label()),
        ]
    }

    fn category_label(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.user_type.label()))
    }

    fn filter_date(&self) -> Option<&str> {
        self.created_date.as_deref()
    }
}

impl Resource for Listing {
    type Query = ListingQuery;

    const KIND: ResourceKind = ResourceKind::Listings;
    const LIST_PATH: &'static str = "listings/v1/getAllListings";
    const TABLE: TableConfig = TableConfig::COMPACT;
    const ACTIONS: &'static [RowAction] = &[
        RowAction::Approve,
        RowAction::Reject,
        RowAction::Edit,
        RowAction::ViewProperty,
        RowAction::Delete,
    ];
    const REQUIRED_FIELDS: &'static [&'static str] =
        &["property_name", "property_for", "property_in"];
    const CATEGORY_TITLE: Option<&'static str> = Some("User type");

    fn row_id(&self) -> Ustr {
        Ustr::from(&self.unique_property_id)
    }

    fn mutation_request(&self, mutation: &Mutation) -> Option<MutationRequest> {
        let id = &self.unique_property_id;
        let request = match mutation {
            Mutation::SetStatus(decision) => {
                let status = match decision {
                    Decision::Approve => ReviewStatus::Approved,
                    Decision::Reject => ReviewStatus::Rejected,
                };
                MutationRequest::new(
                    "listings/v1/updateStatus",
                    json!({ "unique_property_id": id, "property_status": status.code() }),
                )
            }
            Mutation::Delete => MutationRequest::new(
                "listings/v1/deleteListing",
                json!({ "unique_property_id": id }),
            ),
            Mutation::Update(body) => MutationRequest::new("listings/v1/updateListing", body.clone()),
            Mutation::Insert(_) => return None,
        };
        Some(request)
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
impl Listing {
    pub(crate) fn sample(id: &str) -> Self {
        serde_json::from_value(json!({ "unique_property_id": id, "property_name": "Sea View" }))
            .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_loose_wire_record_and_keeps_extras() {
        let listing: Listing = serde_json::from_value(json!({
            "unique_property_id": 1042,
            "property_name": "Palm Residency",
            "user_type": "5",
            "property_status": "0",
            "property_cost": 4500000,
            "created_date": "2024-05-01T09:15:00Z",
            "facing": "East"
        }))
        .unwrap();

        assert_eq!(listing.unique_property_id, "1042");
        assert_eq!(listing.user_type, UserType::Owner);
        assert_eq!(listing.property_status, ReviewStatus::Review);
        assert_eq!(listing.property_cost, "4500000");
        assert_eq!(listing.extra.get("facing"), Some(&json!("East")));

        let back = serde_json::to_value(&listing).unwrap();
        assert_eq!(back["facing"], json!("East"));
        assert_eq!(back["property_status"], json!(0));
    }

    #[test]
    fn odd_status_text_does_not_sink_the_page() {
        let rows: Vec<Listing> = serde_json::from_value(json!([
            { "unique_property_id": "P-1", "property_status": 1 },
            { "unique_property_id": "P-2", "property_status": "" },
            { "unique_property_id": "P-3", "property_status": "active" }
        ]))
        .unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].property_status, ReviewStatus::Approved);
        assert_eq!(rows[1].property_status, ReviewStatus::Review);
        assert_eq!(
            rows[2].property_status,
            ReviewStatus::Other(ReviewStatus::UNKNOWN_CODE)
        );
    }

    #[test]
    fn approve_and_reject_map_to_status_codes() {
        let listing = Listing::sample("P-9");
        let approve = listing
            .mutation_request(&Mutation::SetStatus(Decision::Approve))
            .unwrap();
        assert_eq!(approve.path, "listings/v1/updateStatus");
        assert_eq!(
            approve.body,
            json!({ "unique_property_id": "P-9", "property_status": 1 })
        );

        let reject = listing
            .mutation_request(&Mutation::SetStatus(Decision::Reject))
            .unwrap();
        assert_eq!(reject.body["property_status"], json!(2));
    }

    #[test]
    fn delete_targets_the_property_id() {
        let request = Listing::sample("P-9")
            .mutation_request(&Mutation::Delete)
            .unwrap();
        assert_eq!(request.path, "listings/v1/deleteListing");
        assert_eq!(request.body, json!({ "unique_property_id": "P-9" }));
    }

    #[test]
    fn query_skips_unset_filters() {
        let query = ListingQuery {
            property_status: Some(ReviewStatus::Approved),
            ..ListingQuery::default()
        };
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({ "property_status": 1 })
        );
    }
}
