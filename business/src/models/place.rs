use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use ustr::Ustr;

use super::de;
use super::status::PlaceStatus;
use crate::import::Importable;
use crate::mutation::{Decision, Mutation, MutationRequest};
use crate::resource::{Resource, ResourceKind};
use crate::table::{RowAction, Searchable, TableConfig};

/// A locality offered in location pickers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(default, deserialize_with = "de::string")]
    pub id: String,
    #[serde(default, deserialize_with = "de::string")]
    pub locality: String,
    #[serde(default, deserialize_with = "de::string")]
    pub city: String,
    #[serde(default, deserialize_with = "de::string")]
    pub state: String,
    #[serde(default)]
    pub status: PlaceStatus,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

const COLUMNS: &[&str] = &["locality", "city", "state", "status"];

impl Searchable for Place {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.locality.as_str()),
            Cow::Borrowed(self.city.as_str()),
            Cow::Borrowed(self.state.as_str()),
        ]
    }

    fn category_label(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.status.label()))
    }
}

impl Resource for Place {
    type Query = ();

    const KIND: ResourceKind = ResourceKind::Places;
    const LIST_PATH: &'static str = "places/v1/getAll";
    const TABLE: TableConfig = TableConfig::WIDE;
    const ACTIONS: &'static [RowAction] = &[
        RowAction::Approve,
        RowAction::Reject,
        RowAction::Edit,
        RowAction::Delete,
    ];
    const REQUIRED_FIELDS: &'static [&'static str] = COLUMNS;
    const INSERT_PATH: Option<&'static str> = Some("places/v1/insert");
    const CATEGORY_TITLE: Option<&'static str> = Some("Status");

    fn row_id(&self) -> Ustr {
        Ustr::from(&self.id)
    }

    fn mutation_request(&self, mutation: &Mutation) -> Option<MutationRequest> {
        match mutation {
            Mutation::SetStatus(decision) => {
                let status = match decision {
                    Decision::Approve => PlaceStatus::Active,
                    Decision::Reject => PlaceStatus::Inactive,
                };
                Some(MutationRequest::new(
                    "places/v1/update",
                    json!({ "id": self.id, "status": status.code() }),
                ))
            }
            Mutation::Delete => Some(MutationRequest::new(
                "places/v1/delete",
                json!({ "id": self.id }),
            )),
            Mutation::Update(body) => Some(MutationRequest::new("places/v1/update", body.clone())),
            Mutation::Insert(_) => None,
        }
    }

    fn categories() -> Vec<String> {
        PlaceStatus::ALL
            .iter()
            .map(|status| status.label().to_owned())
            .collect()
    }
}

impl Importable for Place {
    const COLUMNS: &'static [&'static str] = COLUMNS;

    fn export_row(&self) -> Vec<String> {
        vec![
            self.locality.clone(),
            self.city.clone(),
            self.state.clone(),
            self.status.label().to_owned(),
        ]
    }

    /// Status cells may say "Active"/"Inactive"; the API wants the code.
    fn insert_payload(row: &std::collections::BTreeMap<String, String>) -> Value {
        let mut payload: Map<String, Value> = row
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        if let Some(status) = row.get("status").and_then(|raw| PlaceStatus::parse(raw)) {
            payload.insert("status".to_owned(), json!(status.code()));
        }
        Value::Object(payload)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn place() -> Place {
        serde_json::from_value(json!({
            "id": "12",
            "locality": "Gachibowli",
            "city": "Hyderabad",
            "state": "Telangana",
            "status": 0
        }))
        .unwrap()
    }

    #[test]
    fn approve_activates_and_reject_deactivates() {
        let approve = place()
            .mutation_request(&Mutation::SetStatus(Decision::Approve))
            .unwrap();
        assert_eq!(approve.body, json!({ "id": "12", "status": 1 }));
        let reject = place()
            .mutation_request(&Mutation::SetStatus(Decision::Reject))
            .unwrap();
        assert_eq!(reject.body, json!({ "id": "12", "status": 0 }));
    }

    #[test]
    fn export_uses_status_label() {
        assert_eq!(
            place().export_row(),
            vec!["Gachibowli", "Hyderabad", "Telangana", "Inactive"]
        );
    }

    #[test]
    fn insert_payload_converts_status() {
        let row = BTreeMap::from([
            ("locality".to_owned(), "Kukatpally".to_owned()),
            ("city".to_owned(), "Hyderabad".to_owned()),
            ("state".to_owned(), "Telangana".to_owned()),
            ("status".to_owned(), "Active".to_owned()),
        ]);
        let payload = Place::insert_payload(&row);
        assert_eq!(payload["status"], json!(1));
        assert_eq!(payload["locality"], json!("Kukatpally"));
    }
}
