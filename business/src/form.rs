//! The edit/add form shared by every resource.
//!
//! The form is seeded from the record's JSON so fields the client does not model are
//! editable too, and everything it does not show is sent back unchanged.

use std::collections::BTreeMap;

use serde_json::{Map, Number, Value};

use crate::mutation::Mutation;
use crate::resource::{Resource, ResourceKind};
use estate_states::State;

/// Per-field validation messages. Empty means the form may be submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<String, String>,
}

impl FormErrors {
    /// One "is required" message per blank field in `required`.
    pub fn required<'a>(required: &[&str], value: impl Fn(&str) -> Option<&'a str>) -> Self {
        let fields = required
            .iter()
            .filter(|field| value(**field).is_none_or(|v| v.trim().is_empty()))
            .map(|field| ((*field).to_owned(), format!("{} is required", humanize(field))))
            .collect();
        Self { fields }
    }

    pub fn is_valid(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// "link_title" -> "Link title".
pub fn humanize(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Default)]
pub struct EditForm {
    kind: Option<ResourceKind>,
    /// The record as received; `None` for a new one.
    original: Option<Map<String, Value>>,
    fields: Vec<FormField>,
    errors: FormErrors,
}

impl State for EditForm {}

fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Parse `text` back into the JSON type the field originally had.
fn typed_value(original: Option<&Value>, text: &str) -> Value {
    let trimmed = text.trim();
    match original {
        Some(Value::Number(_)) => trimmed
            .parse::<i64>()
            .map(Number::from)
            .ok()
            .or_else(|| trimmed.parse::<f64>().ok().and_then(Number::from_f64))
            .map_or_else(|| Value::String(trimmed.to_owned()), Value::Number),
        Some(Value::Bool(_)) => trimmed
            .parse::<bool>()
            .map_or_else(|_| Value::String(trimmed.to_owned()), Value::Bool),
        Some(Value::Null) if trimmed.is_empty() => Value::Null,
        _ => Value::String(trimmed.to_owned()),
    }
}

impl EditForm {
    /// Form for editing `record`. Required fields come first, the rest in key order.
    pub fn edit<R: Resource>(record: &R) -> Result<Self, serde_json::Error> {
        let Value::Object(original) = serde_json::to_value(record)? else {
            return Ok(Self::create::<R>());
        };

        let mut fields: Vec<FormField> = R::REQUIRED_FIELDS
            .iter()
            .map(|key| FormField {
                key: (*key).to_owned(),
                value: original.get(*key).and_then(cell_text).unwrap_or_default(),
            })
            .collect();
        fields.extend(
            original
                .iter()
                .filter(|(key, _)| !R::REQUIRED_FIELDS.contains(&key.as_str()))
                .filter_map(|(key, value)| {
                    cell_text(value).map(|value| FormField {
                        key: key.clone(),
                        value,
                    })
                }),
        );

        Ok(Self {
            kind: Some(R::KIND),
            original: Some(original),
            fields,
            errors: FormErrors::default(),
        })
    }

    /// Blank form for a new record, one field per required column.
    pub fn create<R: Resource>() -> Self {
        Self {
            kind: Some(R::KIND),
            original: None,
            fields: R::REQUIRED_FIELDS
                .iter()
                .map(|key| FormField {
                    key: (*key).to_owned(),
                    value: String::new(),
                })
                .collect(),
            errors: FormErrors::default(),
        }
    }

    pub fn kind(&self) -> Option<ResourceKind> {
        self.kind
    }

    pub fn is_insert(&self) -> bool {
        self.original.is_none()
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut [FormField] {
        &mut self.fields
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.key == key)
            .map(|field| field.value.as_str())
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|field| field.key == key) {
            Some(field) => field.value = value,
            None => self.fields.push(FormField {
                key: key.to_owned(),
                value,
            }),
        }
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn validate<R: Resource>(&mut self) -> bool {
        self.errors = FormErrors::required(R::REQUIRED_FIELDS, |key| {
            self.fields
                .iter()
                .find(|field| field.key == key)
                .map(|field| field.value.as_str())
        });
        self.errors.is_valid()
    }

    /// The original record with every edited field written over it.
    pub fn payload(&self) -> Value {
        let mut payload = self.original.clone().unwrap_or_default();
        for field in &self.fields {
            let value = typed_value(
                self.original.as_ref().and_then(|o| o.get(&field.key)),
                &field.value,
            );
            payload.insert(field.key.clone(), value);
        }
        Value::Object(payload)
    }

    /// Validate, then build the mutation to run. `None` when validation failed.
    pub fn submission<R: Resource>(&mut self) -> Option<(Option<R>, Mutation)> {
        if !self.validate::<R>() {
            log::debug!("{} form has {} errors", R::KIND.singular(), self.errors.len());
            return None;
        }
        let payload = self.payload();
        match &self.original {
            None => Some((None, Mutation::Insert(payload))),
            Some(original) => {
                let target = match serde_json::from_value::<R>(Value::Object(original.clone())) {
                    Ok(record) => Some(record),
                    Err(err) => {
                        log::error!("edited {} no longer decodes: {err}", R::KIND.singular());
                        None
                    }
                };
                Some((target, Mutation::Update(payload)))
            }
        }
    }
}
