//! Deserializers for fields the API sends as either strings or numbers.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum Loose {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Loose {
    pub(crate) fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Int(n) => n.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }

    pub(crate) fn as_code(&self) -> Option<i64> {
        match self {
            Self::Text(s) => s.trim().parse().ok(),
            Self::Int(n) => Some(*n),
            Self::Float(_) | Self::Bool(_) => None,
        }
    }
}

/// String, number, bool or null into a `String` (null becomes empty).
pub(crate) fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<Loose>::deserialize(deserializer)?
        .map(Loose::into_string)
        .unwrap_or_default())
}

/// Like [`string`] but null and blank become `None`.
pub(crate) fn opt_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<Loose>::deserialize(deserializer)?
        .map(Loose::into_string)
        .filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "super::string")]
        a: String,
        #[serde(default, deserialize_with = "super::opt_string")]
        b: Option<String>,
    }

    #[test]
    fn accepts_numbers_and_strings() {
        let probe: Probe = serde_json::from_str(r#"{"a": 42, "b": "x"}"#).unwrap();
        assert_eq!(probe.a, "42");
        assert_eq!(probe.b.as_deref(), Some("x"));
    }

    #[test]
    fn null_and_missing_are_empty() {
        let probe: Probe = serde_json::from_str(r#"{"a": null, "b": "  "}"#).unwrap();
        assert_eq!(probe.a, "");
        assert_eq!(probe.b, None);

        let probe: Probe = serde_json::from_str("{}").unwrap();
        assert_eq!(probe.a, "");
        assert_eq!(probe.b, None);
    }
}
