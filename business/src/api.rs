//! The one configured client for the back-office REST API.
//!
//! Every endpoint answers with the same envelope:
//! `{ "status": "success" | "error" | <code>, "data": ..., "message": "..." }`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::BusinessConfig;
use crate::error::ApiError;
use crate::http::{Client, RequestBuilder, Response};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EnvelopeStatus {
    Text(String),
    Code(i64),
}

impl EnvelopeStatus {
    /// Numeric statuses are HTTP-style codes.
    pub fn is_error(&self) -> bool {
        match self {
            Self::Text(text) => {
                let text = text.trim();
                text.eq_ignore_ascii_case("error") || text.eq_ignore_ascii_case("failed")
            }
            Self::Code(code) => *code >= 400,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub status: Option<EnvelopeStatus>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Envelope {
    fn into_result(self) -> Result<Self, ApiError> {
        if self.status.as_ref().is_some_and(EnvelopeStatus::is_error) {
            return Err(ApiError::Server(
                self.message
                    .unwrap_or_else(|| "The server reported an error".to_owned()),
            ));
        }
        Ok(self)
    }
}

/// Flatten a serializable query object into URL pairs. `null` fields are skipped.
pub fn query_pairs<Q: Serialize>(query: &Q) -> Result<Vec<(String, String)>, ApiError> {
    let value = serde_json::to_value(query).map_err(|e| ApiError::Encode(e.to_string()))?;
    let Value::Object(map) = value else {
        return Ok(Vec::new());
    };
    Ok(map
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::String(s) => Some((key, s)),
            other => Some((key, other.to_string())),
        })
        .collect())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClient {
    base_url: String,
    headers: Vec<(String, String)>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            headers: vec![("accept".to_owned(), "application/json".to_owned())],
        }
    }

    /// Base URL and bearer token from the configuration.
    pub fn from_config(config: &BusinessConfig) -> Self {
        let client = Self::new(config.api_base_url.as_str());
        match config.auth_token.as_deref() {
            Some(token) => client.with_header("authorization", format!("Bearer {token}")),
            None => client,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<String, ApiError> {
        // Same-origin relative URLs only make sense in the browser.
        if self.base_url.is_empty() && !cfg!(target_arch = "wasm32") {
            return Err(ApiError::MissingBaseUrl);
        }
        Ok(format!("{}/{}", self.base_url, path.trim_start_matches('/')))
    }

    fn prepare(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.headers(self.headers.iter().cloned())
    }

    async fn execute(builder: RequestBuilder) -> Result<Envelope, ApiError> {
        let response = builder.send().await?;
        Self::read_envelope(&response)?.into_result()
    }

    fn read_envelope(response: &Response) -> Result<Envelope, ApiError> {
        let parsed = response.json::<Envelope>();
        if !response.is_success() {
            let message = parsed
                .ok()
                .and_then(|env| env.message)
                .unwrap_or_else(|| response.text());
            return Err(ApiError::Status {
                code: response.status,
                message,
            });
        }
        parsed.map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// GET a list endpoint. A missing or non-array `data` is an error.
    pub async fn list<T, Q>(&self, path: &str, query: &Q) -> Result<Vec<T>, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize,
    {
        let builder = self.prepare(Client::get(self.url(path)?).query(query_pairs(query)?));
        let envelope = Self::execute(builder).await?;
        match envelope.data {
            Some(data @ Value::Array(_)) => {
                serde_json::from_value(data).map_err(|e| ApiError::Decode(e.to_string()))
            }
            _ => Err(ApiError::Server(
                envelope
                    .message
                    .unwrap_or_else(|| "Response did not include any rows".to_owned()),
            )),
        }
    }

    /// POST a JSON body. Returns the server's message, if any.
    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Option<String>, ApiError> {
        let builder = self
            .prepare(Client::post(self.url(path)?))
            .json(body)
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        let envelope = Self::execute(builder).await?;
        Ok(envelope.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_pairs_skip_nulls_and_stringify() {
        #[derive(Serialize)]
        struct Query {
            property_status: Option<i64>,
            property_for: Option<&'static str>,
            page: u32,
        }

        let pairs = query_pairs(&Query {
            property_status: None,
            property_for: Some("Sell"),
            page: 2,
        })
        .unwrap();
        assert_eq!(
            pairs,
            vec![
                ("page".to_owned(), "2".to_owned()),
                ("property_for".to_owned(), "Sell".to_owned()),
            ]
        );
    }

    #[test]
    fn unit_query_has_no_pairs() {
        assert!(query_pairs(&()).unwrap().is_empty());
    }

    #[test]
    fn envelope_status_variants() {
        let env: Envelope = serde_json::from_str(r#"{"status": "error", "message": "nope"}"#).unwrap();
        assert_eq!(
            env.into_result().unwrap_err(),
            ApiError::Server("nope".to_owned())
        );

        let env: Envelope = serde_json::from_str(r#"{"status": 200, "data": []}"#).unwrap();
        assert!(env.into_result().is_ok());

        let env: Envelope = serde_json::from_str(r#"{"status": 500}"#).unwrap();
        assert!(env.into_result().is_err());
    }

    #[test]
    fn bearer_token_comes_from_config() {
        let client =
            ApiClient::from_config(&BusinessConfig::new("http://localhost:1/").with_token("t"));
        assert_eq!(client.base_url(), "http://localhost:1");
        assert!(
            client
                .headers
                .contains(&("authorization".to_owned(), "Bearer t".to_owned()))
        );
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn empty_base_url_is_rejected_on_native() {
        assert_eq!(
            ApiClient::new("").url("/listings/v1/getAllListings"),
            Err(ApiError::MissingBaseUrl)
        );
    }
}
