use thiserror::Error;

use crate::http::HttpError;

/// Everything that can go wrong talking to the back-office API.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("request failed with status {code}: {message}")]
    Status { code: u16, message: String },
    #[error("{0}")]
    Server(String),
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("failed to encode request: {0}")]
    Encode(String),
    #[error("API base URL is not configured")]
    MissingBaseUrl,
}

impl From<HttpError> for ApiError {
    fn from(err: HttpError) -> Self {
        Self::Transport(err.message)
    }
}

impl ApiError {
    /// Message suitable for a toast.
    pub fn user_message(&self) -> String {
        match self {
            Self::Server(message) | Self::Status { message, .. } if !message.is_empty() => {
                message.clone()
            }
            other => other.to_string(),
        }
    }
}
