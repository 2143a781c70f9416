//! Error types used throughout the client core

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Body fields consulted, in order, when turning an API error into display
/// text.
const MESSAGE_FIELDS: [&str; 3] = ["error", "message", "detail"];

/// Normalized failure of a call through the API gateway client.
///
/// Transport failures and non-success responses share this one shape so
/// callers can match on it regardless of where the request failed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// No response was received. `message` is the transport's own text.
    #[error("{message}")]
    Network { message: String },

    /// A response was received with a non-success status. Every field of a
    /// structured (JSON object) error body is kept in `body`.
    #[error("{}", describe_api_error(.status, .status_text, .body))]
    Api { status: u16, status_text: String, body: Map<String, Value> },

    /// The response body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The persisted token could not be written or removed.
    #[error("Token storage error: {0}")]
    Storage(String),

    /// The client could not be constructed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Build a transport-level error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network { message: message.into() }
    }

    /// Build an application-level error from a response.
    ///
    /// A JSON object body is merged flat into the error; any other body
    /// shape contributes no fields.
    #[must_use]
    pub fn from_response(status: u16, status_text: impl Into<String>, body: Option<Value>) -> Self {
        let body = match body {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };
        Self::Api { status, status_text: status_text.into(), body }
    }

    /// HTTP status for application-level errors.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Status text for application-level errors.
    #[must_use]
    pub fn status_text(&self) -> Option<&str> {
        match self {
            Self::Api { status_text, .. } => Some(status_text),
            _ => None,
        }
    }

    /// Look up a field of the structured error body.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Self::Api { body, .. } => body.get(name),
            _ => None,
        }
    }

    /// Whether the backend rejected the credential.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Whether the failure happened before any response was received.
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// Plain text suitable for direct display.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network { message } => message.clone(),
            Self::Api { status, status_text, body } => {
                describe_api_error(status, status_text, body)
            }
            other => other.to_string(),
        }
    }
}

fn describe_api_error(status: &u16, status_text: &str, body: &Map<String, Value>) -> String {
    MESSAGE_FIELDS
        .iter()
        .find_map(|field| {
            body.get(*field).and_then(Value::as_str).filter(|text| !text.is_empty())
        })
        .map(ToOwned::to_owned)
        .or_else(|| (!status_text.is_empty()).then(|| status_text.to_owned()))
        .unwrap_or_else(|| format!("Request failed with status {status}"))
}

/// Main error type for the client core outside the HTTP boundary
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum VaultlineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ApiError> for VaultlineError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Network { message } => Self::Network(message),
            ApiError::Storage(message) => Self::Storage(message),
            ApiError::Config(message) => Self::Config(message),
            api @ ApiError::Api { .. } => Self::Auth(api.user_message()),
            ApiError::Decode(message) => Self::Internal(message),
        }
    }
}

/// Result type alias for Vaultline operations
pub type Result<T> = std::result::Result<T, VaultlineError>;
