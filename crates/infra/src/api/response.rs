//! Response envelope returned by [`ApiClient::request`](super::ApiClient::request)

use serde::de::DeserializeOwned;
use serde_json::Value;
use vaultline_domain::ApiError;

/// Media types treated as JSON besides `application/json` itself
const JSON_SUFFIX: &str = "+json";

/// Parsed response body
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Body declared as JSON. An empty body is `Value::Null`.
    Json(Value),
    /// Any other content type, kept verbatim
    Text(String),
}

impl ResponseBody {
    /// Parse `text` according to the declared content type.
    ///
    /// # Errors
    /// Returns the JSON error if the body claims to be JSON but is not.
    pub fn parse(content_type: Option<&str>, text: String) -> Result<Self, serde_json::Error> {
        if !content_type.is_some_and(is_json_content_type) {
            return Ok(Self::Text(text));
        }
        if text.trim().is_empty() {
            return Ok(Self::Json(Value::Null));
        }
        serde_json::from_str(&text).map(Self::Json)
    }

    #[must_use]
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Json(_) => None,
        }
    }

    /// JSON view of the body; text bodies become JSON strings.
    #[must_use]
    pub fn into_json(self) -> Value {
        match self {
            Self::Json(value) => value,
            Self::Text(text) => Value::String(text),
        }
    }
}

/// Successful response
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub ok: bool,
    pub body: ResponseBody,
}

impl ApiResponse {
    /// Decode the body into `T`.
    ///
    /// # Errors
    /// Returns `ApiError::Decode` if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let status = self.status;
        serde_json::from_value(self.body.into_json()).map_err(|err| {
            ApiError::Decode(format!("unexpected body for status {status}: {err}"))
        })
    }
}

/// Whether a `Content-Type` header value declares JSON
pub(crate) fn is_json_content_type(content_type: &str) -> bool {
    let media_type = content_type.split(';').next().unwrap_or_default().trim();
    media_type.eq_ignore_ascii_case("application/json")
        || media_type.to_ascii_lowercase().ends_with(JSON_SUFFIX)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn json_content_types() {
        assert!(is_json_content_type("application/json"));
        assert!(is_json_content_type("application/json; charset=utf-8"));
        assert!(is_json_content_type("application/problem+json"));
        assert!(is_json_content_type("Application/JSON"));
        assert!(!is_json_content_type("text/plain"));
        assert!(!is_json_content_type("text/html; charset=utf-8"));
    }

    #[test]
    fn empty_json_body_is_null() {
        let body = ResponseBody::parse(Some("application/json"), String::new()).unwrap();
        assert_eq!(body, ResponseBody::Json(Value::Null));
    }

    #[test]
    fn missing_content_type_is_text() {
        let body = ResponseBody::parse(None, "{\"a\":1}".into()).unwrap();
        assert_eq!(body.as_text(), Some("{\"a\":1}"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(ResponseBody::parse(Some("application/json"), "{oops".into()).is_err());
    }

    #[test]
    fn decode_mismatch_is_decode_error() {
        let response =
            ApiResponse { status: 200, ok: true, body: ResponseBody::Json(json!({"a": 1})) };
        let err = response.json::<Vec<u32>>().unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
