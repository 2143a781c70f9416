//! Request envelope for [`ApiClient::execute`](super::ApiClient::execute)

use reqwest::Method;
use serde_json::Value;

/// One call against the versioned API, as data
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Path relative to the versioned base, with a leading slash
    pub path: String,
    pub method: Method,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { path: path.into(), method, body: None }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, path).with_body(body)
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn get_has_no_body() {
        let request = ApiRequest::get("/accounts");
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.body, None);
    }

    #[test]
    fn post_carries_body() {
        let request = ApiRequest::post("/payments", json!({"amount": 1}));
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "/payments");
        assert_eq!(request.body, Some(json!({"amount": 1})));
    }
}
