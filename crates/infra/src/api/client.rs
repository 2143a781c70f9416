//! HTTP API gateway client
//!
//! Thin, stateless-per-call wrapper around `reqwest`. The only state is the
//! bearer token, which is mirrored into a [`TokenStore`].

use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};
use url::Url;
use vaultline_common::{TokenStore, TokenStoreError};
use vaultline_domain::constants::{BEARER_PREFIX, CONTENT_TYPE_JSON};
use vaultline_domain::{
    ApiConfig, ApiError, AuthResponse, Credentials, Registration, TransactionQuery, UserProfile,
};

use super::request::ApiRequest;
use super::response::{ApiResponse, ResponseBody};
use crate::storage::MemoryTokenStore;

/// API gateway client
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    versioned_base: String,
    token: RwLock<Option<String>>,
    store: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Create a client and read the persisted token once.
    ///
    /// An unreadable store is logged and treated as empty.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the base URL is invalid or the HTTP
    /// client cannot be built.
    pub fn new(config: ApiConfig, store: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        Url::parse(&config.base_url)
            .map_err(|e| ApiError::Config(format!("Invalid base URL {}: {e}", config.base_url)))?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HTTP client: {e}")))?;

        let token = match store.load() {
            Ok(token) => token,
            Err(err) => {
                warn!(error = %err, "Failed to read persisted token; starting without one");
                None
            }
        };
        debug!(base_url = %config.base_url, has_token = token.is_some(), "API client created");

        Ok(Self {
            http,
            versioned_base: config.versioned_base(),
            config,
            token: RwLock::new(token),
            store,
        })
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Configuration the client was built with
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Current bearer token
    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    /// Replace the bearer token, or remove it with `None`.
    ///
    /// A new token is written to the store first and only kept in memory once
    /// the write succeeded. Removal always drops the in-memory copy, even when
    /// the store cannot be cleared.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Storage` if the store write fails.
    pub fn set_token(&self, token: Option<&str>) -> Result<(), ApiError> {
        match token {
            Some(token) => {
                self.store.save(token).map_err(storage_failure)?;
                *self.token.write() = Some(token.to_owned());
                debug!("Token updated");
                Ok(())
            }
            None => {
                *self.token.write() = None;
                debug!("Token cleared");
                self.store.clear().map_err(storage_failure)
            }
        }
    }

    /// Headers sent with every request
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));

        if let Some(token) = self.token.read().as_deref() {
            match HeaderValue::from_str(&format!("{BEARER_PREFIX}{token}")) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => warn!("Stored token is not a valid header value; sending without it"),
            }
        }
        headers
    }

    /// Issue one request against the versioned API.
    ///
    /// # Errors
    ///
    /// - `ApiError::Network` if no response was received
    /// - `ApiError::Api` for a non-success status
    /// - `ApiError::Decode` if a success body declared as JSON is malformed
    #[instrument(skip(self, body), fields(path = %path, method = %method))]
    pub async fn request(
        &self,
        path: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<ApiResponse, ApiError> {
        let url = self.endpoint(path);
        self.send(method, &url, body).await
    }

    /// Issue a request described by an [`ApiRequest`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::request`].
    pub async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        self.request(&request.path, request.method.clone(), request.body.as_ref()).await
    }

    /// Issue one request and decode the body into `T`.
    ///
    /// # Errors
    ///
    /// Everything [`Self::request`] returns, plus `ApiError::Decode` when
    /// the body does not match `T`.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        path: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<T, ApiError> {
        self.request(path, method, body).await?.json()
    }

    /// `POST /auth/login`
    ///
    /// # Errors
    ///
    /// See [`Self::request`]. Does not touch the token.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        self.post_serialized("/auth/login", credentials).await
    }

    /// `POST /auth/register`
    ///
    /// # Errors
    ///
    /// See [`Self::request`]. Does not touch the token.
    pub async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError> {
        self.post_serialized("/auth/register", registration).await
    }

    /// `POST /auth/logout`
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.request("/auth/logout", Method::POST, None).await.map(|_| ())
    }

    /// `GET /auth/profile`
    ///
    /// # Errors
    ///
    /// See [`Self::request`]; `ApiError::Decode` if the payload holds no
    /// profile object.
    pub async fn get_user_profile(&self) -> Result<UserProfile, ApiError> {
        let payload: Value = self.request_json("/auth/profile", Method::GET, None).await?;
        UserProfile::from_profile_payload(payload)
            .ok_or_else(|| ApiError::Decode("profile response is not an object".to_string()))
    }

    /// `GET /accounts`
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn get_accounts(&self) -> Result<Value, ApiError> {
        self.request_json("/accounts", Method::GET, None).await
    }

    /// `GET /accounts/{id}`
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn get_account(&self, id: &str) -> Result<Value, ApiError> {
        self.request_json(&format!("/accounts/{id}"), Method::GET, None).await
    }

    /// `GET /transactions` with the query's filters
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn get_transactions(&self, query: &TransactionQuery) -> Result<Value, ApiError> {
        let pairs = query.pairs();
        let path = if pairs.is_empty() {
            "/transactions".to_string()
        } else {
            let encoded = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(pairs)
                .finish();
            format!("/transactions?{encoded}")
        };
        self.request_json(&path, Method::GET, None).await
    }

    /// `POST /transactions`
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn create_transaction(&self, transaction: &Value) -> Result<Value, ApiError> {
        self.request_json("/transactions", Method::POST, Some(transaction)).await
    }

    /// `GET /dashboard/summary`
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn get_dashboard_summary(&self) -> Result<Value, ApiError> {
        self.request_json("/dashboard/summary", Method::GET, None).await
    }

    /// `GET /insights`, proxied to the AI insight service
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn get_insights(&self) -> Result<Value, ApiError> {
        self.request_json("/insights", Method::GET, None).await
    }

    /// `POST /payments`
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn create_payment(&self, payment: &Value) -> Result<Value, ApiError> {
        self.request_json("/payments", Method::POST, Some(payment)).await
    }

    /// Check API health at `GET /health`, outside the versioned prefix.
    ///
    /// Returns `Ok(false)` for a non-success status.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Network` if the server cannot be reached.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<bool, ApiError> {
        let url = format!("{}/health", self.config.base_url.trim_end_matches('/'));

        match self.send(Method::GET, &url, None).await {
            Ok(_) => {
                info!("API is healthy");
                Ok(true)
            }
            Err(ApiError::Api { status, .. }) => {
                warn!(status, "API returned non-success status");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    async fn post_serialized<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)
            .map_err(|e| ApiError::Decode(format!("Failed to serialize body: {e}")))?;
        self.request_json(path, Method::POST, Some(&body)).await
    }

    fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.versioned_base)
        } else {
            format!("{}/{path}", self.versioned_base)
        }
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse, ApiError> {
        debug!(url = %url, "Sending request");

        let mut request = self.http.request(method, url).headers(self.headers());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|err| {
            warn!(error = %err, "Request failed before a response was received");
            ApiError::network(err.to_string())
        })?;

        let status = response.status();
        let content_type =
            response.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok()).map(str::to_owned);
        let text = response.text().await.map_err(|err| {
            warn!(error = %err, "Failed to read response body");
            ApiError::network(err.to_string())
        })?;
        let parsed = ResponseBody::parse(content_type.as_deref(), text);

        if !status.is_success() {
            let status_text = status.canonical_reason().unwrap_or_default();
            debug!(status = status.as_u16(), "Request returned error status");
            let body = parsed.ok().and_then(|body| body.as_json().cloned());
            return Err(ApiError::from_response(status.as_u16(), status_text, body));
        }

        let body = parsed.map_err(|err| {
            ApiError::Decode(format!("Response declared JSON but could not be parsed: {err}"))
        })?;
        debug!(status = status.as_u16(), "Request succeeded");
        Ok(ApiResponse { status: status.as_u16(), ok: true, body })
    }
}

fn storage_failure(err: TokenStoreError) -> ApiError {
    warn!(error = %err, "Failed to persist token change");
    ApiError::Storage(err.to_string())
}

/// Builder for [`ApiClient`]
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ApiConfig>,
    store: Option<Arc<dyn TokenStore>>,
}

impl ApiClientBuilder {
    /// Set the API configuration
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the token store
    pub fn token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Build the API client.
    ///
    /// Without a token store the token lives in memory only.
    ///
    /// # Errors
    ///
    /// Returns error if client creation fails
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let config = self.config.unwrap_or_default();
        let store = self.store.unwrap_or_else(|| Arc::new(MemoryTokenStore::new()));
        ApiClient::new(config, store)
    }
}
