//! `AuthGateway` port implementation for the session controller

use async_trait::async_trait;
use vaultline_core::AuthGateway;
use vaultline_domain::{ApiError, AuthResponse, Credentials, Registration, UserProfile};

use super::client::ApiClient;

#[async_trait]
impl AuthGateway for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        ApiClient::login(self, credentials).await
    }

    async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError> {
        ApiClient::register(self, registration).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        ApiClient::logout(self).await
    }

    async fn fetch_profile(&self) -> Result<UserProfile, ApiError> {
        self.get_user_profile().await
    }

    fn current_token(&self) -> Option<String> {
        self.token()
    }

    fn set_token(&self, token: Option<&str>) -> Result<(), ApiError> {
        ApiClient::set_token(self, token)
    }
}
