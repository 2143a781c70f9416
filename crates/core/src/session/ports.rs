//! Port interface between the session controller and the API gateway

use async_trait::async_trait;
use vaultline_domain::{ApiError, AuthResponse, Credentials, Registration, UserProfile};

/// Authentication operations offered by the API gateway client
///
/// The gateway owns the bearer token; the controller only tells it when to
/// persist or clear one.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchange credentials for a token and profile
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError>;

    /// Create an account and receive a token and profile
    async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError>;

    /// Invalidate the current token on the backend
    async fn logout(&self) -> Result<(), ApiError>;

    /// Fetch the profile of the user the current token belongs to
    async fn fetch_profile(&self) -> Result<UserProfile, ApiError>;

    /// Token currently held in memory
    fn current_token(&self) -> Option<String>;

    /// Replace (or with `None`, remove) the token in memory and in durable
    /// storage
    ///
    /// # Errors
    /// Returns `ApiError::Storage` if the durable write fails. A new token is
    /// then not adopted, while a removal still drops the in-memory copy.
    fn set_token(&self, token: Option<&str>) -> Result<(), ApiError>;
}
