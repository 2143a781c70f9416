//! Application context - dependency injection container

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use vaultline_common::TokenStore;
use vaultline_core::{NotificationQueue, SessionController};
use vaultline_domain::{Config, Result, SessionState};
use vaultline_infra::{build_token_store, ApiClient};

/// Application context - holds all services and dependencies
///
/// Built once at startup. Construction spawns session restoration, so it
/// must happen inside a tokio runtime.
pub struct AppContext {
    pub config: Config,
    pub api: Arc<ApiClient>,
    pub session: Arc<SessionController<ApiClient>>,
    pub notifications: NotificationQueue,
}

impl AppContext {
    /// Build the context with the token store selected by `config`
    ///
    /// # Errors
    /// Returns `VaultlineError::Config` if the API client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        let store = build_token_store(&config.storage);
        Self::with_store(config, store)
    }

    /// Build the context around an explicit token store
    ///
    /// # Errors
    /// Returns `VaultlineError::Config` if the API client cannot be built.
    pub fn with_store(config: Config, store: Arc<dyn TokenStore>) -> Result<Self> {
        let api = Arc::new(ApiClient::new(config.api.clone(), store)?);
        let session = SessionController::start(Arc::clone(&api));
        let notifications = NotificationQueue::new(config.notifications.ttl());

        info!(
            api = %config.api.versioned_base(),
            restoring = session.is_restoring(),
            "Application context initialized"
        );

        Ok(Self { config, api, session, notifications })
    }

    /// Wait for startup restoration to settle, up to `timeout`.
    ///
    /// Returns the state at that point.
    pub async fn wait_until_ready(&self, timeout: Duration) -> SessionState {
        if tokio::time::timeout(timeout, self.session.wait_restored()).await.is_err() {
            warn!(?timeout, "Session restoration still running");
        }
        self.session.state()
    }
}
