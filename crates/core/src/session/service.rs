//! Session controller - drives the session state machine

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::{Map, Value};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};
use vaultline_domain::{
    ApiError, AuthResponse, Credentials, Registration, SessionEvent, SessionState, UserProfile,
};

use super::ports::AuthGateway;

/// Owner of the client's [`SessionState`]
///
/// Observers read the state through [`SessionController::state`] or watch
/// it through [`SessionController::subscribe`]; only the controller writes
/// it.
///
/// User actions (login, register, logout) take precedence over a silent
/// restoration that is still in flight: each action bumps a generation
/// counter, and a restoration that finishes under a different generation
/// discards its outcome without touching the state or the stored token.
pub struct SessionController<G: AuthGateway + ?Sized = dyn AuthGateway> {
    gateway: Arc<G>,
    state: watch::Sender<SessionState>,
    generation: Mutex<u64>,
    restoring: watch::Sender<bool>,
}

impl<G: AuthGateway + ?Sized> SessionController<G> {
    /// Create a controller in the `Anonymous` state without attempting
    /// restoration
    pub fn new(gateway: Arc<G>) -> Self {
        let (state, _) = watch::channel(SessionState::Anonymous);
        let (restoring, _) = watch::channel(false);
        Self { gateway, state, generation: Mutex::new(0), restoring }
    }

    /// Gateway this controller authenticates through
    pub fn gateway(&self) -> &Arc<G> {
        &self.gateway
    }

    /// Snapshot of the current state
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Whether a silent restoration is in flight
    pub fn is_restoring(&self) -> bool {
        *self.restoring.borrow()
    }

    /// Wait until no silent restoration is in flight
    pub async fn wait_restored(&self) {
        let mut restoring = self.restoring.subscribe();
        // The sender lives in `self`, so the channel stays open while borrowed.
        let _ = restoring.wait_for(|active| !active).await;
    }

    /// `true` while the state is `Authenticated`
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Current user, if authenticated
    pub fn user(&self) -> Option<UserProfile> {
        self.state.borrow().user().cloned()
    }

    /// Validate a persisted token and, if it is still accepted, enter
    /// `Authenticated` without user interaction.
    ///
    /// Returns `true` if the session was restored. With no persisted token
    /// the state stays `Anonymous` and no request is made. A rejected token
    /// is cleared from storage.
    pub async fn restore(&self) -> bool {
        match self.begin_restore() {
            Some(generation) => self.finish_restore(generation).await,
            None => false,
        }
    }

    /// Start login; the state moves to `Authenticating` immediately.
    ///
    /// # Errors
    /// Any gateway or storage error. The failure is also recorded in the
    /// state as `Error { message }`.
    #[instrument(skip(self, credentials))]
    pub async fn login(&self, credentials: &Credentials) -> Result<UserProfile, ApiError> {
        self.begin_user_action(Some(SessionEvent::LoginStarted));
        let outcome = self.gateway.login(credentials).await;
        self.complete_authentication("login", outcome)
    }

    /// Start registration; behaves exactly like [`Self::login`].
    ///
    /// # Errors
    /// Any gateway or storage error, also recorded in the state.
    #[instrument(skip(self, registration))]
    pub async fn register(&self, registration: &Registration) -> Result<UserProfile, ApiError> {
        self.begin_user_action(Some(SessionEvent::LoginStarted));
        let outcome = self.gateway.register(registration).await;
        self.complete_authentication("register", outcome)
    }

    /// End the session.
    ///
    /// Never fails: a remote logout failure is logged and the local session
    /// is cleared regardless.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        self.begin_user_action(None);

        if self.gateway.current_token().is_some() {
            if let Err(err) = self.gateway.logout().await {
                warn!(error = %err, "Remote logout failed; clearing local session anyway");
            }
        }

        if let Err(err) = self.gateway.set_token(None) {
            error!(error = %err, "Failed to clear stored token during logout");
        }

        self.apply(SessionEvent::LoggedOut);
        info!("Logged out");
    }

    /// Re-fetch the current user's profile.
    ///
    /// A 401 while authenticated means the token has been revoked; the
    /// session is expired and the stored token cleared.
    ///
    /// # Errors
    /// Any gateway error.
    #[instrument(skip(self))]
    pub async fn refresh_profile(&self) -> Result<UserProfile, ApiError> {
        match self.gateway.fetch_profile().await {
            Ok(user) => {
                self.apply(SessionEvent::ProfileRefreshed(user.clone()));
                Ok(user)
            }
            Err(err) if err.is_unauthorized() && self.is_authenticated() => {
                warn!(error = %err, "Token rejected while refreshing profile; expiring session");
                self.clear_stored_token();
                self.apply(SessionEvent::SessionExpired);
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Merge `partial` into the current user. Returns `false` (and changes
    /// nothing) unless authenticated.
    pub fn update_user(&self, partial: Map<String, Value>) -> bool {
        if !self.is_authenticated() {
            debug!("Ignoring user update outside an authenticated session");
            return false;
        }
        self.apply(SessionEvent::UserUpdated(partial));
        true
    }

    /// Dismiss an `Error` state, returning to `Anonymous`
    pub fn clear_error(&self) {
        self.apply(SessionEvent::ErrorCleared);
    }

    /// Mark a restoration as started if there is a persisted token and no
    /// session yet. Returns the generation the restoration runs under.
    fn begin_restore(&self) -> Option<u64> {
        if self.gateway.current_token().is_none() {
            debug!("No persisted token; skipping session restoration");
            return None;
        }

        let generation = self.generation.lock();
        if !matches!(*self.state.borrow(), SessionState::Anonymous) {
            debug!(
                state = self.state.borrow().label(),
                "Session already active; skipping restoration"
            );
            return None;
        }
        self.restoring.send_replace(true);
        self.apply(SessionEvent::RestoreStarted);
        Some(*generation)
    }

    async fn finish_restore(&self, started_under: u64) -> bool {
        let outcome = self.gateway.fetch_profile().await;

        let generation = self.generation.lock();
        let restored = if *generation == started_under {
            self.settle_restore(outcome)
        } else {
            debug!("User action superseded session restoration; discarding result");
            false
        };
        self.restoring.send_replace(false);
        restored
    }

    fn settle_restore(&self, outcome: Result<UserProfile, ApiError>) -> bool {
        match outcome {
            Ok(user) => match self.gateway.current_token() {
                Some(token) => {
                    self.apply(SessionEvent::RestoreSucceeded { user, token });
                    info!("Session restored");
                    true
                }
                None => {
                    warn!("Persisted token disappeared during restoration");
                    self.apply(SessionEvent::RestoreFailed);
                    false
                }
            },
            Err(err) => {
                warn!(error = %err, "Session restoration failed; clearing persisted token");
                self.clear_stored_token();
                self.apply(SessionEvent::RestoreFailed);
                false
            }
        }
    }

    /// Supersede any in-flight restoration, then apply `event`.
    fn begin_user_action(&self, event: Option<SessionEvent>) {
        let mut generation = self.generation.lock();
        *generation += 1;
        if let Some(event) = event {
            self.apply(event);
        }
    }

    fn complete_authentication(
        &self,
        operation: &'static str,
        outcome: Result<AuthResponse, ApiError>,
    ) -> Result<UserProfile, ApiError> {
        let response = match outcome {
            Ok(response) => response,
            Err(err) => {
                warn!(operation, error = %err, "Authentication failed");
                self.apply(SessionEvent::LoginFailed { message: err.user_message() });
                return Err(err);
            }
        };

        if let Err(err) = self.gateway.set_token(Some(&response.access_token)) {
            error!(operation, error = %err, "Failed to persist token");
            self.apply(SessionEvent::LoginFailed { message: err.user_message() });
            return Err(err);
        }

        let user = response.user;
        self.apply(SessionEvent::LoginSucceeded {
            user: user.clone(),
            token: response.access_token,
        });
        info!(operation, "Authentication succeeded");
        Ok(user)
    }

    fn clear_stored_token(&self) {
        if let Err(err) = self.gateway.set_token(None) {
            error!(error = %err, "Failed to clear stored token");
        }
    }

    /// Apply one event; observers are only notified when the state changes.
    fn apply(&self, event: SessionEvent) {
        self.state.send_if_modified(|state| {
            let next = state.transition(event);
            if next == *state {
                return false;
            }
            debug!(from = state.label(), to = next.label(), "Session state changed");
            *state = next;
            true
        });
    }
}

impl<G: AuthGateway + ?Sized + 'static> SessionController<G> {
    /// Create a controller and kick off restoration in the background.
    ///
    /// If a token is persisted the returned controller is already
    /// `Authenticating`. Must be called within a tokio runtime.
    pub fn start(gateway: Arc<G>) -> Arc<Self> {
        let controller = Arc::new(Self::new(gateway));
        controller.spawn_restore();
        controller
    }

    /// Run [`Self::restore`] on a background task.
    ///
    /// Returns `None` when there is nothing to restore.
    pub fn spawn_restore(self: &Arc<Self>) -> Option<JoinHandle<bool>> {
        let generation = self.begin_restore()?;
        let controller = Arc::clone(self);
        Some(tokio::spawn(async move { controller.finish_restore(generation).await }))
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde_json::json;

    use super::*;

    /// Gateway that accepts everything and remembers its token
    #[derive(Default)]
    struct AcceptingGateway {
        token: parking_lot::RwLock<Option<String>>,
    }

    fn profile() -> UserProfile {
        UserProfile::from_value(json!({"id": 1, "email": "a@x.io", "name": "A"}))
            .expect("object profile")
    }

    #[async_trait]
    impl AuthGateway for AcceptingGateway {
        async fn login(&self, _credentials: &Credentials) -> Result<AuthResponse, ApiError> {
            Ok(AuthResponse { access_token: "t1".into(), token_type: None, user: profile() })
        }

        async fn register(&self, _registration: &Registration) -> Result<AuthResponse, ApiError> {
            Ok(AuthResponse { access_token: "t2".into(), token_type: None, user: profile() })
        }

        async fn logout(&self) -> Result<(), ApiError> {
            Ok(())
        }

        async fn fetch_profile(&self) -> Result<UserProfile, ApiError> {
            Ok(profile())
        }

        fn current_token(&self) -> Option<String> {
            self.token.read().clone()
        }

        fn set_token(&self, token: Option<&str>) -> Result<(), ApiError> {
            *self.token.write() = token.map(str::to_owned);
            Ok(())
        }
    }

    #[tokio::test]
    async fn new_controller_is_anonymous() {
        let controller = SessionController::new(Arc::new(AcceptingGateway::default()));
        assert_eq!(controller.state(), SessionState::Anonymous);
        assert!(!controller.is_restoring());
    }

    #[tokio::test]
    async fn restore_without_token_makes_no_request() {
        let controller = SessionController::new(Arc::new(AcceptingGateway::default()));
        assert!(!controller.restore().await);
        assert_eq!(controller.state(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn update_user_requires_session() {
        let controller = SessionController::new(Arc::new(AcceptingGateway::default()));
        let mut partial = Map::new();
        partial.insert("name".into(), json!("B"));
        assert!(!controller.update_user(partial.clone()));

        controller.login(&Credentials::new("a@x.io", "pw")).await.unwrap();
        assert!(controller.update_user(partial));
        let user = controller.user().unwrap();
        assert_eq!(user.get("name"), Some(&json!("B")));
        assert_eq!(user.email(), Some("a@x.io"));
    }

    #[tokio::test]
    async fn unchanged_state_does_not_notify() {
        let controller = SessionController::new(Arc::new(AcceptingGateway::default()));
        let rx = controller.subscribe();

        controller.clear_error();
        assert!(!rx.has_changed().unwrap());
    }
}
