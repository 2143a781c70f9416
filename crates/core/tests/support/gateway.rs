//! Scripted `AuthGateway` for session controller tests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use tokio::sync::Notify;
use vaultline_core::AuthGateway;
use vaultline_domain::{ApiError, AuthResponse, Credentials, Registration, UserProfile};

/// Gateway whose responses are configured up front
///
/// Each operation returns a clone of its scripted result. A gate, when set,
/// holds the call until [`Notify::notify_one`] is called on it.
pub struct ScriptedGateway {
    token: RwLock<Option<String>>,
    login: Mutex<Result<AuthResponse, ApiError>>,
    register: Mutex<Result<AuthResponse, ApiError>>,
    logout: Mutex<Result<(), ApiError>>,
    profile: Mutex<Result<UserProfile, ApiError>>,
    login_gate: Mutex<Option<Arc<Notify>>>,
    queued_logins: Mutex<VecDeque<(Result<AuthResponse, ApiError>, Arc<Notify>)>>,
    profile_gate: Mutex<Option<Arc<Notify>>>,
    fail_token_writes: AtomicBool,
    calls: Mutex<Vec<&'static str>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        let unscripted = || ApiError::network("not scripted");
        Self {
            token: RwLock::new(None),
            login: Mutex::new(Err(unscripted())),
            register: Mutex::new(Err(unscripted())),
            logout: Mutex::new(Ok(())),
            profile: Mutex::new(Err(unscripted())),
            login_gate: Mutex::new(None),
            queued_logins: Mutex::new(VecDeque::new()),
            profile_gate: Mutex::new(None),
            fail_token_writes: AtomicBool::new(false),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Gateway that starts with a persisted token
    pub fn with_token(token: &str) -> Self {
        let gateway = Self::new();
        *gateway.token.write() = Some(token.to_string());
        gateway
    }

    pub fn script_login(&self, result: Result<AuthResponse, ApiError>) {
        *self.login.lock() = result;
    }

    pub fn script_register(&self, result: Result<AuthResponse, ApiError>) {
        *self.register.lock() = result;
    }

    pub fn script_logout(&self, result: Result<(), ApiError>) {
        *self.logout.lock() = result;
    }

    pub fn script_profile(&self, result: Result<UserProfile, ApiError>) {
        *self.profile.lock() = result;
    }

    /// Hold login calls until the returned gate is notified
    pub fn gate_login(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.login_gate.lock() = Some(Arc::clone(&gate));
        gate
    }

    /// Queue a result for one future login call, held until the returned
    /// gate is notified. Queued results are consumed in call order and take
    /// precedence over [`Self::script_login`].
    pub fn queue_login(&self, result: Result<AuthResponse, ApiError>) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.queued_logins.lock().push_back((result, Arc::clone(&gate)));
        gate
    }

    /// Hold profile fetches until the returned gate is notified
    pub fn gate_profile(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.profile_gate.lock() = Some(Arc::clone(&gate));
        gate
    }

    pub fn fail_token_writes(&self, fail: bool) {
        self.fail_token_writes.store(fail, Ordering::SeqCst);
    }

    pub fn stored_token(&self) -> Option<String> {
        self.token.read().clone()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().push(call);
    }
}

impl Default for ScriptedGateway {
    fn default() -> Self {
        Self::new()
    }
}

async fn wait_on(gate: &Mutex<Option<Arc<Notify>>>) {
    let gate = gate.lock().clone();
    if let Some(gate) = gate {
        gate.notified().await;
    }
}

#[async_trait]
impl AuthGateway for ScriptedGateway {
    async fn login(&self, _credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        self.record("login");
        let queued = self.queued_logins.lock().pop_front();
        if let Some((result, gate)) = queued {
            gate.notified().await;
            return result;
        }
        wait_on(&self.login_gate).await;
        self.login.lock().clone()
    }

    async fn register(&self, _registration: &Registration) -> Result<AuthResponse, ApiError> {
        self.record("register");
        self.register.lock().clone()
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.record("logout");
        self.logout.lock().clone()
    }

    async fn fetch_profile(&self) -> Result<UserProfile, ApiError> {
        self.record("fetch_profile");
        wait_on(&self.profile_gate).await;
        self.profile.lock().clone()
    }

    fn current_token(&self) -> Option<String> {
        self.token.read().clone()
    }

    fn set_token(&self, token: Option<&str>) -> Result<(), ApiError> {
        if token.is_none() {
            *self.token.write() = None;
        }
        if self.fail_token_writes.load(Ordering::SeqCst) {
            return Err(ApiError::Storage("keychain locked".into()));
        }
        *self.token.write() = token.map(str::to_owned);
        Ok(())
    }
}
