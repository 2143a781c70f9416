//! Authentication commands
//!
//! Each command drives the session controller and reports the outcome
//! through the notification queue as well as the returned result.

use serde_json::{Map, Value};
use tracing::instrument;
use vaultline_domain::{
    ApiError, Credentials, Registration, Result as DomainResult, SessionState, UserProfile,
    VaultlineError,
};

use crate::context::AppContext;
use crate::utils::command_helpers::execute_command;

/// Sign in with email and password
#[instrument(skip(context, password))]
pub async fn login(context: &AppContext, email: &str, password: &str) -> DomainResult<UserProfile> {
    execute_command("auth::login", || async move {
        let credentials = Credentials::new(email, password);
        match context.session.login(&credentials).await {
            Ok(user) => {
                context.notifications.success("Signed in", welcome_message(&user));
                Ok(user)
            }
            Err(err) => Err(report_failure(context, "Sign-in failed", err)),
        }
    })
    .await
}

/// Create an account and sign in with it
#[instrument(skip(context, registration), fields(email = %registration.email))]
pub async fn register(
    context: &AppContext,
    registration: Registration,
) -> DomainResult<UserProfile> {
    execute_command("auth::register", || async move {
        match context.session.register(&registration).await {
            Ok(user) => {
                context.notifications.success("Account created", welcome_message(&user));
                Ok(user)
            }
            Err(err) => Err(report_failure(context, "Registration failed", err)),
        }
    })
    .await
}

/// Sign out. Always ends anonymous, even if the server call fails.
#[instrument(skip(context))]
pub async fn logout(context: &AppContext) -> DomainResult<()> {
    execute_command("auth::logout", || async move {
        context.session.logout().await;
        context.notifications.info("Signed out", "You have been signed out.");
        Ok(())
    })
    .await
}

/// Re-fetch the signed-in user's profile
#[instrument(skip(context))]
pub async fn refresh_profile(context: &AppContext) -> DomainResult<UserProfile> {
    execute_command("auth::refresh_profile", || async move {
        context.session.refresh_profile().await.map_err(|err| {
            if err.is_unauthorized() {
                context
                    .notifications
                    .warning("Session expired", "Please sign in again to continue.");
                VaultlineError::from(err)
            } else {
                report_failure(context, "Could not refresh profile", err)
            }
        })
    })
    .await
}

/// Merge `partial` into the cached profile of the signed-in user
pub async fn update_profile(
    context: &AppContext,
    partial: Map<String, Value>,
) -> DomainResult<UserProfile> {
    execute_command("auth::update_profile", || async move {
        if !context.session.update_user(partial) {
            return Err(VaultlineError::Auth("Not signed in".to_string()));
        }
        context.session.user().ok_or_else(|| VaultlineError::Auth("Not signed in".to_string()))
    })
    .await
}

/// Current session state snapshot
pub fn session_state(context: &AppContext) -> SessionState {
    context.session.state()
}

/// Dismiss a displayed authentication error
pub fn clear_session_error(context: &AppContext) {
    context.session.clear_error();
}

fn welcome_message(user: &UserProfile) -> String {
    match user.get("name").and_then(Value::as_str).or_else(|| user.email()) {
        Some(name) => format!("Welcome, {name}."),
        None => "Welcome.".to_string(),
    }
}

fn report_failure(context: &AppContext, title: &str, err: ApiError) -> VaultlineError {
    context.notifications.error(title, err.user_message());
    VaultlineError::from(err)
}
