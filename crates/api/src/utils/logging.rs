//! Tracing setup and structured command logging

use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vaultline_domain::VaultlineError;

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info,vaultline=debug";

/// Environment variable selecting the log format (`json` or `pretty`)
pub const LOG_FORMAT_ENV: &str = "VAULTLINE_LOG_FORMAT";

/// Install the global tracing subscriber.
///
/// Honors `RUST_LOG`; `VAULTLINE_LOG_FORMAT=json` switches to JSON lines.
/// Calling it more than once is harmless.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let json = std::env::var(LOG_FORMAT_ENV).is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let installed = if json { builder.json().try_init() } else { builder.try_init() };

    if installed.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

/// Log the outcome of a command execution with structured fields.
///
/// # Parameters
/// * `command` - Logical command identifier (e.g. `"auth::login"`).
/// * `elapsed` - Duration the command execution took.
/// * `error_type` - Stable label of the failure, `None` on success.
///
/// Callers must avoid forwarding sensitive values in `command`.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, error_type: Option<&str>) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    match error_type {
        None => info!(command, duration_ms, "command_execution_success"),
        Some(error_type) => {
            warn!(command, duration_ms, error_type, "command_execution_failure");
        }
    }
}

/// Convert a `VaultlineError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &VaultlineError) -> &'static str {
    match error {
        VaultlineError::Config(_) => "config",
        VaultlineError::Storage(_) => "storage",
        VaultlineError::Network(_) => "network",
        VaultlineError::Auth(_) => "auth",
        VaultlineError::Internal(_) => "internal",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        assert_eq!(error_label(&VaultlineError::Network("x".into())), "network");
        assert_eq!(error_label(&VaultlineError::Auth("x".into())), "auth");
        assert_eq!(error_label(&VaultlineError::Storage("x".into())), "storage");
    }

    #[test]
    fn init_twice_is_harmless() {
        init_tracing();
        init_tracing();
    }
}
