//! Platform keychain provider
//!
//! Thin wrapper over the `keyring` crate: macOS Keychain Access, Windows
//! Credential Manager, Linux kernel keyring.
//!
//! ## Usage
//!
//! ```no_run
//! use vaultline_common::security::{KeychainProvider, SecretStore};
//!
//! let keychain = KeychainProvider::new("Vaultline.api");
//! keychain.set_secret("auth_token", "opaque-token")?;
//! assert_eq!(keychain.get_secret("auth_token")?, "opaque-token");
//! # Ok::<(), vaultline_common::security::KeychainError>(())
//! ```

use keyring::Entry;
use tracing::debug;

use super::traits::{KeychainError, SecretStore};

/// Keychain provider scoped to one service name
#[derive(Debug, Clone)]
pub struct KeychainProvider {
    service_name: String,
}

impl KeychainProvider {
    /// Create a new keychain provider for a specific service
    ///
    /// # Examples
    /// ```
    /// use vaultline_common::security::KeychainProvider;
    ///
    /// let keychain = KeychainProvider::new("Vaultline.api");
    /// assert_eq!(keychain.service_name(), "Vaultline.api");
    /// ```
    pub fn new(service_name: impl Into<String>) -> Self {
        Self { service_name: service_name.into() }
    }

    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    fn create_entry(&self, account: &str) -> Result<Entry, KeychainError> {
        Entry::new(&self.service_name, account).map_err(|e| {
            KeychainError::AccessFailed(format!("Failed to create keychain entry: {}", e))
        })
    }
}

impl SecretStore for KeychainProvider {
    fn set_secret(&self, key: &str, value: &str) -> Result<(), KeychainError> {
        debug!(service = %self.service_name, key = %key, "Storing secret in keychain");

        let entry = self.create_entry(key)?;
        entry.set_password(value).map_err(|e| {
            KeychainError::AccessFailed(format!("Failed to store secret for {}: {}", key, e))
        })
    }

    fn get_secret(&self, key: &str) -> Result<String, KeychainError> {
        debug!(service = %self.service_name, key = %key, "Retrieving secret from keychain");

        let entry = self.create_entry(key)?;
        entry.get_password().map_err(|e| {
            if matches!(e, keyring::Error::NoEntry) {
                KeychainError::NotFound
            } else {
                KeychainError::AccessFailed(format!("Failed to retrieve secret for {}: {}", key, e))
            }
        })
    }

    fn delete_secret(&self, key: &str) -> Result<(), KeychainError> {
        debug!(service = %self.service_name, key = %key, "Deleting secret from keychain");

        let entry = self.create_entry(key)?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(KeychainError::AccessFailed(format!(
                "Failed to delete secret for {}: {}",
                key, e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_keeps_service_name() {
        let keychain = KeychainProvider::new("test-service");
        assert_eq!(keychain.service_name(), "test-service");
    }
}
