//! Trait abstraction over secret storage
//!
//! Lets token persistence run against the platform keychain in production
//! and an in-memory map in tests.

use thiserror::Error;

/// Key/value storage for secrets
pub trait SecretStore: Send + Sync {
    /// Store a secret value under `key`, replacing any previous value
    ///
    /// # Errors
    /// Returns `KeychainError::AccessFailed` if the backend rejects the write
    fn set_secret(&self, key: &str, value: &str) -> Result<(), KeychainError>;

    /// Retrieve the secret stored under `key`
    ///
    /// # Errors
    /// Returns `KeychainError::NotFound` if nothing is stored under `key`
    fn get_secret(&self, key: &str) -> Result<String, KeychainError>;

    /// Delete the secret stored under `key` (idempotent)
    ///
    /// # Errors
    /// Returns `KeychainError::AccessFailed` if the backend rejects the delete
    fn delete_secret(&self, key: &str) -> Result<(), KeychainError>;

    /// Check whether a secret exists under `key`
    fn secret_exists(&self, key: &str) -> bool {
        self.get_secret(key).is_ok()
    }
}

/// Keychain error types
#[derive(Debug, Error)]
pub enum KeychainError {
    /// Keychain access failed (permission denied, not available, etc.)
    #[error("Keychain access failed: {0}")]
    AccessFailed(String),

    /// Entry not found in keychain
    #[error("Entry not found")]
    NotFound,
}
