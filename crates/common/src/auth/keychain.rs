//! Token storage layered on top of a [`SecretStore`].
//!
//! The token is kept as a plain string under a single fixed key.

use tracing::debug;

use super::error::TokenStoreError;
use super::traits::TokenStore;
use crate::security::{KeychainError, SecretStore};

/// [`TokenStore`] that keeps the token under one key of a secret store
#[derive(Debug, Clone)]
pub struct KeychainTokenStore<S: SecretStore> {
    secrets: S,
    key: String,
}

impl<S: SecretStore> KeychainTokenStore<S> {
    /// Create a token store writing under `key`
    pub fn new(secrets: S, key: impl Into<String>) -> Self {
        Self { secrets, key: key.into() }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Underlying secret store
    #[must_use]
    pub fn secrets(&self) -> &S {
        &self.secrets
    }
}

impl<S: SecretStore> TokenStore for KeychainTokenStore<S> {
    fn load(&self) -> Result<Option<String>, TokenStoreError> {
        match self.secrets.get_secret(&self.key) {
            Ok(token) if token.is_empty() => Ok(None),
            Ok(token) => {
                debug!(key = %self.key, "Loaded persisted token");
                Ok(Some(token))
            }
            Err(KeychainError::NotFound) => Ok(None),
            Err(other) => Err(other.into()),
        }
    }

    fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        self.secrets.set_secret(&self.key, token)?;
        debug!(key = %self.key, "Persisted token");
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        self.secrets.delete_secret(&self.key)?;
        debug!(key = %self.key, "Cleared persisted token");
        Ok(())
    }
}
