//! Token store port

use super::error::TokenStoreError;

/// Durable slot holding the bearer token
///
/// Exactly one token is stored; an empty slot means the user is anonymous.
pub trait TokenStore: Send + Sync {
    /// Read the persisted token
    ///
    /// # Errors
    /// Returns error if the backend cannot be read. A missing token is
    /// `Ok(None)`, not an error.
    fn load(&self) -> Result<Option<String>, TokenStoreError>;

    /// Persist `token`, replacing any previous value
    ///
    /// # Errors
    /// Returns error if the write fails
    fn save(&self, token: &str) -> Result<(), TokenStoreError>;

    /// Remove the persisted token (idempotent)
    ///
    /// # Errors
    /// Returns error if the delete fails
    fn clear(&self) -> Result<(), TokenStoreError>;
}
