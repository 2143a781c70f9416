//! Token store error type

use thiserror::Error;

use crate::security::KeychainError;

/// Failure to read or write the persisted token
#[derive(Debug, Error)]
pub enum TokenStoreError {
    /// The keychain backend failed
    #[error("Keychain error: {0}")]
    Keychain(#[from] KeychainError),

    /// File-system backend failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
