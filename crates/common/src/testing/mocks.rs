//! Mock implementations of common traits

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::security::{KeychainError, SecretStore};

type StorageData = Arc<Mutex<HashMap<String, String>>>;

/// Mock keychain provider that stores secrets in memory.
///
/// Clones share storage, so a test can hand one clone to the code under test
/// and inspect the other. Nothing touches the platform keychain.
#[derive(Clone, Debug)]
pub struct MockKeychainProvider {
    storage: StorageData,
    fail_writes: Arc<AtomicBool>,
    service_name: String,
}

impl MockKeychainProvider {
    /// Create a new mock keychain provider with a service name for namespacing.
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            storage: Arc::new(Mutex::new(HashMap::new())),
            fail_writes: Arc::new(AtomicBool::new(false)),
            service_name: service_name.into(),
        }
    }

    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Make every subsequent write and delete fail with
    /// `KeychainError::AccessFailed`.
    pub fn fail_writes(&self, enabled: bool) {
        self.fail_writes.store(enabled, Ordering::SeqCst);
    }

    /// Number of stored secrets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.storage.lock().is_empty()
    }

    /// Clear all stored secrets.
    pub fn clear_all(&self) {
        self.storage.lock().clear();
    }

    fn check_writable(&self, key: &str) -> Result<(), KeychainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(KeychainError::AccessFailed(format!("mock write refused for {key}")));
        }
        Ok(())
    }
}

impl Default for MockKeychainProvider {
    fn default() -> Self {
        Self::new("vaultline-test")
    }
}

impl SecretStore for MockKeychainProvider {
    fn set_secret(&self, key: &str, value: &str) -> Result<(), KeychainError> {
        self.check_writable(key)?;
        self.storage.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get_secret(&self, key: &str) -> Result<String, KeychainError> {
        self.storage.lock().get(key).cloned().ok_or(KeychainError::NotFound)
    }

    fn delete_secret(&self, key: &str) -> Result<(), KeychainError> {
        self.check_writable(key)?;
        self.storage.lock().remove(key);
        Ok(())
    }

    fn secret_exists(&self, key: &str) -> bool {
        self.storage.lock().contains_key(key)
    }
}
