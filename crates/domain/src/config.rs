//! Configuration management

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_API_VERSION, DEFAULT_KEYCHAIN_SERVICE,
    DEFAULT_NOTIFICATION_TTL_MS, DEFAULT_REQUEST_TIMEOUT_MS, DEFAULT_TOKEN_FILE,
    DEFAULT_TOKEN_KEY,
};
use crate::impl_domain_enum_conversions;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub notifications: NotificationConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Scheme and host of the backend, without the versioned prefix
    pub base_url: String,
    /// Version segment placed after `/api/`
    pub version: String,
    pub timeout_ms: u64,
}

impl ApiConfig {
    /// Prefix every relative request path is appended to.
    #[must_use]
    pub fn versioned_base(&self) -> String {
        format!("{}/api/{}", self.base_url.trim_end_matches('/'), self.version.trim_matches('/'))
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            version: DEFAULT_API_VERSION.to_string(),
            timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

/// Where the bearer token is persisted between runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenStoreBackend {
    /// Platform keychain (macOS Keychain, Windows Credential Manager, Linux
    /// kernel keyring)
    Keychain,
    /// Plain file on disk
    #[default]
    File,
    /// Process memory only; nothing survives a restart
    Memory,
}

impl_domain_enum_conversions!(TokenStoreBackend {
    Keychain => "keychain",
    File => "file",
    Memory => "memory",
});

/// Token storage configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: TokenStoreBackend,
    /// Keychain service name
    pub service_name: String,
    /// Key the token is stored under
    pub token_key: String,
    /// Path used by the file backend
    pub file_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: TokenStoreBackend::default(),
            service_name: DEFAULT_KEYCHAIN_SERVICE.to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            file_path: PathBuf::from(DEFAULT_TOKEN_FILE),
        }
    }
}

/// Notification queue configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Lifetime of a notification before automatic removal
    pub ttl_ms: u64,
}

impl NotificationConfig {
    #[must_use]
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { ttl_ms: DEFAULT_NOTIFICATION_TTL_MS }
    }
}
