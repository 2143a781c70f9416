//! Domain constants
//!
//! Defaults shared by the configuration layer, the API client and the
//! notification queue.

// API defaults
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_API_VERSION: &str = "v1";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

// Token storage
pub const DEFAULT_KEYCHAIN_SERVICE: &str = "Vaultline.api";
pub const DEFAULT_TOKEN_KEY: &str = "auth_token";
pub const DEFAULT_TOKEN_FILE: &str = "vaultline_token";

// Notifications
pub const DEFAULT_NOTIFICATION_TTL_MS: u64 = 5_000;

// Headers
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const BEARER_PREFIX: &str = "Bearer ";
