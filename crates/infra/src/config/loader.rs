//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `VAULTLINE_API_URL` is unset, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `VAULTLINE_API_URL`: Backend scheme and host (required)
//! - `VAULTLINE_API_VERSION`: Version segment after `/api/` (default `v1`)
//! - `VAULTLINE_API_TIMEOUT_MS`: Request timeout in milliseconds
//! - `VAULTLINE_TOKEN_STORE`: `keychain`, `file` or `memory`
//! - `VAULTLINE_TOKEN_FILE`: Token path for the file backend
//! - `VAULTLINE_KEYCHAIN_SERVICE`: Keychain service name
//! - `VAULTLINE_TOKEN_KEY`: Key the token is stored under
//! - `VAULTLINE_NOTIFICATION_TTL_MS`: Notification lifetime in milliseconds
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.{json,toml}` and `./vaultline.{json,toml}`
//! 2. `../config.{json,toml}` and `../../config.{json,toml}`
//! 3. The same names relative to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use vaultline_domain::{
    ApiConfig, Config, NotificationConfig, Result, StorageConfig, TokenStoreBackend,
    VaultlineError,
};

const ENV_API_URL: &str = "VAULTLINE_API_URL";
const ENV_API_VERSION: &str = "VAULTLINE_API_VERSION";
const ENV_API_TIMEOUT_MS: &str = "VAULTLINE_API_TIMEOUT_MS";
const ENV_TOKEN_STORE: &str = "VAULTLINE_TOKEN_STORE";
const ENV_TOKEN_FILE: &str = "VAULTLINE_TOKEN_FILE";
const ENV_KEYCHAIN_SERVICE: &str = "VAULTLINE_KEYCHAIN_SERVICE";
const ENV_TOKEN_KEY: &str = "VAULTLINE_TOKEN_KEY";
const ENV_NOTIFICATION_TTL_MS: &str = "VAULTLINE_NOTIFICATION_TTL_MS";

const CONFIG_FILE_NAMES: [&str; 8] = [
    "config.json",
    "config.toml",
    "vaultline.json",
    "vaultline.toml",
    "../config.json",
    "../config.toml",
    "../../config.json",
    "../../config.toml",
];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the required
/// variable is missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `VaultlineError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - An environment value cannot be parsed
pub fn load() -> Result<Config> {
    if std::env::var_os(ENV_API_URL).is_none() {
        tracing::debug!("{ENV_API_URL} not set, trying config file");
        return load_from_file(None);
    }

    let config = load_from_env()?;
    tracing::info!("Configuration loaded from environment variables");
    Ok(config)
}

/// Load configuration from environment variables
///
/// Only `VAULTLINE_API_URL` is required; everything else falls back to its
/// default.
///
/// # Errors
/// Returns `VaultlineError::Config` if the required variable is missing or
/// a value is invalid.
pub fn load_from_env() -> Result<Config> {
    let defaults = Config::default();

    let api = ApiConfig {
        base_url: env_var(ENV_API_URL)?,
        version: env_or(ENV_API_VERSION, defaults.api.version),
        timeout_ms: env_parse(ENV_API_TIMEOUT_MS, defaults.api.timeout_ms)?,
    };

    let backend = match std::env::var(ENV_TOKEN_STORE) {
        Ok(value) => TokenStoreBackend::from_str(&value).map_err(VaultlineError::Config)?,
        Err(_) => defaults.storage.backend,
    };
    let storage = StorageConfig {
        backend,
        service_name: env_or(ENV_KEYCHAIN_SERVICE, defaults.storage.service_name),
        token_key: env_or(ENV_TOKEN_KEY, defaults.storage.token_key),
        file_path: std::env::var_os(ENV_TOKEN_FILE)
            .map_or(defaults.storage.file_path, PathBuf::from),
    };

    let notifications = NotificationConfig {
        ttl_ms: env_parse(ENV_NOTIFICATION_TTL_MS, defaults.notifications.ttl_ms)?,
    };

    Ok(Config { api, storage, notifications })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
/// Sections and fields missing from the file take their defaults.
///
/// # Errors
/// Returns `VaultlineError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(VaultlineError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            VaultlineError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| VaultlineError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| VaultlineError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| VaultlineError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(VaultlineError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the working directory (and up to two parents), then the
/// directory holding the executable.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let roots = [
        std::env::current_dir().ok(),
        std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf)),
    ];

    roots
        .into_iter()
        .flatten()
        .flat_map(|root| CONFIG_FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        VaultlineError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Get optional environment variable, falling back to `default`
fn env_or(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

/// Parse optional numeric environment variable
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|e| VaultlineError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serial_test::serial;
    use tempfile::NamedTempFile;

    use super::*;

    const ALL_VARS: [&str; 8] = [
        ENV_API_URL,
        ENV_API_VERSION,
        ENV_API_TIMEOUT_MS,
        ENV_TOKEN_STORE,
        ENV_TOKEN_FILE,
        ENV_KEYCHAIN_SERVICE,
        ENV_TOKEN_KEY,
        ENV_NOTIFICATION_TTL_MS,
    ];

    fn clear_env() {
        for key in ALL_VARS {
            std::env::remove_var(key);
        }
    }

    fn temp_config(contents: &str, extension: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(extension).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    #[serial]
    fn test_load_from_env_minimal() {
        clear_env();
        std::env::set_var(ENV_API_URL, "https://api.vaultline.test");

        let config = load_from_env().unwrap();
        assert_eq!(config.api.base_url, "https://api.vaultline.test");
        assert_eq!(config.api.version, "v1");
        assert_eq!(config.api.timeout_ms, 30_000);
        assert_eq!(config.storage.backend, TokenStoreBackend::File);
        assert_eq!(config.storage.token_key, "auth_token");
        assert_eq!(config.notifications.ttl_ms, 5_000);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_from_env_all_vars_set() {
        clear_env();
        std::env::set_var(ENV_API_URL, "http://localhost:9000");
        std::env::set_var(ENV_API_VERSION, "v2");
        std::env::set_var(ENV_API_TIMEOUT_MS, "1500");
        std::env::set_var(ENV_TOKEN_STORE, "FILE");
        std::env::set_var(ENV_TOKEN_FILE, "/tmp/vaultline-token");
        std::env::set_var(ENV_KEYCHAIN_SERVICE, "Vaultline.test");
        std::env::set_var(ENV_TOKEN_KEY, "token");
        std::env::set_var(ENV_NOTIFICATION_TTL_MS, "250");

        let config = load_from_env().unwrap();
        assert_eq!(config.api.versioned_base(), "http://localhost:9000/api/v2");
        assert_eq!(config.api.timeout_ms, 1500);
        assert_eq!(config.storage.backend, TokenStoreBackend::File);
        assert_eq!(config.storage.file_path, PathBuf::from("/tmp/vaultline-token"));
        assert_eq!(config.storage.service_name, "Vaultline.test");
        assert_eq!(config.storage.token_key, "token");
        assert_eq!(config.notifications.ttl_ms, 250);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_from_env_missing_url() {
        clear_env();

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, VaultlineError::Config(_)), "Should be a Config error");
    }

    #[test]
    #[serial]
    fn test_load_from_env_invalid_number() {
        clear_env();
        std::env::set_var(ENV_API_URL, "http://localhost:8000");
        std::env::set_var(ENV_API_TIMEOUT_MS, "soon");

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, VaultlineError::Config(ref m) if m.contains(ENV_API_TIMEOUT_MS)));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_from_env_invalid_backend() {
        clear_env();
        std::env::set_var(ENV_API_URL, "http://localhost:8000");
        std::env::set_var(ENV_TOKEN_STORE, "cloud");

        assert!(load_from_env().is_err());

        clear_env();
    }

    #[test]
    fn test_load_from_file_json() {
        let file = temp_config(
            r#"{
                "api": { "base_url": "https://api.vaultline.test", "timeout_ms": 1000 },
                "storage": { "backend": "memory" }
            }"#,
            ".json",
        );

        let config = load_from_file(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.api.base_url, "https://api.vaultline.test");
        assert_eq!(config.api.version, "v1");
        assert_eq!(config.api.timeout_ms, 1000);
        assert_eq!(config.storage.backend, TokenStoreBackend::Memory);
        assert_eq!(config.notifications, NotificationConfig::default());
    }

    #[test]
    fn test_load_from_file_toml() {
        let file = temp_config(
            r#"
[api]
base_url = "http://localhost:8000"
version = "v3"

[notifications]
ttl_ms = 1000
"#,
            ".toml",
        );

        let config = load_from_file(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.api.version, "v3");
        assert_eq!(config.notifications.ttl_ms, 1000);
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/config.json")));
        assert!(matches!(result, Err(VaultlineError::Config(_))));
    }

    #[test]
    fn test_load_from_file_invalid_json() {
        let file = temp_config(r#"{ "this is": "not valid json" "#, ".json");
        assert!(load_from_file(Some(file.path().to_path_buf())).is_err());
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("some content", &PathBuf::from("test.yaml"));
        assert!(result.is_err(), "Should fail with unsupported format");
    }
}
