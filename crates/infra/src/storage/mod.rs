//! Token store backends
//!
//! The OS keychain backend lives in `vaultline-common`; this module adds the
//! file and in-memory backends and picks one from configuration.

mod file;
mod memory;

use std::sync::Arc;

pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;
use tracing::info;
use vaultline_common::{KeychainProvider, KeychainTokenStore, TokenStore};
use vaultline_domain::{StorageConfig, TokenStoreBackend};

/// Build the token store selected by `config`
pub fn build_token_store(config: &StorageConfig) -> Arc<dyn TokenStore> {
    info!(backend = %config.backend, "Using token store");
    match config.backend {
        TokenStoreBackend::Keychain => Arc::new(KeychainTokenStore::new(
            KeychainProvider::new(config.service_name.clone()),
            config.token_key.clone(),
        )),
        TokenStoreBackend::File => Arc::new(FileTokenStore::new(config.file_path.clone())),
        TokenStoreBackend::Memory => Arc::new(MemoryTokenStore::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_backend_uses_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            backend: TokenStoreBackend::File,
            file_path: dir.path().join("token"),
            ..StorageConfig::default()
        };

        let store = build_token_store(&config);
        store.save("tok1").unwrap();

        assert_eq!(std::fs::read_to_string(dir.path().join("token")).unwrap(), "tok1");
    }

    #[test]
    fn default_backend_round_trips_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let config =
            StorageConfig { file_path: dir.path().join("token"), ..StorageConfig::default() };
        assert_eq!(config.backend, TokenStoreBackend::File);

        build_token_store(&config).save("tok1").unwrap();

        let reopened = build_token_store(&config);
        assert_eq!(reopened.load().unwrap().as_deref(), Some("tok1"));
    }

    #[test]
    fn memory_backend_starts_empty() {
        let config =
            StorageConfig { backend: TokenStoreBackend::Memory, ..StorageConfig::default() };
        assert_eq!(build_token_store(&config).load().unwrap(), None);
    }
}
