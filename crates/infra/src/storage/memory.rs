//! Process-local token store
//!
//! Nothing survives a restart. Used by tests and as the builder default.

use parking_lot::RwLock;
use vaultline_common::{TokenStore, TokenStoreError};

/// Token store that lives only as long as the process
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, TokenStoreError> {
        Ok(self.token.read().clone())
    }

    fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        *self.token.write() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        *self.token.write() = None;
        Ok(())
    }
}
