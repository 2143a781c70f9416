//! Secret storage primitives
//!
//! - [`traits::SecretStore`]: key/value secret storage abstraction
//! - [`keychain::KeychainProvider`]: platform keychain implementation
//!   (feature `platform`)

#[cfg(feature = "platform")]
pub mod keychain;
pub mod traits;

#[cfg(feature = "platform")]
pub use keychain::KeychainProvider;
pub use traits::{KeychainError, SecretStore};
