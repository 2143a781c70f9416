//! Platform helpers shared across Vaultline crates.
//!
//! # Feature Tiers
//!
//! - (always): the [`auth::TokenStore`] port and the [`security::SecretStore`]
//!   abstraction, with a keychain-backed token store generic over it
//! - `platform`: the OS keychain provider ([`security::KeychainProvider`])
//! - `test-utils`: in-memory mocks for downstream test suites

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod auth;
pub mod security;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(any(feature = "test-utils", test))]
pub mod testing;

// Re-export commonly used types and traits for convenience
// ------------------------
pub use auth::{KeychainTokenStore, TokenStore, TokenStoreError};
#[cfg(feature = "platform")]
pub use security::KeychainProvider;
pub use security::{KeychainError, SecretStore};
