//! Bearer token persistence
//!
//! The API gateway client keeps exactly one credential: an opaque bearer
//! token. This module defines where that token lives between runs.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │    ApiClient     │  (vaultline-infra) sole writer of the token
//! └────────┬─────────┘
//!          │ dyn TokenStore
//!          ├──► KeychainTokenStore<S: SecretStore>
//!          │         ├──► KeychainProvider       (OS keychain)
//!          │         └──► MockKeychainProvider   (tests)
//!          └──► FileTokenStore                   (vaultline-infra)
//! ```
//!
//! Token stores are synchronous: persisting a token is part of
//! `ApiClient::set_token`, which must finish before it returns.

mod error;
mod keychain;
pub mod traits;

pub use error::TokenStoreError;
pub use keychain::KeychainTokenStore;
pub use traits::TokenStore;
