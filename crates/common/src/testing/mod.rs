//! Testing utilities
//!
//! - **[`mocks`]**: in-memory implementations of the storage traits
//!
//! Enabled for downstream crates through the `test-utils` feature.

pub mod mocks;

pub use mocks::MockKeychainProvider;
