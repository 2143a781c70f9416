//! # Vaultline Domain
//!
//! Business domain types for the Vaultline client core.
//!
//! This crate contains:
//! - Session, user profile and notification types
//! - Error types (`ApiError`, `VaultlineError`) and Result definitions
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other Vaultline crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
