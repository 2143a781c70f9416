//! # Vaultline Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The HTTP API gateway client (`reqwest`)
//! - Token store backends and their factory
//! - Configuration loading from environment and files
//!
//! ## Architecture
//! - Implements traits defined in `vaultline-core` and `vaultline-common`
//! - Contains all "impure" code (network, file system, OS keychain)

pub mod api;
pub mod config;
pub mod storage;

// Re-export commonly used items
pub use api::{ApiClient, ApiClientBuilder, ApiRequest, ApiResponse, ResponseBody};
pub use storage::{build_token_store, FileTokenStore, MemoryTokenStore};
