//! # Vaultline Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The session state machine driver ([`SessionController`])
//! - The ephemeral notification queue ([`NotificationQueue`])
//! - Port interfaces the infrastructure layer implements ([`AuthGateway`])
//!
//! ## Architecture Principles
//! - Only depends on `vaultline-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits

pub mod notifications;
pub mod session;

pub use notifications::NotificationQueue;
pub use session::ports::AuthGateway;
pub use session::SessionController;
