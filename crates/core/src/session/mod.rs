//! Client session lifecycle
//!
//! [`SessionController`] owns the authoritative [`SessionState`] and is its
//! only writer. It drives transitions by calling the backend through the
//! [`AuthGateway`] port.
//!
//! [`SessionState`]: vaultline_domain::SessionState
//! [`AuthGateway`]: ports::AuthGateway

pub mod ports;
pub mod service;

pub use ports::AuthGateway;
pub use service::SessionController;
