//! Backend API gateway client
//!
//! Every call to the remote service goes through [`ApiClient`]. It owns the
//! bearer token, builds headers, serializes bodies, negotiates response
//! content types, and turns every failure into an
//! [`ApiError`](vaultline_domain::ApiError).
//!
//! # Behaviour
//!
//! - No implicit retries; every failure surfaces to the caller
//! - Timeout on every request (from `ApiConfig::timeout_ms`)
//! - Token persisted synchronously through a `TokenStore`
//! - The token is never logged

mod auth;
pub mod client;
pub mod request;
pub mod response;

pub use client::{ApiClient, ApiClientBuilder};
pub use request::ApiRequest;
pub use response::{ApiResponse, ResponseBody};
