//! Shared test helpers for `vaultline-core` integration tests.
//!
//! The scripted gateway lets session tests control every backend outcome,
//! and hold requests open to exercise interleavings.

#![allow(dead_code)]

pub mod gateway;

use serde_json::json;
use vaultline_domain::{ApiError, AuthResponse, UserProfile};

pub use gateway::ScriptedGateway;

pub fn profile(id: u64, email: &str) -> UserProfile {
    UserProfile::from_value(json!({"id": id, "email": email, "name": "Test User"}))
        .expect("profile fixture is an object")
}

pub fn auth_response(token: &str, user: UserProfile) -> AuthResponse {
    AuthResponse { access_token: token.to_string(), token_type: Some("bearer".into()), user }
}

pub fn unauthorized(message: &str) -> ApiError {
    ApiError::from_response(401, "Unauthorized", Some(json!({"detail": message})))
}
