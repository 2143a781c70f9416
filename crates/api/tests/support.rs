//! Shared helpers for application integration tests

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{json, Value};
use vaultline_app::AppContext;
use vaultline_common::testing::MockKeychainProvider;
use vaultline_common::{KeychainTokenStore, TokenStore};
use vaultline_domain::{ApiConfig, Config};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN_KEY: &str = "auth_token";

/// Mock backend plus an in-memory keychain shared by every context it builds
pub struct TestBackend {
    pub server: MockServer,
    keychain: MockKeychainProvider,
}

impl TestBackend {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
            keychain: MockKeychainProvider::new("vaultline-test"),
        }
    }

    pub fn store(&self) -> Arc<dyn TokenStore> {
        Arc::new(KeychainTokenStore::new(self.keychain.clone(), TOKEN_KEY))
    }

    pub fn persisted_token(&self) -> Option<String> {
        self.store().load().expect("keychain read")
    }

    pub fn config(&self) -> Config {
        Config {
            api: ApiConfig { base_url: self.server.uri(), ..ApiConfig::default() },
            ..Config::default()
        }
    }

    pub fn context(&self) -> AppContext {
        AppContext::with_store(self.config(), self.store()).expect("context")
    }

    pub async fn accept_login(&self, token: &str) {
        Mock::given(method("POST"))
            .and(path("/api/v1/auth/login"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"access_token": token, "user": user()})),
            )
            .mount(&self.server)
            .await;
    }

    pub async fn reject_login(&self, message: &str) {
        Mock::given(method("POST"))
            .and(path("/api/v1/auth/login"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": message})))
            .mount(&self.server)
            .await;
    }
}

pub fn user() -> Value {
    json!({"id": 42, "email": "ada@example.com", "name": "Ada"})
}
