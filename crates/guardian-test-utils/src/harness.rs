// SPDX-FileCopyrightText: 2026 Guardian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use guardian_auth::AccountService;
use guardian_config::model::{AuthConfig, GuardianConfig, StorageConfig};
use guardian_core::{GuardianError, StorageAdapter};
use guardian_gateway::{build_router, GatewayState};
use guardian_storage::SqliteStorage;
use guardian_vault::VaultService;
use serde_json::Value;
use tower::ServiceExt;

/// Upper bound for buffered test response bodies.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    session_ttl_hours: Option<u32>,
    min_password_length: Option<usize>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            session_ttl_hours: None,
            min_password_length: None,
        }
    }

    /// Override the session lifetime.
    pub fn with_session_ttl_hours(mut self, hours: u32) -> Self {
        self.session_ttl_hours = Some(hours);
        self
    }

    /// Override the minimum account password length.
    pub fn with_min_password_length(mut self, len: usize) -> Self {
        self.min_password_length = Some(len);
        self
    }

    /// Build the harness: temp database, services, and router.
    pub async fn build(self) -> Result<TestHarness, GuardianError> {
        let temp_dir = tempfile::TempDir::new().map_err(GuardianError::storage)?;
        let db_path = temp_dir.path().join("test.db");

        let mut config = GuardianConfig::default();
        config.storage = StorageConfig {
            database_path: db_path.to_string_lossy().into_owned(),
            wal_mode: true,
        };
        // Minimum Argon2id costs keep the suite fast.
        config.auth = AuthConfig {
            kdf_memory_cost: 64,
            kdf_iterations: 1,
            kdf_parallelism: 1,
            session_ttl_hours: self
                .session_ttl_hours
                .unwrap_or(config.auth.session_ttl_hours),
            min_password_length: self
                .min_password_length
                .unwrap_or(config.auth.min_password_length),
        };

        let storage = SqliteStorage::new(config.storage.clone());
        storage.initialize().await?;
        let storage: Arc<dyn StorageAdapter> = Arc::new(storage);

        let accounts = AccountService::new(storage.clone(), config.auth.clone());
        let vault = VaultService::new(storage.clone());

        let state = GatewayState {
            accounts: accounts.clone(),
            vault: vault.clone(),
            storage: storage.clone(),
            generator: config.generator.clone(),
            start_time: std::time::Instant::now(),
        };

        tracing::debug!(path = %config.storage.database_path, "test harness ready");
        Ok(TestHarness {
            config,
            storage,
            accounts,
            vault,
            router: build_router(state),
            _temp_dir: temp_dir,
        })
    }
}

/// A buffered response from [`TestHarness::request`].
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    /// Parsed JSON body, or `Value::Null` for an empty body.
    pub body: Value,
}

/// A complete test stack.
pub struct TestHarness {
    pub config: GuardianConfig,
    pub storage: Arc<dyn StorageAdapter>,
    pub accounts: AccountService,
    pub vault: VaultService,
    router: Router,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// A clone of the router for driving requests directly.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Send one request through the router and buffer the JSON response.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let request = builder.body(body).expect("valid request");

        let response = self
            .router()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), MAX_BODY_BYTES)
            .await
            .expect("body fits");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON response body")
        };
        TestResponse { status, body }
    }

    /// Register an account through the API and return its session token.
    pub async fn register(&self, username: &str, password: &str) -> String {
        let response = self
            .request(
                Method::POST,
                "/api/register",
                None,
                Some(serde_json::json!({ "username": username, "password": password })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["token"]
            .as_str()
            .expect("session token")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn harness_builds_and_serves_health() {
        let harness = TestHarness::builder().build().await.unwrap();
        let response = harness.request(Method::GET, "/health", None, None).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["status"], "healthy");
    }

    #[tokio::test]
    async fn register_helper_returns_a_working_token() {
        let harness = TestHarness::builder().build().await.unwrap();
        let token = harness.register("alice", "password1").await;
        let me = harness.request(Method::GET, "/api/user", Some(&token), None).await;
        assert_eq!(me.status, StatusCode::OK);
        assert_eq!(me.body["username"], "alice");
    }
}
