// SPDX-FileCopyrightText: 2026 Guardian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registration, login, and session lookup.

use std::sync::Arc;

use chrono::{Duration, Utc};
use guardian_config::model::AuthConfig;
use guardian_core::types::format_timestamp;
use guardian_core::{GuardianError, NewUser, SessionRecord, StorageAdapter, User};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::password;
use crate::token::{hash_token, SessionToken};

/// A logged-in session as handed back to the client.
///
/// `token` is only ever available here; storage keeps its digest.
#[derive(Clone, Serialize)]
pub struct Session {
    pub token: String,
    pub user: User,
    pub expires_at: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("user", &self.user)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Account operations over a storage backend.
#[derive(Clone)]
pub struct AccountService {
    storage: Arc<dyn StorageAdapter>,
    config: AuthConfig,
    /// Hash verified against when the username is unknown, so both
    /// rejection paths pay for one Argon2id verification.
    decoy_hash: Arc<OnceCell<String>>,
}

impl AccountService {
    pub fn new(storage: Arc<dyn StorageAdapter>, config: AuthConfig) -> Self {
        Self {
            storage,
            config,
            decoy_hash: Arc::new(OnceCell::new()),
        }
    }

    /// Create an account. The username is trimmed; a taken one is a conflict.
    pub async fn register(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<User, GuardianError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(GuardianError::Validation("username is required".into()));
        }
        let min = self.config.min_password_length;
        if password.expose_secret().chars().count() < min {
            return Err(GuardianError::Validation(format!(
                "password must be at least {min} characters"
            )));
        }

        let password_hash = self.hash(password).await?;
        let user = self
            .storage
            .create_user(&NewUser {
                username: username.to_string(),
                password_hash,
            })
            .await?;
        info!(user_id = %user.id, username = %user.username, "account registered");
        Ok(user)
    }

    /// Verify the password and open a new session.
    ///
    /// An unknown username and a wrong password are both `Unauthorized`.
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<Session, GuardianError> {
        let Some(user) = self.storage.get_user_by_username(username.trim()).await? else {
            let decoy = self.decoy_hash().await?;
            self.verify(password, decoy).await?;
            debug!("login rejected: unknown username");
            return Err(GuardianError::Unauthorized);
        };

        if !self.verify(password, &user.password_hash).await? {
            warn!(user_id = %user.id, "login rejected: wrong password");
            return Err(GuardianError::Unauthorized);
        }

        let ttl_hours = self.config.session_ttl_hours;
        let now = Utc::now();
        let expires = Duration::try_hours(i64::from(ttl_hours))
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                GuardianError::Config(format!(
                    "auth.session_ttl_hours {ttl_hours} puts session expiry out of range"
                ))
            })?;
        let token = SessionToken::generate();
        let record = SessionRecord {
            token_hash: token.digest.clone(),
            user_id: user.id,
            created_at: format_timestamp(now),
            expires_at: format_timestamp(expires),
        };
        self.storage.create_session(&record).await?;
        info!(user_id = %user.id, expires_at = %record.expires_at, "session opened");

        Ok(Session {
            token: token.token,
            user,
            expires_at: record.expires_at,
        })
    }

    /// Resolve a bearer token to its user. Expired sessions are removed.
    pub async fn authenticate(&self, token: &str) -> Result<User, GuardianError> {
        let digest = hash_token(token);
        let Some(session) = self.storage.get_session(&digest).await? else {
            return Err(GuardianError::Unauthorized);
        };

        if session.expires_at <= format_timestamp(Utc::now()) {
            debug!(user_id = %session.user_id, "session expired");
            self.storage.delete_session(&digest).await?;
            return Err(GuardianError::Unauthorized);
        }

        self.storage
            .get_user(session.user_id)
            .await?
            .ok_or(GuardianError::Unauthorized)
    }

    /// End a session. Unknown tokens are ignored.
    pub async fn logout(&self, token: &str) -> Result<(), GuardianError> {
        self.storage.delete_session(&hash_token(token)).await?;
        debug!("session closed");
        Ok(())
    }

    /// Drop every expired session row.
    pub async fn purge_expired(&self) -> Result<usize, GuardianError> {
        let removed = self
            .storage
            .purge_expired_sessions(&format_timestamp(Utc::now()))
            .await?;
        if removed > 0 {
            info!(removed, "purged expired sessions");
        }
        Ok(removed)
    }

    async fn decoy_hash(&self) -> Result<&str, GuardianError> {
        let hash = self
            .decoy_hash
            .get_or_try_init(|| async {
                let decoy = SecretString::from("guardian-decoy-password".to_string());
                self.hash(&decoy).await
            })
            .await?;
        Ok(hash.as_str())
    }

    async fn hash(&self, password: &SecretString) -> Result<String, GuardianError> {
        let secret = Zeroizing::new(password.expose_secret().as_bytes().to_vec());
        let config = self.config.clone();
        tokio::task::spawn_blocking(move || password::hash_password(&secret, &config))
            .await
            .map_err(|e| GuardianError::Internal(format!("hashing task failed: {e}")))?
    }

    async fn verify(&self, password: &SecretString, stored: &str) -> Result<bool, GuardianError> {
        let secret = Zeroizing::new(password.expose_secret().as_bytes().to_vec());
        let stored = stored.to_string();
        tokio::task::spawn_blocking(move || password::verify_password(&secret, &stored))
            .await
            .map_err(|e| GuardianError::Internal(format!("verification task failed: {e}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guardian_config::model::StorageConfig;
    use guardian_storage::SqliteStorage;
    use tempfile::TempDir;

    async fn service_with(config: AuthConfig) -> (AccountService, Arc<SqliteStorage>, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(SqliteStorage::new(StorageConfig {
            database_path: dir.path().join("auth.db").to_string_lossy().into_owned(),
            wal_mode: true,
        }));
        storage.initialize().await.unwrap();
        let service = AccountService::new(storage.clone(), config);
        (service, storage, dir)
    }

    fn cheap() -> AuthConfig {
        AuthConfig {
            kdf_memory_cost: 64,
            kdf_iterations: 1,
            kdf_parallelism: 1,
            ..AuthConfig::default()
        }
    }

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    #[tokio::test]
    async fn register_then_login_then_authenticate() {
        let (service, _storage, _dir) = service_with(cheap()).await;
        let user = service.register("  alice ", &secret("hunter22")).await.unwrap();
        assert_eq!(user.username, "alice");
        assert!(user.password_hash.starts_with("$argon2id$"));

        let session = service.login("alice", &secret("hunter22")).await.unwrap();
        assert_eq!(session.user.id, user.id);
        assert_eq!(session.token.len(), 64);

        let resolved = service.authenticate(&session.token).await.unwrap();
        assert_eq!(resolved.id, user.id);
    }

    #[tokio::test]
    async fn register_validates_input() {
        let (service, _storage, _dir) = service_with(cheap()).await;
        assert!(matches!(
            service.register("   ", &secret("longenough")).await,
            Err(GuardianError::Validation(_))
        ));
        assert!(matches!(
            service.register("bob", &secret("12345")).await,
            Err(GuardianError::Validation(msg)) if msg.contains("at least 6")
        ));
        service.register("bob", &secret("123456")).await.unwrap();
    }

    #[tokio::test]
    async fn duplicate_username_is_conflict() {
        let (service, _storage, _dir) = service_with(cheap()).await;
        service.register("alice", &secret("password1")).await.unwrap();
        assert!(matches!(
            service.register("alice", &secret("password2")).await,
            Err(GuardianError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn bad_credentials_are_unauthorized() {
        let (service, _storage, _dir) = service_with(cheap()).await;
        service.register("alice", &secret("password1")).await.unwrap();
        assert!(matches!(
            service.login("alice", &secret("wrong-one")).await,
            Err(GuardianError::Unauthorized)
        ));
        assert!(matches!(
            service.login("mallory", &secret("password1")).await,
            Err(GuardianError::Unauthorized)
        ));
        assert!(matches!(
            service.authenticate("deadbeef").await,
            Err(GuardianError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn unknown_username_still_verifies_a_hash() {
        let (service, _storage, _dir) = service_with(cheap()).await;
        assert!(service.decoy_hash.get().is_none());

        assert!(matches!(
            service.login("nobody", &secret("password1")).await,
            Err(GuardianError::Unauthorized)
        ));
        let decoy = service.decoy_hash.get().unwrap().clone();
        assert!(decoy.starts_with("$argon2id$v=19$m=64,t=1,p=1$"));

        // Reused across attempts and clones.
        let clone = service.clone();
        assert!(clone.login("nobody", &secret("other")).await.is_err());
        assert_eq!(clone.decoy_hash.get().unwrap(), &decoy);
    }

    #[tokio::test]
    async fn out_of_range_session_ttl_is_a_config_error() {
        let config = AuthConfig {
            session_ttl_hours: u32::MAX,
            ..cheap()
        };
        let (service, _storage, _dir) = service_with(config).await;
        service.register("alice", &secret("password1")).await.unwrap();
        assert!(matches!(
            service.login("alice", &secret("password1")).await,
            Err(GuardianError::Config(msg)) if msg.contains("session_ttl_hours")
        ));
    }

    #[tokio::test]
    async fn logout_invalidates_token_and_is_idempotent() {
        let (service, _storage, _dir) = service_with(cheap()).await;
        service.register("alice", &secret("password1")).await.unwrap();
        let session = service.login("alice", &secret("password1")).await.unwrap();

        service.logout(&session.token).await.unwrap();
        assert!(service.authenticate(&session.token).await.is_err());
        service.logout(&session.token).await.unwrap();
    }

    #[tokio::test]
    async fn zero_ttl_sessions_expire_and_are_purged() {
        let config = AuthConfig {
            session_ttl_hours: 0,
            ..cheap()
        };
        let (service, storage, _dir) = service_with(config).await;
        service.register("alice", &secret("password1")).await.unwrap();
        let first = service.login("alice", &secret("password1")).await.unwrap();
        let _second = service.login("alice", &secret("password1")).await.unwrap();

        assert!(matches!(
            service.authenticate(&first.token).await,
            Err(GuardianError::Unauthorized)
        ));
        assert!(storage.get_session(&hash_token(&first.token)).await.unwrap().is_none());

        assert_eq!(service.purge_expired().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn session_serializes_without_password_hash() {
        let (service, _storage, _dir) = service_with(cheap()).await;
        service.register("alice", &secret("password1")).await.unwrap();
        let session = service.login("alice", &secret("password1")).await.unwrap();
        let json = serde_json::to_value(&session).unwrap();
        assert!(json["user"].get("password_hash").is_none());
        assert_eq!(json["user"]["username"], "alice");
        assert!(!format!("{session:?}").contains(&session.token));
    }
}
