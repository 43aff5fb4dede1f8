// SPDX-FileCopyrightText: 2026 Guardian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the StorageAdapter trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use guardian_config::model::StorageConfig;
use guardian_core::{
    Credential, CredentialId, CredentialUpdate, GuardianError, HealthStatus, NewCredential,
    NewUser, PluginAdapter, SessionRecord, StorageAdapter, User, UserId,
};

use crate::database::Database;
use crate::queries;

/// SQLite-backed storage adapter.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily opened on the first call to
/// [`StorageAdapter::initialize`].
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a new SqliteStorage with the given configuration.
    ///
    /// The database connection is not opened until [`initialize`] is called.
    ///
    /// [`initialize`]: StorageAdapter::initialize
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    fn db(&self) -> Result<&Database, GuardianError> {
        self.db.get().ok_or_else(|| GuardianError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, GuardianError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), GuardianError> {
        if let Some(db) = self.db.get() {
            db.checkpoint().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    async fn initialize(&self) -> Result<(), GuardianError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| GuardianError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), GuardianError> {
        self.db()?.checkpoint().await?;
        debug!("WAL checkpoint complete");
        Ok(())
    }

    // --- User operations ---

    async fn create_user(&self, user: &NewUser) -> Result<User, GuardianError> {
        queries::users::create_user(self.db()?, user).await
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, GuardianError> {
        queries::users::get_user(self.db()?, id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, GuardianError> {
        queries::users::get_user_by_username(self.db()?, username).await
    }

    // --- Credential operations ---

    async fn list_credentials(&self, user: UserId) -> Result<Vec<Credential>, GuardianError> {
        queries::credentials::list_credentials(self.db()?, user).await
    }

    async fn get_credential(&self, id: CredentialId) -> Result<Option<Credential>, GuardianError> {
        queries::credentials::get_credential(self.db()?, id).await
    }

    async fn create_credential(
        &self,
        user: UserId,
        credential: &NewCredential,
    ) -> Result<Credential, GuardianError> {
        queries::credentials::create_credential(self.db()?, user, credential).await
    }

    async fn update_credential(
        &self,
        id: CredentialId,
        update: &CredentialUpdate,
    ) -> Result<Option<Credential>, GuardianError> {
        queries::credentials::update_credential(self.db()?, id, update).await
    }

    async fn delete_credential(&self, id: CredentialId) -> Result<bool, GuardianError> {
        queries::credentials::delete_credential(self.db()?, id).await
    }

    // --- Session operations ---

    async fn create_session(&self, session: &SessionRecord) -> Result<(), GuardianError> {
        queries::sessions::create_session(self.db()?, session).await
    }

    async fn get_session(&self, token_hash: &str) -> Result<Option<SessionRecord>, GuardianError> {
        queries::sessions::get_session(self.db()?, token_hash).await
    }

    async fn delete_session(&self, token_hash: &str) -> Result<(), GuardianError> {
        queries::sessions::delete_session(self.db()?, token_hash).await
    }

    async fn purge_expired_sessions(&self, now: &str) -> Result<usize, GuardianError> {
        queries::sessions::purge_expired_sessions(self.db()?, now).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn config_in(dir: &tempfile::TempDir) -> StorageConfig {
        StorageConfig {
            database_path: dir.path().join("adapter.db").to_string_lossy().into_owned(),
            wal_mode: true,
        }
    }

    #[tokio::test]
    async fn operations_before_initialize_fail() {
        let dir = tempdir().unwrap();
        let storage = SqliteStorage::new(config_in(&dir));
        assert!(storage.health_check().await.is_err());
        assert!(storage.list_credentials(UserId(1)).await.is_err());
        // Shutdown of a never-opened adapter is a no-op.
        storage.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn initialize_twice_is_an_error() {
        let dir = tempdir().unwrap();
        let storage = SqliteStorage::new(config_in(&dir));
        storage.initialize().await.unwrap();
        assert!(storage.initialize().await.is_err());
        storage.close().await.unwrap();
    }

    #[tokio::test]
    async fn adapter_delegates_to_queries() {
        let dir = tempdir().unwrap();
        let storage = SqliteStorage::new(config_in(&dir));
        storage.initialize().await.unwrap();
        assert_eq!(storage.name(), "sqlite");
        assert_eq!(storage.health_check().await.unwrap(), HealthStatus::Healthy);

        let user = storage
            .create_user(&NewUser {
                username: "alice".into(),
                password_hash: "hash".into(),
            })
            .await
            .unwrap();
        let created = storage
            .create_credential(
                user.id,
                &NewCredential {
                    title: "Bank".into(),
                    username: "alice".into(),
                    password: "S3cure!pass".into(),
                    category: "website".into(),
                },
            )
            .await
            .unwrap();

        let listed = storage.list_credentials(user.id).await.unwrap();
        assert_eq!(listed, vec![created.clone()]);
        assert!(storage.delete_credential(created.id).await.unwrap());
        storage.shutdown().await.unwrap();
    }
}
